use std::collections::BTreeMap;

use crate::catalog::record::AssetRecord;
use crate::foundation::core::Stats;
use crate::schema::layers::LayerId;

/// Per-layer summary entry carried by a generated card, in draw order.
///
/// Structural layers (logo, interface, copyright) are composited but never
/// appear here.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AttributeEntry {
    pub layer: LayerId,
    pub name: String,
    pub character: String,
    pub genes: String,
    pub rarity: String,
    pub stats: Stats,
}

impl AttributeEntry {
    /// Build a summary entry from a selected asset.
    pub fn from_asset(asset: &AssetRecord) -> Self {
        Self {
            layer: asset.layer,
            name: asset.name.clone(),
            character: asset.character.clone(),
            genes: asset.genes.clone(),
            rarity: asset.rarity.clone(),
            stats: asset.stats,
        }
    }
}

/// One generated character card: the engine's output, immutable once built.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CharacterRecord {
    /// Display identifier in `[1, 10000]`; collision resistance is the
    /// downstream persistence layer's concern.
    pub number: u32,
    pub name: String,
    /// Family label derived from the generation filter.
    pub team: String,
    pub series: String,
    pub total_supply: u32,
    /// Chosen asset per included layer; every required layer is present.
    pub selected: BTreeMap<LayerId, AssetRecord>,
    /// Summary entries in draw order, structural layers omitted.
    pub attributes: Vec<AttributeEntry>,
    /// Aggregate over selected layers not excluded from totals.
    pub total_stats: Stats,
    /// Opaque payload later rendered as a scannable code.
    pub qr_payload: String,
}

impl CharacterRecord {
    /// Replace the stat aggregate, leaving everything else untouched.
    ///
    /// Used by manual stat overrides; values are taken as-is.
    pub fn update_stats(mut self, stats: Stats) -> Self {
        self.total_stats = stats;
        self
    }
}
