use std::collections::BTreeSet;
use std::str::FromStr;

use crate::foundation::error::{CardforgeError, CardforgeResult};

/// Canonical identifier for one slot in the compositing stack.
///
/// Variants are listed in draw order (bottom of the stack first). The serde
/// names match the catalog's layer tokens (`BODY_SKIN`, `REAR_HAIR`, ...).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayerId {
    Background,
    Glow,
    Banner,
    Decals,
    RearHair,
    RearHorns,
    Back,
    BodySkin,
    Arms,
    Underwear,
    Face,
    Bottom,
    Bra,
    Accessories,
    Jewellery,
    Boots,
    Top,
    Mask,
    Hair,
    Horns,
    LeftWeapon,
    RightWeapon,
    Effects,
    Interface,
    Team,
    Scores,
    Copyright,
    Logo,
}

impl LayerId {
    /// All layers in draw order (bottom to top).
    pub const ALL: [LayerId; 28] = [
        LayerId::Background,
        LayerId::Glow,
        LayerId::Banner,
        LayerId::Decals,
        LayerId::RearHair,
        LayerId::RearHorns,
        LayerId::Back,
        LayerId::BodySkin,
        LayerId::Arms,
        LayerId::Underwear,
        LayerId::Face,
        LayerId::Bottom,
        LayerId::Bra,
        LayerId::Accessories,
        LayerId::Jewellery,
        LayerId::Boots,
        LayerId::Top,
        LayerId::Mask,
        LayerId::Hair,
        LayerId::Horns,
        LayerId::LeftWeapon,
        LayerId::RightWeapon,
        LayerId::Effects,
        LayerId::Interface,
        LayerId::Team,
        LayerId::Scores,
        LayerId::Copyright,
        LayerId::Logo,
    ];

    /// Canonical token, identical to the serde name.
    pub fn as_str(self) -> &'static str {
        match self {
            LayerId::Background => "BACKGROUND",
            LayerId::Glow => "GLOW",
            LayerId::Banner => "BANNER",
            LayerId::Decals => "DECALS",
            LayerId::RearHair => "REAR_HAIR",
            LayerId::RearHorns => "REAR_HORNS",
            LayerId::Back => "BACK",
            LayerId::BodySkin => "BODY_SKIN",
            LayerId::Arms => "ARMS",
            LayerId::Underwear => "UNDERWEAR",
            LayerId::Face => "FACE",
            LayerId::Bottom => "BOTTOM",
            LayerId::Bra => "BRA",
            LayerId::Accessories => "ACCESSORIES",
            LayerId::Jewellery => "JEWELLERY",
            LayerId::Boots => "BOOTS",
            LayerId::Top => "TOP",
            LayerId::Mask => "MASK",
            LayerId::Hair => "HAIR",
            LayerId::Horns => "HORNS",
            LayerId::LeftWeapon => "LEFT_WEAPON",
            LayerId::RightWeapon => "RIGHT_WEAPON",
            LayerId::Effects => "EFFECTS",
            LayerId::Interface => "INTERFACE",
            LayerId::Team => "TEAM",
            LayerId::Scores => "SCORES",
            LayerId::Copyright => "COPYRIGHT",
            LayerId::Logo => "LOGO",
        }
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerId {
    type Err = CardforgeError;

    /// Case-insensitive parse of a layer token.
    ///
    /// Catalogs in the wild mix casings (`Team` vs `TEAM`); this is the single
    /// place that maps strings to layer identifiers.
    fn from_str(s: &str) -> CardforgeResult<Self> {
        LayerId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CardforgeError::catalog(format!("unknown layer token '{s}'")))
    }
}

/// Per-layer configuration: folder token plus selection/aggregation flags.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LayerSpec {
    /// Layer identifier.
    pub id: LayerId,
    /// Storage-location token combined with an asset filename to resolve the
    /// underlying image resource.
    pub folder: String,
    /// Required layers must have exactly one selected asset per generation.
    pub required: bool,
    /// Stats of assets in these layers are left out of the card aggregate.
    pub excluded_from_totals: bool,
    /// Structural layers (logo, interface frame, copyright) are composited
    /// but omitted from the attribute summary.
    pub structural: bool,
    /// Whether the random selector may pick from this layer at all.
    pub selectable: bool,
}

/// Static, immutable layer table: draw order, per-layer flags, and the set of
/// layers exempt from family filtering.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LayerSchema {
    layers: Vec<LayerSpec>,
    filter_exempt: BTreeSet<LayerId>,
}

impl LayerSchema {
    /// Build a schema from an explicit layer table.
    ///
    /// Validates that layer ids are unique and that every filter-exempt id is
    /// present in the table.
    pub fn new(
        layers: Vec<LayerSpec>,
        filter_exempt: BTreeSet<LayerId>,
    ) -> CardforgeResult<Self> {
        if layers.is_empty() {
            return Err(CardforgeError::validation("layer table must be non-empty"));
        }
        let mut seen = BTreeSet::new();
        for spec in &layers {
            if !seen.insert(spec.id) {
                return Err(CardforgeError::validation(format!(
                    "duplicate layer '{}' in schema",
                    spec.id
                )));
            }
            if spec.folder.trim().is_empty() {
                return Err(CardforgeError::validation(format!(
                    "layer '{}' has no folder mapping",
                    spec.id
                )));
            }
        }
        for id in &filter_exempt {
            if !seen.contains(id) {
                return Err(CardforgeError::validation(format!(
                    "filter-exempt layer '{id}' is not in the schema"
                )));
            }
        }
        Ok(Self {
            layers,
            filter_exempt,
        })
    }

    /// The reference deployment's 28-layer table.
    ///
    /// Required: background, body skin, face, hair, bra, underwear, arms,
    /// mask, team, logo, interface, copyright. Decorative layers (background,
    /// glow, banner, decals) are excluded from stat totals. The scores layer
    /// has no asset folder and is never selectable.
    pub fn standard() -> Self {
        fn spec(
            id: LayerId,
            folder: &str,
            required: bool,
            excluded_from_totals: bool,
            structural: bool,
            selectable: bool,
        ) -> LayerSpec {
            LayerSpec {
                id,
                folder: folder.to_string(),
                required,
                excluded_from_totals,
                structural,
                selectable,
            }
        }

        let layers = vec![
            spec(LayerId::Background, "29-Background", true, true, false, true),
            spec(LayerId::Glow, "28-Glow", false, true, false, true),
            spec(LayerId::Banner, "27-Banner", false, true, false, true),
            spec(LayerId::Decals, "26-Decals", false, true, false, true),
            spec(LayerId::RearHair, "24-Rear-Hair", false, false, false, true),
            spec(LayerId::RearHorns, "23-Rear-Horns", false, false, false, true),
            spec(LayerId::Back, "22-Back", false, false, false, true),
            spec(LayerId::BodySkin, "21-Body", true, false, false, true),
            spec(LayerId::Arms, "20-Arms", true, false, false, true),
            spec(LayerId::Underwear, "19-Underwear", true, false, false, true),
            spec(LayerId::Face, "18-Face", true, false, false, true),
            spec(LayerId::Bottom, "17-Bottom", false, false, false, true),
            spec(LayerId::Bra, "16-Bra", true, false, false, true),
            spec(
                LayerId::Accessories,
                "15-Accessories",
                false,
                false,
                false,
                true,
            ),
            spec(LayerId::Jewellery, "14-Jewellery", false, false, false, true),
            spec(LayerId::Boots, "13-Boots", false, false, false, true),
            spec(LayerId::Top, "12-Top", false, false, false, true),
            spec(LayerId::Mask, "11-Mask", true, false, false, true),
            spec(LayerId::Hair, "10-Hair", true, false, false, true),
            spec(LayerId::Horns, "09-Horns", false, false, false, true),
            spec(
                LayerId::LeftWeapon,
                "08-Left-Weapon",
                false,
                false,
                false,
                true,
            ),
            spec(
                LayerId::RightWeapon,
                "07-Right-Weapon",
                false,
                false,
                false,
                true,
            ),
            spec(LayerId::Effects, "06-Effects", false, false, false, true),
            spec(LayerId::Interface, "05-Interface", true, false, true, true),
            spec(LayerId::Team, "04-Team", true, false, false, true),
            // No asset folder exists for scores; kept for draw-order parity.
            spec(LayerId::Scores, "03-Scores", false, false, false, false),
            spec(LayerId::Copyright, "02-Copyright", true, false, true, true),
            spec(LayerId::Logo, "01-Logo", true, false, true, true),
        ];

        let filter_exempt = BTreeSet::from([LayerId::Glow, LayerId::Interface]);

        // The table above satisfies every `new` invariant by construction.
        Self {
            layers,
            filter_exempt,
        }
    }

    /// Replace the filter-exempt set, revalidating against the layer table.
    pub fn with_filter_exempt(
        self,
        filter_exempt: BTreeSet<LayerId>,
    ) -> CardforgeResult<Self> {
        Self::new(self.layers, filter_exempt)
    }

    /// Layers in draw order, bottom to top.
    pub fn order(&self) -> impl Iterator<Item = &LayerSpec> {
        self.layers.iter()
    }

    /// Required layers in draw order.
    pub fn required(&self) -> impl Iterator<Item = &LayerSpec> {
        self.layers.iter().filter(|spec| spec.required)
    }

    /// Lookup the spec for one layer.
    pub fn spec(&self, id: LayerId) -> Option<&LayerSpec> {
        self.layers.iter().find(|spec| spec.id == id)
    }

    /// Folder token for one layer, if the layer is in the schema.
    pub fn folder(&self, id: LayerId) -> Option<&str> {
        self.spec(id).map(|spec| spec.folder.as_str())
    }

    /// Whether a layer is exempt from family/gene filtering.
    pub fn is_filter_exempt(&self, id: LayerId) -> bool {
        self.filter_exempt.contains(&id)
    }

    /// Whether a layer's stats count toward the card aggregate.
    pub fn counts_toward_totals(&self, id: LayerId) -> bool {
        self.spec(id).is_some_and(|spec| !spec.excluded_from_totals)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/layers.rs"]
mod tests;
