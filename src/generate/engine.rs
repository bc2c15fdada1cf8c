use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::names::NameSource;
use crate::catalog::record::AssetRecord;
use crate::catalog::store::AssetCatalog;
use crate::foundation::core::Stats;
use crate::foundation::error::{CardforgeError, CardforgeResult};
use crate::generate::record::{AttributeEntry, CharacterRecord};
use crate::schema::layers::{LayerId, LayerSchema};

/// Chance that each non-required, selectable layer is included.
pub const OPTIONAL_LAYER_PROBABILITY: f64 = 0.7;

/// Stale catalog entry removed from consideration before every random pick.
pub const LEGACY_EXCLUDED_FILENAME: &str = "03_00_scores_x_x_x_x.png";

/// Fixed prefix of the generated QR payload.
pub const QR_PREFIX: &str = "npg-nft";

/// Upper bound (inclusive) of the generated card number.
pub const MAX_CARD_NUMBER: u32 = 10_000;

/// Gene token and display label of the primary family.
pub const PRIMARY_FAMILY_GENE: &str = "npg";
pub const PRIMARY_FAMILY_LABEL: &str = "NINJA PUNK GIRLS";

/// Gene token and display label of the secondary family.
pub const SECONDARY_FAMILY_GENE: &str = "erobot";
pub const SECONDARY_FAMILY_LABEL: &str = "EROBOTZ";

/// Series label stamped on generated cards.
pub const DEFAULT_SERIES: &str = "Series 1";

/// Generation-time selection constraint.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Filter {
    /// No constraint; every asset is eligible.
    All,
    /// Keep the card consistent with one family: assets with a conflicting
    /// gene tag are excluded, untagged assets stay eligible.
    Family(String),
    /// Reserved; currently behaves like [`Filter::All`].
    Color(String),
}

impl Filter {
    /// Requested family gene token, when the filter constrains one.
    pub fn family(&self) -> Option<&str> {
        match self {
            Filter::Family(family) => Some(family.as_str()),
            _ => None,
        }
    }
}

/// Team label and gene token implied by a filter.
///
/// Everything except an explicit secondary-family filter resolves to the
/// primary family.
pub fn resolve_team(filter: &Filter) -> (&'static str, &'static str) {
    if let Filter::Family(family) = filter
        && family.eq_ignore_ascii_case(SECONDARY_FAMILY_GENE)
    {
        return (SECONDARY_FAMILY_LABEL, SECONDARY_FAMILY_GENE);
    }
    (PRIMARY_FAMILY_LABEL, PRIMARY_FAMILY_GENE)
}

/// Map a team display label back to its gene token.
pub fn gene_for_team(team: &str) -> Option<&'static str> {
    if team.eq_ignore_ascii_case(PRIMARY_FAMILY_LABEL) {
        Some(PRIMARY_FAMILY_GENE)
    } else if team.eq_ignore_ascii_case(SECONDARY_FAMILY_LABEL) {
        Some(SECONDARY_FAMILY_GENE)
    } else {
        None
    }
}

/// Build the opaque QR payload for a card number and millisecond timestamp.
pub fn qr_payload(number: u32, timestamp_ms: u128) -> String {
    format!("{QR_PREFIX}-{number}-{timestamp_ms}")
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Constraint-based random card generator.
///
/// Pure function of its inputs: the catalog snapshot, the filter, the name
/// provider, and the caller-supplied RNG. Seeding the RNG makes every
/// selection reproducible.
#[derive(Clone, Debug)]
pub struct Generator {
    schema: LayerSchema,
    optional_layer_probability: f64,
}

impl Generator {
    /// Generator over the given layer schema with the default optional-layer
    /// probability.
    pub fn new(schema: LayerSchema) -> Self {
        Self {
            schema,
            optional_layer_probability: OPTIONAL_LAYER_PROBABILITY,
        }
    }

    /// Override the optional-layer inclusion probability.
    pub fn with_optional_probability(mut self, p: f64) -> CardforgeResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(CardforgeError::validation(
                "optional layer probability must be in [0, 1]",
            ));
        }
        self.optional_layer_probability = p;
        Ok(self)
    }

    /// The schema this generator selects against.
    pub fn schema(&self) -> &LayerSchema {
        &self.schema
    }

    /// Generate one character card.
    ///
    /// Fatal failures: empty catalog, or a required layer with zero assets
    /// even before filtering. Every other irregularity (empty eligible
    /// subset, unavailable optional layer, missing team badge) is logged and
    /// recovered per the documented fallback rules.
    #[tracing::instrument(skip(self, catalog, names, rng))]
    pub fn generate<R: Rng>(
        &self,
        catalog: &AssetCatalog,
        filter: &Filter,
        names: &dyn NameSource,
        rng: &mut R,
    ) -> CardforgeResult<CharacterRecord> {
        if catalog.is_empty() {
            return Err(CardforgeError::generation("asset catalog is empty"));
        }

        let mut selected: BTreeMap<LayerId, AssetRecord> = BTreeMap::new();

        for spec in self.schema.required() {
            let asset = if spec.id == LayerId::Team {
                self.pick_team_badge(catalog, filter, rng)?
            } else {
                self.pick_required(catalog, spec.id, filter, rng)?
            };
            selected.insert(spec.id, asset);
        }

        for spec in self.schema.order() {
            if spec.required || !spec.selectable || selected.contains_key(&spec.id) {
                continue;
            }
            if !rng.gen_bool(self.optional_layer_probability) {
                continue;
            }
            let assets = catalog.assets(spec.id);
            if assets.is_empty() {
                tracing::debug!(layer = %spec.id, "optional layer unavailable in catalog");
                continue;
            }
            match self.eligible(assets, spec.id, filter).choose(rng) {
                Some(asset) => {
                    selected.insert(spec.id, (*asset).clone());
                }
                // No fallback for optional layers; the slot stays empty.
                None => {
                    tracing::debug!(layer = %spec.id, "no eligible assets for optional layer")
                }
            }
        }

        let mut total_stats = Stats::zero();
        let mut attributes = Vec::new();
        for spec in self.schema.order() {
            let Some(asset) = selected.get(&spec.id) else {
                continue;
            };
            if !spec.excluded_from_totals {
                total_stats.accumulate(asset.stats);
            }
            if !spec.structural {
                attributes.push(AttributeEntry::from_asset(asset));
            }
        }

        let (team, _) = resolve_team(filter);
        let number = rng.gen_range(1..=MAX_CARD_NUMBER);
        let name = names.pick(filter.family(), rng);
        let qr = qr_payload(number, unix_millis());

        Ok(CharacterRecord {
            number,
            name,
            team: team.to_string(),
            series: DEFAULT_SERIES.to_string(),
            total_supply: MAX_CARD_NUMBER,
            selected,
            attributes,
            total_stats,
            qr_payload: qr,
        })
    }

    /// Eligible subset of a layer, with the legacy bad entry removed.
    fn eligible<'a>(
        &self,
        assets: &'a [AssetRecord],
        layer: LayerId,
        filter: &Filter,
    ) -> Vec<&'a AssetRecord> {
        assets
            .iter()
            .filter(|asset| asset.filename != LEGACY_EXCLUDED_FILENAME)
            .filter(|asset| self.matches_filter(asset, layer, filter))
            .collect()
    }

    /// Inclusive family match: only an explicitly conflicting gene tag
    /// excludes an asset.
    fn matches_filter(&self, asset: &AssetRecord, layer: LayerId, filter: &Filter) -> bool {
        let Some(family) = filter.family() else {
            return true;
        };
        if self.schema.is_filter_exempt(layer) {
            return true;
        }
        asset.genes.is_empty() || asset.genes.eq_ignore_ascii_case(family)
    }

    fn pick_required<R: Rng>(
        &self,
        catalog: &AssetCatalog,
        layer: LayerId,
        filter: &Filter,
        rng: &mut R,
    ) -> CardforgeResult<AssetRecord> {
        let assets = catalog.assets(layer);
        if assets.is_empty() {
            return Err(CardforgeError::generation(format!(
                "required layer {layer} has no assets"
            )));
        }

        if let Some(asset) = self.eligible(assets, layer, filter).choose(rng) {
            return Ok((*asset).clone());
        }

        // A required layer must never stay unfilled: sample the entire
        // unfiltered layer instead.
        tracing::warn!(layer = %layer, ?filter, "no eligible assets, falling back to unfiltered pick");
        assets.choose(rng).cloned().ok_or_else(|| {
            CardforgeError::generation(format!("required layer {layer} has no assets"))
        })
    }

    /// Team-badge selection: exact match for the primary family, uniform
    /// among matches for the secondary, logged random fallback otherwise.
    fn pick_team_badge<R: Rng>(
        &self,
        catalog: &AssetCatalog,
        filter: &Filter,
        rng: &mut R,
    ) -> CardforgeResult<AssetRecord> {
        let assets = catalog.assets(LayerId::Team);
        if assets.is_empty() {
            return Err(CardforgeError::generation(format!(
                "required layer {} has no assets",
                LayerId::Team
            )));
        }

        let (_, gene) = resolve_team(filter);
        let badge = if gene == PRIMARY_FAMILY_GENE {
            assets
                .iter()
                .find(|asset| asset.genes.eq_ignore_ascii_case(PRIMARY_FAMILY_GENE))
        } else {
            let matches: Vec<&AssetRecord> = assets
                .iter()
                .filter(|asset| asset.genes.eq_ignore_ascii_case(gene))
                .collect();
            matches.choose(rng).copied()
        };

        match badge {
            Some(asset) => Ok(asset.clone()),
            None => {
                tracing::warn!(
                    team_gene = gene,
                    "no team badge for family, falling back to random team asset"
                );
                assets.choose(rng).cloned().ok_or_else(|| {
                    CardforgeError::generation(format!(
                        "required layer {} has no assets",
                        LayerId::Team
                    ))
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/engine.rs"]
mod tests;
