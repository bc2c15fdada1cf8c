use std::str::FromStr;

use crate::foundation::core::Stats;
use crate::schema::layers::LayerId;

/// One visual element file, tagged with the metadata the generator and
/// compositor need.
///
/// String fields use the empty string for "absent": the `"x"` placeholder
/// found in legacy manifests is normalized away at ingestion. An empty
/// `genes` field means the asset is usable by any family.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssetRecord {
    pub layer: LayerId,
    /// Unique handle within a layer, used to locate the image resource.
    pub filename: String,
    /// Human-readable element name.
    pub name: String,
    /// Optional character-family tag.
    #[serde(default)]
    pub character: String,
    /// Optional lineage tag (e.g. "npg", "erobot").
    #[serde(default)]
    pub genes: String,
    /// Informational rarity tier; never used in selection probability.
    #[serde(default)]
    pub rarity: String,
    /// Per-stat contributions, all-zero when the manifest omits them.
    #[serde(default)]
    pub stats: Stats,
}

/// Loosely-typed manifest entry as found in the external asset index.
///
/// Everything is optional here; [`RawAssetRecord::normalize`] decides what is
/// usable. Unknown manifest fields are ignored.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct RawAssetRecord {
    #[serde(default)]
    pub layer: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Alternate name field used by older manifests.
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub genes: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub stats: Option<Stats>,
}

impl RawAssetRecord {
    /// Validate and normalize into a typed [`AssetRecord`].
    ///
    /// Returns `None` when the record is unusable: missing layer token,
    /// unknown layer, or missing filename/name (the two essential fields).
    pub fn normalize(self) -> Option<AssetRecord> {
        let layer = LayerId::from_str(self.layer.as_deref()?).ok()?;
        let filename = non_empty(self.filename)?;
        let name = non_empty(self.name.or(self.item_name))?;

        Some(AssetRecord {
            layer,
            filename,
            name,
            character: normalize_sentinel(self.character),
            genes: normalize_sentinel(self.genes),
            rarity: normalize_sentinel(self.rarity),
            stats: self.stats.unwrap_or_default(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    let value = value?.trim().to_string();
    if value.is_empty() { None } else { Some(value) }
}

/// Collapse the legacy `"x"` placeholder (and whitespace) to the empty string.
fn normalize_sentinel(value: Option<String>) -> String {
    let value = value.unwrap_or_default().trim().to_string();
    if value.eq_ignore_ascii_case("x") {
        String::new()
    } else {
        value
    }
}
