use std::collections::BTreeMap;

use anyhow::Context;

use crate::catalog::record::{AssetRecord, RawAssetRecord};
use crate::foundation::error::CardforgeResult;
use crate::schema::layers::LayerId;

/// Read-only lookup table of asset records grouped by layer.
///
/// Built once per request scope from the external asset index; the engine
/// treats it as an immutable snapshot and never mutates it. Caching (if any)
/// is the caller's concern.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct AssetCatalog {
    by_layer: BTreeMap<LayerId, Vec<AssetRecord>>,
}

impl AssetCatalog {
    /// Group pre-built records by layer.
    pub fn from_records(records: impl IntoIterator<Item = AssetRecord>) -> Self {
        let mut by_layer: BTreeMap<LayerId, Vec<AssetRecord>> = BTreeMap::new();
        for record in records {
            by_layer.entry(record.layer).or_default().push(record);
        }
        Self { by_layer }
    }

    /// Parse a JSON manifest (a flat array of loosely-typed entries).
    ///
    /// Malformed entries are skipped with a logged warning rather than
    /// failing the whole ingestion; a catalog missing assets still generates,
    /// a catalog that refuses to load does not.
    pub fn from_json(manifest: &str) -> CardforgeResult<Self> {
        let raw: Vec<RawAssetRecord> =
            serde_json::from_str(manifest).context("parse asset manifest json")?;

        let total = raw.len();
        let mut skipped = 0usize;
        let records = raw.into_iter().filter_map(|entry| {
            let normalized = entry.normalize();
            if normalized.is_none() {
                skipped += 1;
            }
            normalized
        });
        let catalog = Self::from_records(records);

        if skipped > 0 {
            tracing::warn!(skipped, total, "skipped malformed asset manifest entries");
        }
        tracing::debug!(
            layers = catalog.by_layer.len(),
            assets = catalog.len(),
            "asset catalog loaded"
        );
        Ok(catalog)
    }

    /// All records for one layer; empty slice when the layer is unavailable.
    pub fn assets(&self, layer: LayerId) -> &[AssetRecord] {
        self.by_layer
            .get(&layer)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total record count across all layers.
    pub fn len(&self) -> usize {
        self.by_layer.values().map(Vec::len).sum()
    }

    /// Whether the catalog holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.by_layer.values().all(Vec::is_empty)
    }

    /// Layers with at least one record.
    pub fn layers(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.by_layer
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(layer, _)| *layer)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/store.rs"]
mod tests;
