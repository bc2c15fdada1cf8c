//! Cardforge is a procedural character-card generation and compositing engine.
//!
//! It turns a catalog of layered visual assets into finished collectible-card
//! images in three stages:
//!
//! 1. **Generate**: `AssetCatalog + LayerSchema + Filter -> CharacterRecord`
//!    (constraint-based random selection, stat aggregation)
//! 2. **Compile**: `RenderRequest -> CardPlan` (pure, deterministic draw
//!    order over explicit layer ops)
//! 3. **Render**: `CardPlan -> PNG bytes` (CPU compositing, text and QR
//!    overlays)
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: the generator is a pure function of its
//!   inputs, including a caller-supplied seedable RNG; plan compilation is
//!   pure and IO-free.
//! - **No hidden IO**: image bytes come in through the [`ImageSource`] seam,
//!   names through [`NameSource`]; the engine never caches or mutates
//!   external resources.
//! - **Partial renders over total failure**: only a missing interface
//!   template aborts a render; every other per-layer failure is logged and
//!   skipped.
#![forbid(unsafe_code)]

mod catalog;
mod foundation;
mod generate;
mod render;
mod schema;

pub use catalog::names::{NameList, NameSource};
pub use catalog::record::{AssetRecord, RawAssetRecord};
pub use catalog::store::AssetCatalog;
pub use foundation::core::{CanvasSize, STAT_COUNT, Stats};
pub use foundation::error::{CardforgeError, CardforgeResult};
pub use generate::engine::{
    DEFAULT_SERIES, Filter, Generator, LEGACY_EXCLUDED_FILENAME, MAX_CARD_NUMBER,
    OPTIONAL_LAYER_PROBABILITY, PRIMARY_FAMILY_GENE, PRIMARY_FAMILY_LABEL, QR_PREFIX,
    SECONDARY_FAMILY_GENE, SECONDARY_FAMILY_LABEL, gene_for_team, qr_payload, resolve_team,
};
pub use generate::record::{AttributeEntry, CharacterRecord};
pub use render::compositor::Compositor;
pub use render::layout::{CardLayout, HAlign, QrBox, STAT_LABELS, TextBox, series_digits};
pub use render::plan::{
    CardPlan, DrawOp, DrawRole, PRIMARY_BADGE_FILENAME, QrOp, RenderRequest,
    SECONDARY_BADGE_FILENAME, TextOp, compile_card,
};
pub use render::source::{FsImageSource, ImageSource, MemoryImageSource, decode_image};
pub use schema::layers::{LayerId, LayerSchema, LayerSpec};
