use std::collections::BTreeMap;

use crate::foundation::core::{CanvasSize, Stats};
use crate::foundation::error::{CardforgeError, CardforgeResult};
use crate::generate::engine::gene_for_team;
use crate::generate::record::CharacterRecord;
use crate::render::layout::{CardLayout, QrBox, STAT_LABELS, TextBox, series_digits};
use crate::schema::layers::{LayerId, LayerSchema};

/// Badge image drawn for primary-family cards.
pub const PRIMARY_BADGE_FILENAME: &str = "01_001_logo_NPG-logo.png";

/// Badge image drawn for secondary-family cards.
pub const SECONDARY_BADGE_FILENAME: &str = "01_002_logo_Erobot-logo.png";

/// Everything the compositor needs to produce one card image.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderRequest {
    /// Selected image filename per layer.
    pub selected: BTreeMap<LayerId, String>,
    pub name: String,
    pub number: u32,
    pub series: String,
    pub stats: Stats,
    pub qr_payload: String,
    /// Family token resolving the badge layer; empty skips the badge.
    pub genes: String,
    /// Interface/frame template image; structurally required for the render.
    pub template_filename: String,
    pub canvas: CanvasSize,
}

impl RenderRequest {
    /// Build a request from a generated card and a chosen template image.
    pub fn from_record(record: &CharacterRecord, template_filename: impl Into<String>) -> Self {
        Self {
            selected: record
                .selected
                .iter()
                .map(|(layer, asset)| (*layer, asset.filename.clone()))
                .collect(),
            name: record.name.clone(),
            number: record.number,
            series: record.series.clone(),
            stats: record.total_stats,
            qr_payload: record.qr_payload.clone(),
            genes: gene_for_team(&record.team).unwrap_or_default().to_string(),
            template_filename: template_filename.into(),
            canvas: CanvasSize::default(),
        }
    }
}

/// Failure semantics of one draw operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DrawRole {
    /// Regular per-asset layer; load failures are logged and skipped.
    Asset,
    /// Family badge; load failures are logged and skipped.
    Badge,
    /// Interface template; a load failure aborts the whole render.
    Template,
}

/// One image composited onto the canvas, full size, at its stack position.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DrawOp {
    pub layer: LayerId,
    pub folder: String,
    pub filename: String,
    pub role: DrawRole,
}

/// One overlay text field.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextOp {
    pub text: String,
    pub placement: TextBox,
}

/// The scannable-code overlay.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QrOp {
    pub payload: String,
    pub placement: QrBox,
}

/// Fully resolved, backend-independent plan for one card render.
///
/// `ops` is in draw order (bottom of the stack first); executing the ops in
/// sequence and then the overlays reproduces the card exactly. Compiling the
/// plan is pure, so draw order is testable without touching pixels.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CardPlan {
    pub canvas: CanvasSize,
    pub ops: Vec<DrawOp>,
    pub texts: Vec<TextOp>,
    pub qr: Option<QrOp>,
}

/// Compile a render request into an ordered [`CardPlan`].
///
/// Walks the schema in draw order: the logo layer resolves to a family badge
/// (or is skipped for unknown tokens), the interface layer always draws the
/// request's template, and every other layer draws its selected asset when
/// one is present.
pub fn compile_card(
    request: &RenderRequest,
    schema: &LayerSchema,
    layout: &CardLayout,
) -> CardforgeResult<CardPlan> {
    if request.template_filename.trim().is_empty() {
        return Err(CardforgeError::validation(
            "render request has no template filename",
        ));
    }

    let mut ops = Vec::new();
    let mut has_template = false;

    for spec in schema.order() {
        match spec.id {
            LayerId::Logo => {
                let Some(filename) = badge_filename(&request.genes) else {
                    tracing::debug!(genes = %request.genes, "no badge for family token, skipping logo layer");
                    continue;
                };
                ops.push(DrawOp {
                    layer: spec.id,
                    folder: spec.folder.clone(),
                    filename: filename.to_string(),
                    role: DrawRole::Badge,
                });
            }
            LayerId::Interface => {
                ops.push(DrawOp {
                    layer: spec.id,
                    folder: spec.folder.clone(),
                    filename: request.template_filename.clone(),
                    role: DrawRole::Template,
                });
                has_template = true;
            }
            _ => {
                let Some(filename) = request.selected.get(&spec.id) else {
                    continue;
                };
                ops.push(DrawOp {
                    layer: spec.id,
                    folder: spec.folder.clone(),
                    filename: filename.clone(),
                    role: DrawRole::Asset,
                });
            }
        }
    }

    if !has_template {
        return Err(CardforgeError::validation(
            "schema has no interface layer; a template is structurally required",
        ));
    }

    let mut texts = vec![
        TextOp {
            text: request.name.clone(),
            placement: layout.name,
        },
        TextOp {
            text: request.number.to_string(),
            placement: layout.number,
        },
        TextOp {
            text: series_digits(&request.series),
            placement: layout.series,
        },
    ];
    for (label, placement) in STAT_LABELS.iter().zip(layout.stat_labels) {
        texts.push(TextOp {
            text: (*label).to_string(),
            placement,
        });
    }
    for (value, placement) in request.stats.as_array().iter().zip(layout.stat_values) {
        texts.push(TextOp {
            text: value.to_string(),
            placement,
        });
    }

    let qr = if request.qr_payload.is_empty() {
        tracing::warn!("render request has no qr payload, skipping qr overlay");
        None
    } else {
        Some(QrOp {
            payload: request.qr_payload.clone(),
            placement: layout.qr,
        })
    };

    Ok(CardPlan {
        canvas: request.canvas,
        ops,
        texts,
        qr,
    })
}

/// Badge image for a family token; unknown tokens draw no badge.
fn badge_filename(genes: &str) -> Option<&'static str> {
    if genes.eq_ignore_ascii_case("npg") {
        Some(PRIMARY_BADGE_FILENAME)
    } else if genes.eq_ignore_ascii_case("erobot") || genes.eq_ignore_ascii_case("erobotz") {
        Some(SECONDARY_BADGE_FILENAME)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
