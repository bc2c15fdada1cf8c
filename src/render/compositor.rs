use std::io::Cursor;

use ab_glyph::{FontVec, PxScale};
use anyhow::Context;
use image::{DynamicImage, Rgba, RgbaImage, imageops};
use imageproc::drawing::{draw_text_mut, text_size};
use rayon::prelude::*;

use crate::foundation::error::{CardforgeError, CardforgeResult};
use crate::render::layout::HAlign;
use crate::render::plan::{CardPlan, DrawRole, TextOp};
use crate::render::source::{ImageSource, decode_image};

const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Executes a [`CardPlan`] into a flattened PNG.
///
/// Layer images are fetched and decoded in parallel; compositing onto the
/// canvas happens strictly in plan order so the visual stacking is
/// deterministic.
pub struct Compositor {
    font: Option<FontVec>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor").finish_non_exhaustive()
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    /// Compositor without an overlay font; text ops are skipped with a
    /// warning.
    pub fn new() -> Self {
        Self { font: None }
    }

    /// Build a compositor from raw TTF/OTF font bytes for the overlay text.
    pub fn with_font(font_bytes: Vec<u8>) -> CardforgeResult<Self> {
        let font = FontVec::try_from_vec(font_bytes)
            .map_err(|e| CardforgeError::render(format!("load overlay font: {e}")))?;
        Ok(Self { font: Some(font) })
    }

    /// Render a plan to an encoded PNG buffer.
    ///
    /// Only a failed template op aborts; every other layer or overlay failure
    /// is logged and skipped so a nearly-complete card still comes out.
    #[tracing::instrument(skip_all)]
    pub fn render(
        &self,
        plan: &CardPlan,
        source: &dyn ImageSource,
    ) -> CardforgeResult<Vec<u8>> {
        let (width, height) = (plan.canvas.width, plan.canvas.height);
        let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));

        // Fetch order is irrelevant; draw order is not.
        let decoded: Vec<CardforgeResult<RgbaImage>> = plan
            .ops
            .par_iter()
            .map(|op| {
                source
                    .load(&op.folder, &op.filename)
                    .and_then(|bytes| decode_image(&bytes))
            })
            .collect();

        for (op, image) in plan.ops.iter().zip(decoded) {
            match image {
                Ok(img) => {
                    let img = fit_to_canvas(img, width, height);
                    imageops::overlay(&mut canvas, &img, 0, 0);
                }
                Err(err) if op.role == DrawRole::Template => {
                    return Err(CardforgeError::render(format!(
                        "failed to load interface template '{}': {err}",
                        op.filename
                    )));
                }
                Err(err) => {
                    tracing::warn!(
                        layer = %op.layer,
                        filename = %op.filename,
                        error = %err,
                        "skipping layer image"
                    );
                }
            }
        }

        match &self.font {
            Some(font) => {
                for text in &plan.texts {
                    draw_text(&mut canvas, font, text);
                }
            }
            None if !plan.texts.is_empty() => {
                tracing::warn!("no overlay font loaded, skipping text overlays");
            }
            None => {}
        }

        if let Some(qr) = &plan.qr {
            match render_qr(&qr.payload, qr.placement.width, qr.placement.height) {
                Ok(img) => imageops::overlay(&mut canvas, &img, qr.placement.x, qr.placement.y),
                Err(err) => tracing::warn!(error = %err, "skipping qr overlay"),
            }
        }

        let mut out = Vec::new();
        DynamicImage::ImageRgba8(canvas)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .context("encode card png")?;
        Ok(out)
    }
}

fn draw_text(canvas: &mut RgbaImage, font: &FontVec, op: &TextOp) {
    let scale = PxScale::from(op.placement.size);
    let text = op.text.to_uppercase();

    let x = match op.placement.align {
        HAlign::Left => op.placement.x,
        HAlign::Center => op.placement.x - i64::from(text_size(scale, font, &text).0) / 2,
        HAlign::Right => op.placement.x - i64::from(text_size(scale, font, &text).0),
    };

    // Vertical anchor is always the top edge.
    draw_text_mut(
        canvas,
        TEXT_COLOR,
        x as i32,
        op.placement.y as i32,
        scale,
        font,
        &text,
    );
}

/// Scale a layer image to cover the full canvas, as the card templates are
/// authored edge to edge.
fn fit_to_canvas(img: RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        img
    } else {
        imageops::resize(&img, width, height, imageops::FilterType::Triangle)
    }
}

/// Render the QR payload at error-correction level M, sized to its box.
fn render_qr(payload: &str, width: u32, height: u32) -> CardforgeResult<RgbaImage> {
    let code = qrcode::QrCode::with_error_correction_level(payload.as_bytes(), qrcode::EcLevel::M)
        .map_err(|e| CardforgeError::render(format!("qr encode: {e}")))?;
    let luma = code
        .render::<image::Luma<u8>>()
        .quiet_zone(true)
        .min_dimensions(width, height)
        .build();
    let rgba = DynamicImage::ImageLuma8(luma).to_rgba8();
    Ok(imageops::resize(
        &rgba,
        width,
        height,
        imageops::FilterType::Nearest,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
