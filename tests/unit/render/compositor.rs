use super::*;
use crate::foundation::core::CanvasSize;
use crate::render::layout::{QrBox, TextBox};
use crate::render::plan::{DrawOp, QrOp};
use crate::render::source::MemoryImageSource;
use crate::schema::layers::LayerId;

fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut out = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

fn op(layer: LayerId, folder: &str, filename: &str, role: DrawRole) -> DrawOp {
    DrawOp {
        layer,
        folder: folder.to_string(),
        filename: filename.to_string(),
        role,
    }
}

fn plan(ops: Vec<DrawOp>, canvas: CanvasSize) -> CardPlan {
    CardPlan {
        canvas,
        ops,
        texts: vec![],
        qr: None,
    }
}

fn decode(bytes: &[u8]) -> RgbaImage {
    assert_eq!(
        image::guess_format(bytes).unwrap(),
        image::ImageFormat::Png
    );
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

#[test]
fn layers_composite_in_plan_order() {
    let canvas = CanvasSize::new(4, 4).unwrap();
    let mut source = MemoryImageSource::new();
    source.insert("29-Background", "red.png", png_bytes(4, 4, [255, 0, 0, 255]));
    source.insert("10-Hair", "blue.png", png_bytes(4, 4, [0, 0, 255, 255]));

    let plan = plan(
        vec![
            op(LayerId::Background, "29-Background", "red.png", DrawRole::Asset),
            op(LayerId::Hair, "10-Hair", "blue.png", DrawRole::Asset),
        ],
        canvas,
    );
    let out = Compositor::new().render(&plan, &source).unwrap();
    let img = decode(&out);
    assert_eq!(img.dimensions(), (4, 4));
    assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
}

#[test]
fn missing_asset_is_skipped() {
    let canvas = CanvasSize::new(4, 4).unwrap();
    let mut source = MemoryImageSource::new();
    source.insert("29-Background", "red.png", png_bytes(4, 4, [255, 0, 0, 255]));

    let plan = plan(
        vec![
            op(LayerId::Background, "29-Background", "red.png", DrawRole::Asset),
            op(LayerId::Hair, "10-Hair", "gone.png", DrawRole::Asset),
        ],
        canvas,
    );
    let out = Compositor::new().render(&plan, &source).unwrap();
    assert_eq!(decode(&out).get_pixel(2, 2), &Rgba([255, 0, 0, 255]));
}

#[test]
fn missing_template_aborts_the_render() {
    let canvas = CanvasSize::new(4, 4).unwrap();
    let source = MemoryImageSource::new();
    let plan = plan(
        vec![op(
            LayerId::Interface,
            "05-Interface",
            "frame.png",
            DrawRole::Template,
        )],
        canvas,
    );
    let err = Compositor::new().render(&plan, &source).unwrap_err();
    assert!(err.to_string().contains("frame.png"));
}

#[test]
fn undersized_layers_are_scaled_to_the_canvas() {
    let canvas = CanvasSize::new(8, 8).unwrap();
    let mut source = MemoryImageSource::new();
    source.insert("29-Background", "tiny.png", png_bytes(2, 2, [0, 255, 0, 255]));

    let plan = plan(
        vec![op(
            LayerId::Background,
            "29-Background",
            "tiny.png",
            DrawRole::Asset,
        )],
        canvas,
    );
    let out = Compositor::new().render(&plan, &source).unwrap();
    let img = decode(&out);
    assert_eq!(img.dimensions(), (8, 8));
    assert_eq!(img.get_pixel(7, 7), &Rgba([0, 255, 0, 255]));
}

#[test]
fn qr_overlay_draws_black_and_white_modules() {
    let canvas = CanvasSize::new(128, 128).unwrap();
    let source = MemoryImageSource::new();
    let mut plan = plan(vec![], canvas);
    plan.qr = Some(QrOp {
        payload: "npg-nft-42-1700000000000".to_string(),
        placement: QrBox {
            x: 0,
            y: 0,
            width: 128,
            height: 128,
        },
    });

    let out = Compositor::new().render(&plan, &source).unwrap();
    let img = decode(&out);
    let mut has_black = false;
    let mut has_white = false;
    for pixel in img.pixels() {
        if pixel.0[3] == 255 {
            has_black |= pixel.0[0] == 0;
            has_white |= pixel.0[0] == 255;
        }
    }
    assert!(has_black && has_white);
}

#[test]
fn texts_are_skipped_without_a_font() {
    let canvas = CanvasSize::new(16, 16).unwrap();
    let source = MemoryImageSource::new();
    let mut plan = plan(vec![], canvas);
    plan.texts.push(TextOp {
        text: "Akari".to_string(),
        placement: TextBox {
            x: 1,
            y: 1,
            size: 8.0,
            align: HAlign::Left,
        },
    });

    let out = Compositor::new().render(&plan, &source).unwrap();
    // Nothing composited: the canvas stays fully transparent.
    assert!(decode(&out).pixels().all(|p| p.0[3] == 0));
}

#[test]
fn invalid_font_bytes_are_rejected() {
    assert!(Compositor::with_font(b"not a font".to_vec()).is_err());
}

#[test]
fn qr_render_matches_the_requested_box() {
    let img = render_qr("npg-nft-1-0", 130, 130).unwrap();
    assert_eq!(img.dimensions(), (130, 130));
}

#[test]
fn fit_to_canvas_is_identity_at_matching_size() {
    let img = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
    let fitted = fit_to_canvas(img.clone(), 4, 4);
    assert_eq!(fitted, img);
}
