use crate::foundation::core::STAT_COUNT;

/// Horizontal alignment of a text field relative to its anchor x.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Fixed placement of one overlay text field.
///
/// The vertical anchor is always the top edge, whatever the positioning tool
/// recorded, so preview tooling and the final render agree.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextBox {
    pub x: i64,
    pub y: i64,
    pub size: f32,
    pub align: HAlign,
}

impl TextBox {
    fn left(x: i64, y: i64, size: f32) -> Self {
        Self {
            x,
            y,
            size,
            align: HAlign::Left,
        }
    }
}

/// Fixed placement of the scannable code overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QrBox {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Stat display labels, in the same order as `Stats::as_array`.
pub const STAT_LABELS: [&str; STAT_COUNT] =
    ["Strength", "Speed", "Skill", "Stamina", "Stealth", "Style"];

/// Static coordinate table for every overlay drawn on a composed card.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CardLayout {
    pub name: TextBox,
    pub number: TextBox,
    pub series: TextBox,
    pub qr: QrBox,
    pub stat_labels: [TextBox; STAT_COUNT],
    pub stat_values: [TextBox; STAT_COUNT],
}

impl CardLayout {
    /// Coordinates captured from the positioning tool for the 961x1441
    /// reference template.
    pub fn standard() -> Self {
        Self {
            name: TextBox::left(400, 160, 50.0),
            number: TextBox::left(458, 90, 36.0),
            series: TextBox::left(393, 85, 40.0),
            qr: QrBox {
                x: 749,
                y: 90,
                width: 130,
                height: 130,
            },
            stat_labels: [
                TextBox::left(116, 1210, 34.0),
                TextBox::left(379, 1210, 34.0),
                TextBox::left(631, 1210, 34.0),
                TextBox::left(116, 1282, 34.0),
                TextBox::left(378, 1282, 34.0),
                TextBox::left(630, 1282, 34.0),
            ],
            stat_values: [
                TextBox::left(302, 1210, 34.0),
                TextBox::left(559, 1210, 34.0),
                TextBox::left(814, 1210, 34.0),
                TextBox::left(302, 1282, 34.0),
                TextBox::left(561, 1282, 34.0),
                TextBox::left(814, 1282, 34.0),
            ],
        }
    }
}

impl Default for CardLayout {
    fn default() -> Self {
        Self::standard()
    }
}

/// Digits of a series label, defaulting to "1" when the label has none.
pub fn series_digits(series: &str) -> String {
    let digits: String = series.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        "1".to_string()
    } else {
        digits
    }
}
