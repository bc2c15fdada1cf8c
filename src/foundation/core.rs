use crate::foundation::error::{CardforgeError, CardforgeResult};

/// Number of stat dimensions carried by every asset and card.
pub const STAT_COUNT: usize = 6;

/// Fixed 6-dimension stat block: per-asset contributions and card aggregates
/// share this shape.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
pub struct Stats {
    pub strength: u32,
    pub speed: u32,
    pub skill: u32,
    pub stamina: u32,
    pub stealth: u32,
    pub style: u32,
}

impl Stats {
    /// All-zero stat block, the default for assets without stat metadata.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Elementwise saturating accumulation of another stat block.
    pub fn accumulate(&mut self, other: Stats) {
        self.strength = self.strength.saturating_add(other.strength);
        self.speed = self.speed.saturating_add(other.speed);
        self.skill = self.skill.saturating_add(other.skill);
        self.stamina = self.stamina.saturating_add(other.stamina);
        self.stealth = self.stealth.saturating_add(other.stealth);
        self.style = self.style.saturating_add(other.style);
    }

    /// Values in display order: strength, speed, skill, stamina, stealth, style.
    pub fn as_array(self) -> [u32; STAT_COUNT] {
        [
            self.strength,
            self.speed,
            self.skill,
            self.stamina,
            self.stealth,
            self.style,
        ]
    }
}

/// Target raster dimensions for a composed card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> CardforgeResult<Self> {
        if width == 0 || height == 0 {
            return Err(CardforgeError::validation(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

impl Default for CanvasSize {
    /// Dimensions of the reference card template (961x1441).
    fn default() -> Self {
        Self {
            width: 961,
            height: 1441,
        }
    }
}
