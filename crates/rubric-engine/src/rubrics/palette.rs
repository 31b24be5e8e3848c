//! Level colors: a linear gradient from "poor" red to "good" green.

use std::fmt;

/// Raised for inputs the palette cannot honor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid argument: {reason}")]
pub struct InvalidArgument {
    reason: String,
}

impl InvalidArgument {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Color of the lowest level (index 0).
pub const POOR: Rgb = Rgb(0xFF, 0x4C, 0x4C);
/// Color of the highest level, and of a rubric with a single level.
pub const GOOD: Rgb = Rgb(0x4C, 0xAF, 0x50);

impl Rgb {
    /// Accepts `#RRGGBB` or `RRGGBB` in any case.
    pub fn parse_hex(value: &str) -> Option<Self> {
        let digits = value.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    fn lerp(self, end: Self, ratio: f64) -> Self {
        let channel = |start: u8, end: u8| {
            let value = f64::from(start) + (f64::from(end) - f64::from(start)) * ratio;
            value.round().clamp(0.0, 255.0) as u8
        };
        Self(
            channel(self.0, end.0),
            channel(self.1, end.1),
            channel(self.2, end.2),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Produce one uppercase `#RRGGBB` color per level, worst first.
pub fn generate_colors(level_count: usize) -> Result<Vec<String>, InvalidArgument> {
    match level_count {
        0 => Err(InvalidArgument::new("level count must be positive")),
        1 => Ok(vec![GOOD.to_string()]),
        _ => {
            let last = (level_count - 1) as f64;
            Ok((0..level_count)
                .map(|index| POOR.lerp(GOOD, index as f64 / last).to_string())
                .collect())
        }
    }
}

/// Normalize a caller-supplied color to uppercase `#RRGGBB`.
pub fn normalize_color(value: &str) -> Option<String> {
    Rgb::parse_hex(value).map(|rgb| rgb.to_string())
}
