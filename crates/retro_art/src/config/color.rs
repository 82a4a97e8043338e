//! RGB colors as written in layout documents

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
///
/// Accepts `[r, g, b]`, `"#rrggbb"` or a handful of color names when
/// deserializing; always serializes back as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "[u8; 3]")]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Pure black
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Selection outline default
    pub const RED: Self = Self::new(255, 0, 0);

    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque RGBA pixel for this color
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Parse `#rrggbb`, `rrggbb` or a basic color name
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let named = match text.to_ascii_lowercase().as_str() {
            "black" => Some(Self::BLACK),
            "white" => Some(Self::WHITE),
            "red" => Some(Self::RED),
            "green" => Some(Self::new(0, 128, 0)),
            "blue" => Some(Self::new(0, 0, 255)),
            "yellow" => Some(Self::new(255, 255, 0)),
            "gray" | "grey" => Some(Self::new(128, 128, 128)),
            _ => None,
        };
        if named.is_some() {
            return named;
        }

        let hex = text.strip_prefix('#').unwrap_or(text);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Channels([u8; 3]),
    Text(String),
}

impl TryFrom<ColorRepr> for Rgb {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Channels([r, g, b]) => Ok(Self::new(r, g, b)),
            ColorRepr::Text(text) => Self::parse(&text).ok_or_else(|| format!("invalid color '{}'", text)),
        }
    }
}
