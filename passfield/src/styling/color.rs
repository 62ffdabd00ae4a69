//! RGB colors with CSS parsing.
//!
//! # Example
//!
//! ```
//! use passfield::styling::Color;
//!
//! let focus = Color::hex(0x4059A9);
//! assert_eq!(Color::parse("#4059a9"), Some(focus));
//! assert_eq!(focus.to_hex(), "#4059a9");
//! ```

use std::fmt;
use std::str::FromStr;

use color::{AlphaColor, Srgb};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A color value stored as RGB.
///
/// Serialized as a `#rrggbb` string; any CSS color string is accepted when
/// deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

// Constructors
impl Color {
    /// Create a color from RGB values.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a hex value (0xRRGGBB).
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Parse a CSS color string (`#rgb`, `#rrggbb`, `rgb(...)`, `hsl(...)`,
    /// named colors). Alpha is dropped.
    pub fn parse(s: &str) -> Option<Self> {
        let parsed = color::parse_color(s).ok()?;
        let srgb: AlphaColor<Srgb> = parsed.to_alpha_color();
        let [r, g, b, _] = srgb.components;
        Some(Self {
            r: (r.clamp(0.0, 1.0) * 255.0).round() as u8,
            g: (g.clamp(0.0, 1.0) * 255.0).round() as u8,
            b: (b.clamp(0.0, 1.0) * 255.0).round() as u8,
        })
    }
}

// Accessors
impl Color {
    /// Get the red component.
    pub const fn r(&self) -> u8 {
        self.r
    }

    /// Get the green component.
    pub const fn g(&self) -> u8 {
        self.g
    }

    /// Get the blue component.
    pub const fn b(&self) -> u8 {
        self.b
    }

    /// Convert to RGB tuple.
    pub const fn to_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Format as a lowercase `#rrggbb` string.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_components() {
        let c = Color::hex(0x4059A9);
        assert_eq!(c.to_rgb(), (0x40, 0x59, 0xA9));
    }

    #[test]
    fn test_parse_css_forms() {
        assert_eq!(Color::parse("#4d4d4d"), Some(Color::rgb(77, 77, 77)));
        assert_eq!(Color::parse("rgb(77, 77, 77)"), Some(Color::rgb(77, 77, 77)));
        assert_eq!(Color::parse("white"), Some(Color::rgb(255, 255, 255)));
        assert_eq!(Color::parse("not a color"), None);
    }

    #[test]
    fn test_from_str_error() {
        let err = "bogus".parse::<Color>().unwrap_err();
        assert_eq!(err.to_string(), "invalid color 'bogus'");
    }
}
