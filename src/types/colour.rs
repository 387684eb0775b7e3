//! Colour type, parsing and HSV conversion.

use std::fmt;
use std::str::FromStr;

use palette::{Hsv, IntoColor, Srgb};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MosaicError, Result};

/// An opaque RGB colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Discord's dark theme message background, which emojis are viewed against.
    pub const DISCORD_DARK: Self = Self::rgb(49, 51, 56);

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RRGGBB` (6 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 => {
                // #RGB -> #RRGGBB
                let mut digits = [0u8; 3];
                for (slot, c) in digits.iter_mut().zip(hex.chars()) {
                    let d = parse_hex_digit(c)?;
                    *slot = d << 4 | d;
                }
                Ok(Self::rgb(digits[0], digits[1], digits[2]))
            }
            6 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Convert to an RGB array.
    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to HSV with every channel scaled to `0..=255`.
    ///
    /// Hue degrees map onto the byte range, so red sits at 0 and the wheel
    /// wraps back to 0 rather than reaching 256.
    pub fn to_hsv_bytes(self) -> [u8; 3] {
        let rgb: Srgb<f32> = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );
        let hsv: Hsv = rgb.into_color();

        let degrees = hsv.hue.into_positive_degrees();
        let hue = ((degrees / 360.0 * 255.0).round() as u32 % 256) as u8;
        let saturation = (hsv.saturation.clamp(0.0, 1.0) * 255.0).round() as u8;
        let value = (hsv.value.clamp(0.0, 1.0) * 255.0).round() as u8;

        [hue, saturation, value]
    }

    /// Blend an RGBA pixel over this colour using its alpha channel.
    pub fn blend_under(self, rgba: [u8; 4]) -> [u8; 3] {
        let alpha = rgba[3] as u32;
        let inverse = 255 - alpha;
        let mix = |fg: u8, bg: u8| ((fg as u32 * alpha + bg as u32 * inverse + 127) / 255) as u8;
        [
            mix(rgba[0], self.r),
            mix(rgba[1], self.g),
            mix(rgba[2], self.b),
        ]
    }
}

impl FromStr for Colour {
    type Err = MosaicError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn invalid_hex(s: &str) -> MosaicError {
    MosaicError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB or #RRGGBB format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| MosaicError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| MosaicError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
