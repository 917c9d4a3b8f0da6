//! Hex color parsing and formatting
//!
//! Colors are written as `#RRGGBBAA`: a 32-bit big-endian value with one
//! byte per channel and straight (non-premultiplied) alpha.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when a hex color string cannot be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string is not `#` followed by exactly 8 characters
    #[error("'{0}' is not a #RRGGBBAA color")]
    InvalidFormat(String),

    /// One of the 8 value characters is not a hexadecimal digit
    #[error("'{0}' contains a non-hexadecimal digit")]
    InvalidHexDigit(String),
}

/// RGBA color with 8-bit channels and straight alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Color {
    /// Opaque black, the default foreground
    pub const BLACK: Color = Color::new(0, 0, 0, 255);

    /// Opaque white, the default background
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    /// Create a color from explicit channel values
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Decode a `#RRGGBBAA` string (case-insensitive hex digits).
    ///
    /// Fails with [`ColorParseError::InvalidFormat`] when the input is not a
    /// `#` followed by exactly 8 characters, and with
    /// [`ColorParseError::InvalidHexDigit`] when any of those characters is
    /// not a hex digit.
    pub fn parse(text: &str) -> std::result::Result<Self, ColorParseError> {
        if text.len() != 9 || !text.starts_with('#') {
            return Err(ColorParseError::InvalidFormat(text.to_string()));
        }

        let digits = &text[1..];
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHexDigit(text.to_string()));
        }

        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::InvalidHexDigit(text.to_string()))?;

        Ok(Self {
            r: (value >> 24) as u8,
            g: (value >> 16) as u8,
            b: (value >> 8) as u8,
            a: value as u8,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(c: Color) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

// Configuration files spell colors the same way the CLI does
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        Color::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channels() {
        let color = Color::parse("#11223344").unwrap();
        assert_eq!(color, Color::new(0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            Color::parse("#aabbccdd").unwrap(),
            Color::parse("#AABBCCDD").unwrap()
        );
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(matches!(
            Color::parse("#FFF"),
            Err(ColorParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            Color::parse("#FFFFFFFF0"),
            Err(ColorParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            Color::parse(""),
            Err(ColorParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_missing_prefix() {
        assert!(matches!(
            Color::parse("AABBCCDD0"),
            Err(ColorParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_non_hex_digit() {
        assert!(matches!(
            Color::parse("#GGBBCCDD"),
            Err(ColorParseError::InvalidHexDigit(_))
        ));
        // Multi-byte characters are not hex digits either
        assert!(matches!(
            Color::parse("#ÿÿCCDD"),
            Err(ColorParseError::InvalidHexDigit(_))
        ));
    }

    #[test]
    fn test_format_round_trip() {
        let color = Color::new(0xE2, 0x7D, 0x60, 0xFF);
        assert_eq!(Color::parse(&color.to_string()).unwrap(), color);
    }
}
