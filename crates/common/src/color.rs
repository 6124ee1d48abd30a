use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RGB color with components in [0, 1].
///
/// Stored as plain f32 components so that caching a color and writing it back
/// restores the exact same value. Serialized as a `#rrggbb` hex string in
/// chart files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Errors from parsing a hex color string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected 6 hex digits, got {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Hover highlight tint applied to the picked object.
    pub const HIGHLIGHT: Color = Color {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed 0xRRGGBB value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Pack back into 0xRRGGBB, rounding each component.
    pub fn to_hex(self) -> u32 {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (quantize(self.r) << 16) | (quantize(self.g) << 8) | quantize(self.b)
    }

    /// Parse `#rrggbb`, `0xrrggbb`, or bare `rrggbb`.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .unwrap_or(s);
        if digits.len() != 6 {
            return Err(ColorParseError::BadLength(s.to_string()));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::BadDigit(s.to_string()))?;
        Ok(Self::from_hex(value))
    }

    /// RGBA array for GPU instance data (alpha fixed at 1).
    pub fn to_rgba(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("#{:06x}", self.to_hex()))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        for hex in [0xff0000, 0x00ff00, 0x0000ff, 0xffff00, 0xff00ff, 0x123456] {
            assert_eq!(Color::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn parse_accepts_common_prefixes() {
        let expected = Color::from_hex(0xff0000);
        assert_eq!(Color::parse("#ff0000"), Ok(expected));
        assert_eq!(Color::parse("0xff0000"), Ok(expected));
        assert_eq!(Color::parse("ff0000"), Ok(expected));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            Color::parse("#ff00"),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            Color::parse("#zzzzzz"),
            Err(ColorParseError::BadDigit(_))
        ));
    }

    #[test]
    fn serde_as_hex_string() {
        let json = serde_json::to_string(&Color::from_hex(0x0000ff)).unwrap();
        assert_eq!(json, "\"#0000ff\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::from_hex(0x0000ff));
    }

    #[test]
    fn cached_color_restores_exactly() {
        // The hover round trip depends on bit-exact restore of the cached value.
        let original = Color::from_hex(0x00ff00);
        let cached = original;
        let tinted = Color::HIGHLIGHT;
        assert_ne!(tinted, original);
        assert_eq!(cached, original);
    }
}
