//! 8-bit sRGB color type

use std::fmt;
use std::str::FromStr;

use super::lab::LabColor;
use super::xyz::XyzColor;
use crate::error::ParseColorError;

/// A gamma-encoded sRGB color with 8-bit channels.
///
/// This is the pixel type of every [`ImageBuffer`](crate::ImageBuffer) and
/// the format used for user supplied key colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RgbColor {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl RgbColor {
    /// Pure black, used for background pixels in derived images.
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);
    /// Pure white, used for foreground pixels when a mask is drawn.
    pub const WHITE: RgbColor = RgbColor::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A neutral gray with all three channels set to `value`.
    #[inline]
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to CIELAB (D65) through linear RGB and XYZ.
    #[inline]
    pub fn to_lab(self) -> LabColor {
        LabColor::from(XyzColor::from(self))
    }

    /// Uppercase `#RRGGBB` representation.
    pub fn hex_string(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex_string())
    }
}

impl FromStr for RgbColor {
    type Err = ParseColorError;

    /// Parse a six digit hex color, with or without a leading `#`.
    ///
    /// ```
    /// use colony_kit::RgbColor;
    ///
    /// let color: RgbColor = "#803D33".parse().unwrap();
    /// assert_eq!(color, RgbColor::new(128, 61, 51));
    /// assert!("#FFF".parse::<RgbColor>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColorError::InvalidLength(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl From<[u8; 3]> for RgbColor {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_hash() {
        let expected = RgbColor::new(0x33, 0x39, 0x3E);
        assert_eq!("#33393E".parse::<RgbColor>().unwrap(), expected);
        assert_eq!("33393e".parse::<RgbColor>().unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_short_form() {
        assert!(matches!(
            "#FFF".parse::<RgbColor>(),
            Err(ParseColorError::InvalidLength(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_digits() {
        assert!(matches!(
            "#GG0000".parse::<RgbColor>(),
            Err(ParseColorError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_parse_rejects_multibyte_input() {
        assert!("#ÄÄÄÄ".parse::<RgbColor>().is_err());
    }

    #[test]
    fn test_display_is_uppercase_hex() {
        assert_eq!(RgbColor::new(128, 61, 51).to_string(), "#803D33");
        assert_eq!(RgbColor::gray(0).to_string(), "#000000");
    }

    #[test]
    fn test_bytes() {
        let color = RgbColor::from([1, 2, 3]);
        assert_eq!(color.to_bytes(), [1, 2, 3]);
    }
}
