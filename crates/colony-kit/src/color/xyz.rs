//! CIE XYZ color type

use super::lut::srgb_u8_to_linear;
use super::rgb::RgbColor;

/// A color in CIE 1931 XYZ, relative to a white luminance of 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XyzColor {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl XyzColor {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<RgbColor> for XyzColor {
    /// Gamma-decode each channel and apply the sRGB (D65) primaries matrix.
    #[inline]
    fn from(color: RgbColor) -> Self {
        let r = srgb_u8_to_linear(color.r);
        let g = srgb_u8_to_linear(color.g);
        let b = srgb_u8_to_linear(color.b);

        Self {
            x: 0.4124 * r + 0.3576 * g + 0.1805 * b,
            y: 0.2126 * r + 0.7152 * g + 0.0722 * b,
            z: 0.0193 * r + 0.1192 * g + 0.9505 * b,
        }
    }
}
