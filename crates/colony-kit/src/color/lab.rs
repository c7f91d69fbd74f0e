//! CIELAB color type and the normalized distance used for every comparison
//!
//! Raw Lab components live on very different scales (L in 0..100, a and b
//! roughly in -100..100). Before measuring a distance each component is
//! mapped onto 0.0..=1.0 so the three axes weigh equally, and the result is
//! divided by the distance from the reference color to neutral gray plus a
//! half-unit margin. That keeps distances comparable regardless of whether
//! the reference sits near the middle or the edge of the gamut.

use super::xyz::XyzColor;
use crate::numeric::clamped_interpolation;

/// Reference white used for the XYZ to Lab conversion.
pub const D65_WHITE: XyzColor = XyzColor::new(0.95047, 1.0, 1.08883);

const EPSILON: f64 = 0.008856;
const LINEAR_SLOPE: f64 = 7.787036;
const LINEAR_OFFSET: f64 = 4.0 / 29.0;

const SPHERE_RADIUS: f64 = 0.5;

/// A color in CIELAB under the D65 white point.
///
/// - `l`: lightness, clamped to 0.0..=100.0
/// - `a`: green (negative) to red (positive)
/// - `b`: blue (negative) to yellow (positive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabColor {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl LabColor {
    /// The center of the normalized Lab cube.
    pub const NEUTRAL_GRAY: LabColor = LabColor::new(50.0, 0.0, 0.0);

    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Components mapped onto 0.0..=1.0: L over 0..100, a and b over -100..100.
    #[inline]
    pub fn normalized_components(self) -> [f64; 3] {
        [
            clamped_interpolation(0.0, 100.0, self.l),
            clamped_interpolation(-100.0, 100.0, self.a),
            clamped_interpolation(-100.0, 100.0, self.b),
        ]
    }

    /// Euclidean distance between the normalized components.
    ///
    /// With `ignoring_lightness` only the a and b axes contribute.
    pub fn distance(self, other: LabColor, ignoring_lightness: bool) -> f64 {
        let [l1, a1, b1] = self.normalized_components();
        let [l2, a2, b2] = other.normalized_components();
        let dl = if ignoring_lightness { 0.0 } else { l1 - l2 };
        (dl * dl + (a1 - a2) * (a1 - a2) + (b1 - b2) * (b1 - b2)).sqrt()
    }

    /// Distance to `other` scaled into 0.0..=1.0 relative to this color.
    ///
    /// The scale is this color's distance to [`NEUTRAL_GRAY`](Self::NEUTRAL_GRAY)
    /// plus 0.5; anything farther away clamps to 1.0. Because the scale
    /// depends on the receiver, `a.normalized_distance(b)` and
    /// `b.normalized_distance(a)` generally differ.
    pub fn normalized_distance(self, other: LabColor, ignoring_lightness: bool) -> f64 {
        let max_distance = self.distance(Self::NEUTRAL_GRAY, ignoring_lightness) + SPHERE_RADIUS;
        clamped_interpolation(0.0, max_distance, self.distance(other, ignoring_lightness))
    }
}

#[inline]
fn pivot(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        LINEAR_SLOPE * t + LINEAR_OFFSET
    }
}

impl From<XyzColor> for LabColor {
    #[inline]
    fn from(xyz: XyzColor) -> Self {
        let fx = pivot(xyz.x / D65_WHITE.x);
        let fy = pivot(xyz.y / D65_WHITE.y);
        let fz = pivot(xyz.z / D65_WHITE.z);

        Self {
            l: (116.0 * fy - 16.0).clamp(0.0, 100.0),
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RgbColor;

    /// Our matrix and knee constants are rounded, palette uses exact ones
    const PALETTE_TOLERANCE: f64 = 0.5;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_black_and_white_lightness() {
        let black = RgbColor::BLACK.to_lab();
        let white = RgbColor::WHITE.to_lab();
        assert_eq!(black.l, 0.0);
        assert!(approx_eq(white.l, 100.0, 1e-6));
        assert!(approx_eq(white.a, 0.0, 0.1));
        assert!(approx_eq(white.b, 0.0, 0.1));
    }

    #[test]
    fn test_lab_matches_palette_crate() {
        use palette::white_point::D65;
        use palette::{IntoColor, Lab, Srgb};

        let test_colors = [
            (255u8, 0u8, 0u8),
            (0, 255, 0),
            (0, 0, 255),
            (128, 61, 51),
            (51, 57, 62),
            (200, 180, 160),
        ];

        for (r, g, b) in test_colors {
            let ours = RgbColor::new(r, g, b).to_lab();
            let theirs: Lab<D65, f64> = Srgb::new(r, g, b)
                .into_format::<f64>()
                .into_linear()
                .into_color();

            assert!(
                approx_eq(ours.l, theirs.l, PALETTE_TOLERANCE),
                "L mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                ours.l,
                theirs.l
            );
            assert!(
                approx_eq(ours.a, theirs.a, PALETTE_TOLERANCE),
                "a mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                ours.a,
                theirs.a
            );
            assert!(
                approx_eq(ours.b, theirs.b, PALETTE_TOLERANCE),
                "b mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                ours.b,
                theirs.b
            );
        }
    }

    #[test]
    fn test_normalized_components_clamp() {
        let extreme = LabColor::new(120.0, 150.0, -150.0);
        assert_eq!(extreme.normalized_components(), [1.0, 1.0, 0.0]);
        assert_eq!(LabColor::NEUTRAL_GRAY.normalized_components(), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_identical_colors_have_zero_distance() {
        let color = RgbColor::new(128, 61, 51).to_lab();
        assert_eq!(color.distance(color, false), 0.0);
        assert_eq!(color.normalized_distance(color, false), 0.0);
    }

    #[test]
    fn test_black_to_white_is_maximal() {
        let black = RgbColor::BLACK.to_lab();
        let white = RgbColor::WHITE.to_lab();
        assert!(approx_eq(black.normalized_distance(white, false), 1.0, 1e-3));
    }

    #[test]
    fn test_ignoring_lightness_drops_l_axis() {
        let dark = LabColor::new(10.0, 20.0, 20.0);
        let light = LabColor::new(90.0, 20.0, 20.0);
        assert_eq!(dark.distance(light, true), 0.0);
        assert!(dark.distance(light, false) > 0.7);
    }

    #[test]
    fn test_normalized_distance_is_receiver_relative() {
        let gray = LabColor::NEUTRAL_GRAY;
        let red = LabColor::new(50.0, 80.0, 0.0);
        // gray scales by 0.5, red by 0.4 + 0.5
        assert!(approx_eq(gray.normalized_distance(red, false), 0.8, 1e-9));
        assert!(approx_eq(red.normalized_distance(gray, false), 0.4 / 0.9, 1e-9));
    }

    #[test]
    fn test_normalized_distance_within_unit_range() {
        let colors = [
            RgbColor::BLACK,
            RgbColor::WHITE,
            RgbColor::new(255, 0, 0),
            RgbColor::new(0, 0, 255),
            RgbColor::new(51, 57, 62),
        ];
        for a in colors {
            for b in colors {
                let d = a.to_lab().normalized_distance(b.to_lab(), false);
                assert!((0.0..=1.0).contains(&d), "{a} -> {b} gave {d}");
            }
        }
    }
}
