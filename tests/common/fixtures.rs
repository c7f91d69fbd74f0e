//! Synthetic plate images and configurations.

use colony_kit::{Coordinate, ImageBuffer, RgbColor, Size};
use colony_pigmentation::models::AnalysisConfig;

/// Default background key of the analysis
pub const PLATE: RgbColor = RgbColor::new(51, 57, 62);

/// Default pigmentation key of the analysis
pub const PIGMENT: RgbColor = RgbColor::new(128, 61, 51);

pub const PALE: RgbColor = RgbColor::new(220, 200, 180);

/// Plate size used by every fixture image
pub const PLATE_SIZE: Size = Size::new(48, 32);

/// Colony occupies columns 12..36 and rows 8..24
pub const COLONY_WIDTH: usize = 24;
pub const COLONY_HEIGHT: usize = 16;

fn mix(from: RgbColor, to: RgbColor, t: f64) -> RgbColor {
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RgbColor::new(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
    )
}

/// A colony that fades from pigment on the left to pale on the right.
pub fn fading_colony() -> ImageBuffer {
    colony(|t| mix(PIGMENT, PALE, t))
}

/// A colony of uniform pigment color.
pub fn solid_colony() -> ImageBuffer {
    colony(|_| PIGMENT)
}

fn colony(color_at: impl Fn(f64) -> RgbColor) -> ImageBuffer {
    let left = 12;
    let top = 8;
    ImageBuffer::from_fn(PLATE_SIZE, |Coordinate { x, y }| {
        let inside = (left..left + COLONY_WIDTH).contains(&x) && (top..top + COLONY_HEIGHT).contains(&y);
        if inside {
            color_at((x - left) as f64 / (COLONY_WIDTH - 1) as f64)
        } else {
            PLATE
        }
    })
}

/// An empty plate: segmentation finds no colony.
pub fn blank_plate() -> ImageBuffer {
    ImageBuffer::filled(PLATE_SIZE, PLATE)
}

/// Small profiles keep the fixtures fast and within the colony width.
pub fn config() -> AnalysisConfig {
    AnalysisConfig {
        sample_count: 8,
        roi_height: 0.5,
        ..Default::default()
    }
}
