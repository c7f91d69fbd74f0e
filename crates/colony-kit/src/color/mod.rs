//! Color types and conversion utilities
//!
//! Pixels arrive as 8-bit sRGB ([`RgbColor`]) and all comparisons happen in
//! CIELAB ([`LabColor`]) under the D65 white point. [`XyzColor`] is the
//! intermediate step between the two.
//!
//! # Example
//!
//! ```
//! use colony_kit::{LabColor, RgbColor};
//!
//! let background: RgbColor = "#333945".parse().unwrap();
//! let pixel = RgbColor::new(200, 180, 160);
//!
//! let distance = pixel.to_lab().normalized_distance(background.to_lab(), false);
//! assert!(distance > 0.15);
//! ```

mod lab;
mod lut;
mod rgb;
mod xyz;

pub use lab::{LabColor, D65_WHITE};
pub use rgb::RgbColor;
pub use xyz::XyzColor;
