//! colony-kit: chroma-key colony segmentation and pigmentation profiling
//!
//! This library turns a photograph of a colony on a uniform background into
//! a left-to-right pigmentation profile. It performs no I/O: images come in
//! as [`ImageBuffer`]s and profiles go out as [`PigmentationSample`]s or
//! their text form ([`series`]).
//!
//! # Quick Start
//!
//! ```
//! use colony_kit::{mask_colony, quantify, CleanupOptions, ImageBuffer, QuantifyOptions, RgbColor, Size};
//!
//! let background = RgbColor::new(51, 57, 62);
//! let pigment = RgbColor::new(128, 61, 51);
//!
//! // a 20x10 photo with a pigmented square in the middle
//! let image = ImageBuffer::from_fn(Size::new(20, 10), |p| {
//!     if (5..15).contains(&p.x) && (2..8).contains(&p.y) { pigment } else { background }
//! });
//!
//! let (mask, _report) = mask_colony(&image, background, 0.15, &CleanupOptions::default()).unwrap();
//! let options = QuantifyOptions::new().key_color(pigment).horizontal_samples(5);
//! let profile = quantify(&image, &mask, &options).unwrap();
//!
//! assert_eq!(profile.len(), 5);
//! assert_eq!(profile[0].x(), 0.0);
//! assert_eq!(profile[4].x(), 1.0);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! ImageBuffer (8-bit sRGB)
//!     |
//!     v
//! segment()               pixel -> Lab, foreground if far from the background key
//!     |
//!     v
//! clean()                 fill holes < 20% of the image, drop specks < 2%
//!     |
//!     v
//! quantify()              band around the middle row, column buckets,
//!     |                   similarity to the pigment key above a baseline
//!     v
//! Vec<PigmentationSample> one (x, mean, stddev, columns) per bucket
//!     |
//!     v
//! average()               bucket-wise mean across colonies
//! ```
//!
//! # Color Science
//!
//! All comparisons happen in CIELAB (D65). Before measuring a distance the
//! three components are mapped onto 0..=1 (L over 0..100, a and b over
//! -100..100) so that lightness and chroma weigh equally. The distance is
//! then divided by the reference color's distance to neutral gray plus a
//! half-unit margin, which yields a value in 0..=1 for any pair of colors.
//!
//! The reference differs between the two uses:
//!
//! | Stage | Receiver | Argument |
//! |-------|----------|----------|
//! | Segmentation | pixel | background key |
//! | Pigmentation | pigment key | pixel |
//!
//! Since the scale depends on the receiver the two orders are not
//! interchangeable; see [`LabColor::normalized_distance`].

pub mod aggregate;
pub mod buffer;
pub mod cleanup;
pub mod color;
pub mod error;
pub mod numeric;
pub mod quantify;
pub mod segment;
pub mod series;


pub use aggregate::average;
pub use buffer::{
    Coordinate, ImageBuffer, Mask, MaskBit, Pixel, PixelBuffer, Rect, Size, SquareMillimeters,
    SquarePixels,
};
pub use cleanup::{clean, CleanupOptions, CleanupReport, PassReport};
pub use color::{LabColor, RgbColor, XyzColor};
pub use error::{AggregationError, ConfigurationError, Error, FormatError, ParseColorError, Result};
pub use quantify::{
    area_of_interest, one_dimension_histogram, pigmentation, quantify, render_pigmentation,
    AreaOfInterest, Baseline, ColumnBuckets, PigmentationSample, QuantifyOptions,
};
pub use segment::{mask_colony, remove_background, segment};
