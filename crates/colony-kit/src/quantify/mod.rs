//! Pigmentation quantification
//!
//! Turns an image plus its cleaned colony mask into a horizontal profile of
//! [`PigmentationSample`]s:
//!
//! 1. Restrict the mask to a horizontal band around the colony's middle row
//!    ([`area_of_interest`]).
//! 2. Split the band's columns into buckets ([`ColumnBuckets`]).
//! 3. Score every foreground pixel by its similarity to the pigment key
//!    color, rescaled above a baseline ([`pigmentation`]).
//! 4. Report mean and population standard deviation per bucket.

mod options;
mod profile;
mod render;
mod sample;

pub use options::{Baseline, QuantifyOptions};
pub use profile::{area_of_interest, pigmentation, quantify, AreaOfInterest, ColumnBuckets};
pub use render::render_pigmentation;
pub use sample::{one_dimension_histogram, PigmentationSample};
