//! Error types for colony analysis
//!
//! Every fallible operation returns [`Result`], whose error type groups the
//! failure into one of a few categories so callers can decide whether to
//! abort the batch or only skip one image.

use std::num::ParseIntError;

use thiserror::Error;

use crate::buffer::{Rect, Size};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("image is {image} but mask is {mask}")]
    GeometryMismatch { image: Size, mask: Size },

    #[error("buffer holds {actual} pixels but {size} needs {expected}")]
    BufferLength {
        size: Size,
        expected: usize,
        actual: usize,
    },

    #[error("rect {rect} is outside of {bounds}")]
    OutOfBounds { rect: Rect, bounds: Rect },

    #[error("degenerate input: {reason}")]
    DegenerateInput { reason: String },

    #[error("malformed sample series: {0}")]
    Format(#[from] FormatError),

    #[error("cannot aggregate sample series: {0}")]
    Aggregation(#[from] AggregationError),
}

impl Error {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Error::DegenerateInput {
            reason: reason.into(),
        }
    }
}

/// A parameter outside of its documented range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{name} must be within 0..=1, got {value}")]
    OutOfUnitRange { name: &'static str, value: f64 },

    #[error("horizontal sample count must be at least 1")]
    ZeroSamples,

    #[error("{requested} horizontal samples requested but the area of interest is only {available} columns wide")]
    TooManySamples { requested: usize, available: usize },

    #[error("baseline series has {actual} values but {expected} buckets are sampled")]
    BaselineLength { expected: usize, actual: usize },
}

/// A sample series file that does not follow the CSV layout.
///
/// Row indices count data rows from 0; the header is not counted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("expected a header and at least one data row, found {0} rows")]
    RowCount(usize),

    #[error("invalid header {found:?}, expected {expected:?}")]
    Header {
        found: String,
        expected: &'static str,
    },

    #[error("row {row} does not have four fields: {content:?}")]
    Row { row: usize, content: String },

    #[error("invalid value {value:?} in row {row}: {content:?}")]
    Value {
        row: usize,
        content: String,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    #[error("no sample series given")]
    Empty,

    #[error("series {index} has {actual} samples, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    #[error("invalid hex color {0:?}, expected six hex digits")]
    InvalidLength(String),

    #[error("invalid hex digit: {0}")]
    InvalidHex(#[from] ParseIntError),
}
