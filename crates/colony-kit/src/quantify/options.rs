//! Quantification options.

use crate::color::RgbColor;
use crate::error::{ConfigurationError, Result};
use crate::numeric::ensure_unit_range;

/// Similarity floor below which a pixel counts as unpigmented.
///
/// A flat baseline applies one value to every bucket. A per-bucket baseline
/// carries one value per sampled bucket, typically the averaged profile of
/// a reference colony, and its length must match the bucket count.
#[derive(Debug, Clone, PartialEq)]
pub enum Baseline {
    Flat(f64),
    PerBucket(Vec<f64>),
}

impl Default for Baseline {
    fn default() -> Self {
        Baseline::Flat(0.0)
    }
}

impl Baseline {
    /// Baseline applied to bucket `k`.
    #[inline]
    pub fn value_for(&self, bucket: usize) -> f64 {
        match self {
            Baseline::Flat(value) => *value,
            Baseline::PerBucket(values) => values.get(bucket).copied().unwrap_or(0.0),
        }
    }

    pub(crate) fn ensure_bucket_count(&self, buckets: usize) -> Result<(), ConfigurationError> {
        match self {
            Baseline::PerBucket(values) if values.len() != buckets => {
                Err(ConfigurationError::BaselineLength {
                    expected: buckets,
                    actual: values.len(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl From<f64> for Baseline {
    fn from(value: f64) -> Self {
        Baseline::Flat(value)
    }
}

/// Configuration for [`quantify`](super::quantify) and
/// [`render_pigmentation`](super::render_pigmentation).
///
/// # Defaults
///
/// - Key color: `#803D33`, a reddish brown pigment
/// - Baseline: flat 0.0
/// - Area of interest: the full colony height (1.0)
/// - Horizontal samples: one bucket per column
///
/// # Example
///
/// ```
/// use colony_kit::{Baseline, QuantifyOptions};
///
/// let options = QuantifyOptions::new()
///     .baseline(0.436)
///     .area_of_interest_height(0.2)
///     .horizontal_samples(200);
///
/// assert_eq!(options.baseline, Baseline::Flat(0.436));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuantifyOptions {
    /// The pigment color to measure similarity against.
    pub key_color: RgbColor,
    pub baseline: Baseline,
    /// Height of the horizontal band, as a fraction of the colony height,
    /// centered on the colony's middle row.
    pub area_of_interest_height: f64,
    /// Number of column buckets; `None` uses one bucket per column.
    pub horizontal_samples: Option<usize>,
}

impl Default for QuantifyOptions {
    fn default() -> Self {
        Self {
            key_color: RgbColor::new(128, 61, 51),
            baseline: Baseline::default(),
            area_of_interest_height: 1.0,
            horizontal_samples: None,
        }
    }
}

impl QuantifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn key_color(mut self, color: RgbColor) -> Self {
        self.key_color = color;
        self
    }

    #[inline]
    pub fn baseline(mut self, baseline: impl Into<Baseline>) -> Self {
        self.baseline = baseline.into();
        self
    }

    #[inline]
    pub fn area_of_interest_height(mut self, fraction: f64) -> Self {
        self.area_of_interest_height = fraction;
        self
    }

    #[inline]
    pub fn horizontal_samples(mut self, samples: usize) -> Self {
        self.horizontal_samples = Some(samples);
        self
    }

    /// Check everything that can be checked without looking at the mask.
    pub fn validate(&self) -> Result<()> {
        ensure_unit_range("area of interest height", self.area_of_interest_height)?;
        match &self.baseline {
            Baseline::Flat(value) => ensure_unit_range("baseline pigmentation", *value)?,
            Baseline::PerBucket(values) => {
                for value in values {
                    ensure_unit_range("baseline pigmentation", *value)?;
                }
            }
        }
        if let Some(samples) = self.horizontal_samples {
            if samples == 0 {
                return Err(ConfigurationError::ZeroSamples.into());
            }
            self.baseline.ensure_bucket_count(samples)?;
        }
        Ok(())
    }
}
