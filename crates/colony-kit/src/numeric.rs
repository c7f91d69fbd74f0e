//! Small numeric helpers shared by the color and sampling code.

use crate::error::ConfigurationError;

/// Position of `value` within `lower..=upper`, clamped to 0.0..=1.0.
///
/// An empty range acts as a step at `upper`.
#[inline]
pub fn clamped_interpolation(lower: f64, upper: f64, value: f64) -> f64 {
    if upper <= lower {
        return if value >= upper { 1.0 } else { 0.0 };
    }
    ((value - lower) / (upper - lower)).clamp(0.0, 1.0)
}

/// Arithmetic mean, 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation, 0.0 for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    let variance =
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

pub(crate) fn ensure_unit_range(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigurationError::OutOfUnitRange { name, value })
    }
}
