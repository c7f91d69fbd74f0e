//! Averaging profiles from several colonies.

use tracing::debug;

use crate::error::{AggregationError, Result};
use crate::numeric::{mean, std_dev};
use crate::quantify::PigmentationSample;

/// Combine equally long profiles into one.
///
/// For each bucket index the result keeps the first series' `x` and
/// columns, averages the per-series averages, and reports the population
/// standard deviation of those averages. Equal averages are passed through
/// unchanged with a deviation of exactly zero.
pub fn average(series: &[Vec<PigmentationSample>]) -> Result<Vec<PigmentationSample>> {
    let first = series.first().ok_or(AggregationError::Empty)?;
    let expected = first.len();

    for (index, samples) in series.iter().enumerate() {
        if samples.len() != expected {
            return Err(AggregationError::LengthMismatch {
                index,
                expected,
                actual: samples.len(),
            }
            .into());
        }
    }

    let mut averages = Vec::with_capacity(series.len());
    let combined = (0..expected)
        .map(|bucket| {
            averages.clear();
            averages.extend(series.iter().map(|s| s[bucket].average()));
            let (value, spread) = spread_of(&averages);
            let head = &first[bucket];
            PigmentationSample::new(head.x(), value, spread, head.columns().to_vec())
        })
        .collect();

    debug!(series = series.len(), buckets = expected, "averaged profiles");
    Ok(combined)
}

/// Mean and population deviation, exact when every value is the same.
fn spread_of(values: &[f64]) -> (f64, f64) {
    match values.split_first() {
        Some((&head, rest)) if rest.iter().all(|&v| v == head) => (head, 0.0),
        _ => (mean(values), std_dev(values)),
    }
}
