//! The per-bucket measurement record.

/// Pigmentation statistics for one bucket of columns.
///
/// `x` is the bucket's position across the colony in 0.0..=1.0, `average`
/// and `std_dev` summarize the pigmentation of the colony pixels in the
/// bucket, and `columns` lists the image columns that were sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct PigmentationSample {
    x: f64,
    average: f64,
    std_dev: f64,
    columns: Vec<usize>,
}

impl PigmentationSample {
    pub(crate) fn new(x: f64, average: f64, std_dev: f64, columns: Vec<usize>) -> Self {
        Self {
            x,
            average,
            std_dev,
            columns,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn average(&self) -> f64 {
        self.average
    }

    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    #[inline]
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }
}

/// Expand averages into a flat list of x positions for 1D histograms.
///
/// Each sample contributes its `x` once per full tenth of its average
/// pigmentation, so a sample at 0.35 appears three times and one below 0.1
/// not at all.
pub fn one_dimension_histogram(samples: &[PigmentationSample]) -> Vec<f64> {
    samples
        .iter()
        .flat_map(|sample| {
            let repeats = (sample.average / 0.1).max(0.0) as usize;
            std::iter::repeat(sample.x).take(repeats)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_repeats_by_tenths() {
        let samples = vec![
            PigmentationSample::new(0.0, 0.35, 0.0, vec![0]),
            PigmentationSample::new(0.5, 0.05, 0.0, vec![1]),
            PigmentationSample::new(1.0, 1.0, 0.0, vec![2]),
        ];
        let histogram = one_dimension_histogram(&samples);
        assert_eq!(histogram.iter().filter(|&&x| x == 0.0).count(), 3);
        assert_eq!(histogram.iter().filter(|&&x| x == 0.5).count(), 0);
        assert_eq!(histogram.iter().filter(|&&x| x == 1.0).count(), 10);
    }

    #[test]
    fn test_histogram_empty() {
        assert!(one_dimension_histogram(&[]).is_empty());
    }
}
