//! Horizontal pigmentation profile.

use std::ops::Range;

use tracing::{debug, warn};

use super::options::QuantifyOptions;
use super::sample::PigmentationSample;
use crate::buffer::{Coordinate, ImageBuffer, Mask, Rect, Size};
use crate::color::{LabColor, RgbColor};
use crate::error::{ConfigurationError, Error, Result};
use crate::numeric::{clamped_interpolation, ensure_unit_range, mean, std_dev};

/// The horizontal band of the colony that gets sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaOfInterest {
    /// Bounding rectangle of the foreground left inside the band.
    pub rect: Rect,
    /// The input mask with everything outside the band cleared.
    pub mask: Mask,
}

/// Restrict `mask` to a band of `height_fraction` times the colony height,
/// centered on the colony's middle row.
///
/// Fails with [`Error::DegenerateInput`] when the mask is empty or nothing
/// remains inside the band.
pub fn area_of_interest(mask: &Mask, height_fraction: f64) -> Result<AreaOfInterest> {
    ensure_unit_range("area of interest height", height_fraction)?;

    let colony = mask
        .bounding_rect()
        .ok_or_else(|| Error::degenerate("mask has no foreground pixels"))?;

    let band_height = (height_fraction * colony.height() as f64) as usize;
    let band = Rect::new(
        Coordinate::new(colony.min_x(), colony.mid_y() - band_height / 2),
        Size::new(colony.width(), band_height),
    );

    let mut restricted = mask.clone();
    restricted.clear_outside(band);
    let rect = restricted.bounding_rect().ok_or_else(|| {
        Error::degenerate(format!(
            "no foreground pixels inside the area of interest {band} of colony {colony}"
        ))
    })?;

    Ok(AreaOfInterest {
        rect,
        mask: restricted,
    })
}

/// Partition of a rectangle's columns into contiguous, non-empty buckets.
///
/// Bucket `k` of `n` over a span of width `w` starting at `min_x` covers
/// the half-open column range `min_x + k*w/n .. min_x + (k+1)*w/n` in
/// integer arithmetic, so every column lands in exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnBuckets {
    min_x: usize,
    width: usize,
    count: usize,
}

impl ColumnBuckets {
    pub fn new(span: Rect, count: usize) -> Result<Self, ConfigurationError> {
        if count == 0 {
            return Err(ConfigurationError::ZeroSamples);
        }
        if count > span.width() {
            return Err(ConfigurationError::TooManySamples {
                requested: count,
                available: span.width(),
            });
        }
        Ok(Self {
            min_x: span.min_x(),
            width: span.width(),
            count,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    fn start(&self, bucket: usize) -> usize {
        self.min_x + bucket * self.width / self.count
    }

    /// Image columns of bucket `k`.
    #[inline]
    pub fn columns(&self, bucket: usize) -> Range<usize> {
        self.start(bucket)..self.start(bucket + 1)
    }

    /// Bucket that contains image column `column`.
    pub fn bucket_of(&self, column: usize) -> Option<usize> {
        let offset = column.checked_sub(self.min_x)?;
        if offset >= self.width {
            return None;
        }
        Some(((offset + 1) * self.count - 1) / self.width)
    }

    /// Normalized position of bucket `k`, 0.0 for a single bucket.
    #[inline]
    pub fn position(&self, bucket: usize) -> f64 {
        if self.count == 1 {
            0.0
        } else {
            bucket as f64 / (self.count - 1) as f64
        }
    }
}

/// Pigmentation of one pixel relative to the key color.
///
/// Similarity is `1 - d` where `d` is the key's normalized distance to the
/// pixel; the result is that similarity's position within `baseline..=1`.
#[inline]
pub fn pigmentation(pixel: RgbColor, key: LabColor, baseline: f64) -> f64 {
    let similarity = 1.0 - key.normalized_distance(pixel.to_lab(), false);
    clamped_interpolation(baseline, 1.0, similarity)
}

/// Measure the horizontal pigmentation profile of the colony in `mask`.
///
/// The mask is first restricted to the area of interest, then its columns
/// are split into buckets and every foreground pixel of a bucket
/// contributes its [`pigmentation`] to that bucket's mean and standard
/// deviation. Buckets without colony pixels report zero for both.
///
/// ```
/// use colony_kit::{quantify, Mask, MaskBit, QuantifyOptions, RgbColor, ImageBuffer, Size};
///
/// let key = RgbColor::new(128, 61, 51);
/// let image = ImageBuffer::filled(Size::new(8, 4), key);
/// let mask = Mask::filled(Size::new(8, 4), MaskBit::Foreground);
///
/// let samples = quantify(&image, &mask, &QuantifyOptions::new().horizontal_samples(4)).unwrap();
/// assert_eq!(samples.len(), 4);
/// assert!(samples.iter().all(|s| s.average() == 1.0));
/// ```
pub fn quantify(
    image: &ImageBuffer,
    mask: &Mask,
    options: &QuantifyOptions,
) -> Result<Vec<PigmentationSample>> {
    image.ensure_same_size(mask)?;
    options.validate()?;

    let aoi = area_of_interest(mask, options.area_of_interest_height)?;
    let count = options.horizontal_samples.unwrap_or(aoi.rect.width());
    let buckets = ColumnBuckets::new(aoi.rect, count)?;
    options.baseline.ensure_bucket_count(count)?;

    let key = options.key_color.to_lab();
    let mut samples = Vec::with_capacity(count);
    let mut values = Vec::new();

    for bucket in 0..count {
        let columns = buckets.columns(bucket);
        let baseline = options.baseline.value_for(bucket);
        values.clear();

        for y in aoi.rect.min_y()..aoi.rect.max_y() {
            for x in columns.clone() {
                let point = Coordinate::new(x, y);
                if aoi.mask[point].is_foreground() {
                    values.push(pigmentation(image[point], key, baseline));
                }
            }
        }

        if values.is_empty() {
            warn!(bucket, columns = ?columns, "bucket has no colony pixels");
        }

        samples.push(PigmentationSample::new(
            buckets.position(bucket),
            mean(&values),
            std_dev(&values),
            columns.collect(),
        ));
    }

    debug!(
        area_of_interest = %aoi.rect,
        buckets = count,
        "quantified pigmentation"
    );
    Ok(samples)
}
