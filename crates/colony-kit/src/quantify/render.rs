//! Pigmentation maps: the colony redrawn with one gray level per pixel.

use super::options::{Baseline, QuantifyOptions};
use super::profile::{area_of_interest, pigmentation, ColumnBuckets};
use crate::buffer::{ImageBuffer, Mask, PixelBuffer};
use crate::color::RgbColor;
use crate::error::Result;

/// Redraw the colony with gray `pigmentation * 255`, background black.
///
/// Only pixels inside the area of interest of `options` are drawn. With a
/// [`Baseline::PerBucket`] each column uses the baseline of the bucket it
/// falls into. When `crop` is set the output is cut down to the area of
/// interest rectangle.
pub fn render_pigmentation(
    image: &ImageBuffer,
    mask: &Mask,
    options: &QuantifyOptions,
    crop: bool,
) -> Result<ImageBuffer> {
    image.ensure_same_size(mask)?;
    options.validate()?;

    let aoi = area_of_interest(mask, options.area_of_interest_height)?;
    let buckets = match &options.baseline {
        Baseline::Flat(_) => None,
        Baseline::PerBucket(_) => {
            let count = options.horizontal_samples.unwrap_or(aoi.rect.width());
            options.baseline.ensure_bucket_count(count)?;
            Some(ColumnBuckets::new(aoi.rect, count)?)
        }
    };

    let key = options.key_color.to_lab();
    let rendered = PixelBuffer::from_fn(image.size(), |point| {
        if !aoi.mask[point].is_foreground() {
            return RgbColor::BLACK;
        }
        let bucket = buckets
            .as_ref()
            .and_then(|b| b.bucket_of(point.x))
            .unwrap_or(0);
        let value = pigmentation(image[point], key, options.baseline.value_for(bucket));
        RgbColor::gray((value * 255.0) as u8)
    });

    if crop {
        rendered.crop(aoi.rect)
    } else {
        Ok(rendered)
    }
}
