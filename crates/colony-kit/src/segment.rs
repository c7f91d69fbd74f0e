//! Chroma-key segmentation
//!
//! A pixel belongs to the colony when its normalized Lab distance from the
//! background key color exceeds a threshold. Every pixel is independent, so
//! the work is split into row-sized chunks and handed to rayon.

use rayon::prelude::*;
use tracing::debug;

use crate::buffer::{ImageBuffer, Mask, MaskBit, PixelBuffer};
use crate::cleanup::{clean, CleanupOptions, CleanupReport};
use crate::color::RgbColor;
use crate::error::Result;
use crate::numeric::ensure_unit_range;

/// Classify every pixel of `image` as foreground or background.
///
/// `threshold` must be within 0.0..=1.0. Pixels whose distance from
/// `key_color` is strictly greater than the threshold become foreground.
///
/// ```
/// use colony_kit::{segment, ImageBuffer, RgbColor, Size};
///
/// let image = ImageBuffer::filled(Size::new(4, 4), RgbColor::new(51, 57, 62));
/// let mask = segment(&image, RgbColor::new(51, 57, 62), 0.15).unwrap();
/// assert_eq!(mask.foreground_count(), 0);
/// ```
pub fn segment(image: &ImageBuffer, key_color: RgbColor, threshold: f64) -> Result<Mask> {
    ensure_unit_range("background threshold", threshold)?;

    let key = key_color.to_lab();
    let chunk = image.width().max(1);
    let mut bits = vec![MaskBit::Background; image.len()];

    bits.par_chunks_mut(chunk)
        .zip(image.pixels().par_chunks(chunk))
        .for_each(|(row, pixels)| {
            for (bit, pixel) in row.iter_mut().zip(pixels) {
                if pixel.to_lab().normalized_distance(key, false) > threshold {
                    *bit = MaskBit::Foreground;
                }
            }
        });

    let mask = PixelBuffer::from_pixels(image.size(), bits)?;
    debug!(
        size = %mask.size(),
        foreground = mask.foreground_count(),
        threshold,
        "segmented image"
    );
    Ok(mask)
}

/// Copy of `image` where masked-out pixels are black.
pub fn remove_background(image: &ImageBuffer, mask: &Mask) -> Result<ImageBuffer> {
    image.ensure_same_size(mask)?;
    let pixels = image
        .pixels()
        .iter()
        .zip(mask.pixels())
        .map(|(&pixel, bit)| {
            if bit.is_foreground() {
                pixel
            } else {
                RgbColor::BLACK
            }
        })
        .collect();
    PixelBuffer::from_pixels(image.size(), pixels)
}

/// Segment `image` and clean the resulting mask in one step.
pub fn mask_colony(
    image: &ImageBuffer,
    key_color: RgbColor,
    threshold: f64,
    cleanup: &CleanupOptions,
) -> Result<(Mask, CleanupReport)> {
    cleanup.validate()?;
    let mut mask = segment(image, key_color, threshold)?;
    let report = clean(&mut mask, cleanup)?;
    Ok((mask, report))
}
