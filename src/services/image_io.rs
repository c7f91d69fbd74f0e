//! Raster codec adapter between image files and [`colony_kit`] buffers.

use std::path::Path;

use colony_kit::{ImageBuffer, Pixel, PixelBuffer, Size};
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageReader};

use crate::error::PipelineError;

/// Decode `path` to 8-bit RGB, scaled by `downscale_factor`.
///
/// The format is guessed from the file contents, falling back to the
/// extension. A factor of 1.0 keeps the original resolution.
pub fn load(path: &Path, downscale_factor: f64) -> Result<ImageBuffer, PipelineError> {
    let io_error = |source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    };

    let decoded = ImageReader::open(path)
        .map_err(io_error)?
        .with_guessed_format()
        .map_err(io_error)?
        .decode()?;

    let mut rgb = decoded.to_rgb8();
    if downscale_factor < 1.0 {
        let width = scaled(rgb.width(), downscale_factor);
        let height = scaled(rgb.height(), downscale_factor);
        rgb = imageops::resize(&rgb, width, height, FilterType::Triangle);
    }

    let size = Size::new(rgb.width() as usize, rgb.height() as usize);
    Ok(ImageBuffer::from_rgb_bytes(size, rgb.as_raw())?)
}

fn scaled(dimension: u32, factor: f64) -> u32 {
    ((dimension as f64 * factor).round() as u32).max(1)
}

/// Encode any buffer as RGB; the format follows the file extension.
///
/// Masks come out white on black.
pub fn save<E: Pixel>(buffer: &PixelBuffer<E>, path: &Path) -> Result<(), PipelineError> {
    image::save_buffer(
        path,
        &buffer.to_rgb_bytes(),
        buffer.width() as u32,
        buffer.height() as u32,
        ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_kit::{Coordinate, MaskBit, RgbColor};
    use tempfile::TempDir;

    fn checker(size: Size) -> ImageBuffer {
        ImageBuffer::from_fn(size, |p| {
            if (p.x + p.y) % 2 == 0 {
                RgbColor::new(200, 10, 10)
            } else {
                RgbColor::new(10, 10, 200)
            }
        })
    }

    #[test]
    fn test_png_round_trip_is_lossless() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("checker.png");
        let image = checker(Size::new(6, 4));

        save(&image, &path).unwrap();
        let loaded = load(&path, 1.0).unwrap();

        assert_eq!(loaded, image);
    }

    #[test]
    fn test_downscale_halves_dimensions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("checker.png");
        save(&checker(Size::new(10, 6)), &path).unwrap();

        let loaded = load(&path, 0.5).unwrap();
        assert_eq!(loaded.size(), Size::new(5, 3));
    }

    #[test]
    fn test_downscale_never_reaches_zero() {
        assert_eq!(scaled(3, 0.01), 1);
        assert_eq!(scaled(200, 0.25), 50);
    }

    #[test]
    fn test_mask_saved_white_on_black() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mask.png");
        let mask = PixelBuffer::from_fn(Size::new(2, 1), |p| {
            if p.x == 0 {
                MaskBit::Foreground
            } else {
                MaskBit::Background
            }
        });

        save(&mask, &path).unwrap();
        let loaded = load(&path, 1.0).unwrap();

        assert_eq!(loaded[Coordinate::new(0, 0)], RgbColor::WHITE);
        assert_eq!(loaded[Coordinate::new(1, 0)], RgbColor::BLACK);
    }

    #[test]
    fn test_corrupt_file_is_resource_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(load(&path, 1.0), Err(PipelineError::Resource(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.png");

        assert!(matches!(load(&path, 1.0), Err(PipelineError::Io { .. })));
    }
}
