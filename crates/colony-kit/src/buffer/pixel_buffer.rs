//! Row-major pixel storage shared by images and masks.

use std::ops::{Index, IndexMut};

use super::geometry::{Coordinate, Rect, Size};
use crate::color::RgbColor;
use crate::error::{Error, Result};

/// Anything that can be stored in a [`PixelBuffer`] and drawn as a color.
pub trait Pixel: Copy + Send + Sync {
    fn to_rgb(self) -> RgbColor;
}

impl Pixel for RgbColor {
    #[inline]
    fn to_rgb(self) -> RgbColor {
        self
    }
}

/// A rectangular grid of pixels stored row-major.
///
/// The pixel count always equals `width * height`; constructors reject
/// anything else and mutation never changes the length.
///
/// # Example
///
/// ```
/// use colony_kit::{Coordinate, ImageBuffer, RgbColor, Size};
///
/// let mut image = ImageBuffer::filled(Size::new(3, 2), RgbColor::BLACK);
/// image[Coordinate::new(2, 1)] = RgbColor::WHITE;
///
/// assert_eq!(image.pixels()[5], RgbColor::WHITE);
/// assert_eq!(image.index_of(Coordinate::new(2, 1)), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer<E> {
    size: Size,
    pixels: Vec<E>,
}

/// Color pixels as loaded from an image file.
pub type ImageBuffer = PixelBuffer<RgbColor>;

impl<E: Pixel> PixelBuffer<E> {
    /// Buffer of `size` with every pixel set to `value`.
    pub fn filled(size: Size, value: E) -> Self {
        Self {
            size,
            pixels: vec![value; size.area()],
        }
    }

    /// Wrap existing row-major pixels.
    pub fn from_pixels(size: Size, pixels: Vec<E>) -> Result<Self> {
        if pixels.len() != size.area() {
            return Err(Error::BufferLength {
                size,
                expected: size.area(),
                actual: pixels.len(),
            });
        }
        Ok(Self { size, pixels })
    }

    /// Build a buffer by evaluating `f` at every coordinate in row-major order.
    pub fn from_fn(size: Size, mut f: impl FnMut(Coordinate) -> E) -> Self {
        let mut pixels = Vec::with_capacity(size.area());
        for y in 0..size.height {
            for x in 0..size.width {
                pixels.push(f(Coordinate::new(x, y)));
            }
        }
        Self { size, pixels }
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The full extent of the buffer as a rectangle at the origin.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn pixels(&self) -> &[E] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [E] {
        &mut self.pixels
    }

    /// Row-major index of `point`.
    ///
    /// # Panics
    /// Panics if `point` lies outside the buffer.
    #[inline]
    pub fn index_of(&self, point: Coordinate) -> usize {
        assert!(
            self.bounds().contains(point),
            "{point} outside of {}",
            self.size
        );
        point.y * self.size.width + point.x
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn coordinate_of(&self, index: usize) -> Coordinate {
        Coordinate::new(index % self.size.width, index / self.size.width)
    }

    #[inline]
    pub fn get(&self, point: Coordinate) -> Option<E> {
        if self.bounds().contains(point) {
            Some(self.pixels[self.index_of(point)])
        } else {
            None
        }
    }

    /// Apply `f` to every pixel, keeping the geometry.
    pub fn map<T: Pixel>(&self, f: impl Fn(E) -> T) -> PixelBuffer<T> {
        PixelBuffer {
            size: self.size,
            pixels: self.pixels.iter().map(|&p| f(p)).collect(),
        }
    }

    /// Fail with [`Error::GeometryMismatch`] unless both buffers have the same size.
    ///
    /// `self` is reported as the image and `other` as the mask.
    pub fn ensure_same_size<T>(&self, other: &PixelBuffer<T>) -> Result<()> {
        if self.size != other.size {
            return Err(Error::GeometryMismatch {
                image: self.size,
                mask: other.size,
            });
        }
        Ok(())
    }

    /// Copy out the pixels inside `rect`.
    pub fn crop(&self, rect: Rect) -> Result<Self> {
        if !self.bounds().contains_rect(&rect) {
            return Err(Error::OutOfBounds {
                rect,
                bounds: self.bounds(),
            });
        }
        let mut pixels = Vec::with_capacity(rect.size.area());
        for y in rect.min_y()..rect.max_y() {
            let start = y * self.size.width + rect.min_x();
            pixels.extend_from_slice(&self.pixels[start..start + rect.width()]);
        }
        Ok(Self {
            size: rect.size,
            pixels,
        })
    }

    /// Flat `[R, G, B, R, G, B, ...]` bytes, `width * height * 3` long.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pixels.len() * 3);
        for &pixel in &self.pixels {
            rgb.extend_from_slice(&pixel.to_rgb().to_bytes());
        }
        rgb
    }
}

impl ImageBuffer {
    /// Build an image from packed RGB bytes.
    pub fn from_rgb_bytes(size: Size, bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 3 != 0 {
            return Err(Error::BufferLength {
                size,
                expected: size.area(),
                actual: bytes.len() / 3,
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| RgbColor::new(c[0], c[1], c[2]))
            .collect();
        Self::from_pixels(size, pixels)
    }
}

impl<E: Pixel> Index<Coordinate> for PixelBuffer<E> {
    type Output = E;

    #[inline]
    fn index(&self, point: Coordinate) -> &E {
        &self.pixels[self.index_of(point)]
    }
}

impl<E: Pixel> IndexMut<Coordinate> for PixelBuffer<E> {
    #[inline]
    fn index_mut(&mut self, point: Coordinate) -> &mut E {
        let index = self.index_of(point);
        &mut self.pixels[index]
    }
}
