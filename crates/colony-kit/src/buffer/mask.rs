//! Binary colony masks.

use std::fmt;

use super::geometry::{Coordinate, Rect};
use super::pixel_buffer::{ImageBuffer, Pixel, PixelBuffer};
use crate::color::RgbColor;

/// Per-pixel segmentation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaskBit {
    #[default]
    Background,
    Foreground,
}

impl MaskBit {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            MaskBit::Background => MaskBit::Foreground,
            MaskBit::Foreground => MaskBit::Background,
        }
    }

    #[inline]
    pub fn is_foreground(self) -> bool {
        self == MaskBit::Foreground
    }
}

impl Pixel for MaskBit {
    /// Foreground draws white, background black.
    #[inline]
    fn to_rgb(self) -> RgbColor {
        match self {
            MaskBit::Background => RgbColor::BLACK,
            MaskBit::Foreground => RgbColor::WHITE,
        }
    }
}

/// Foreground/background grid, the same size as the image it was made from.
pub type Mask = PixelBuffer<MaskBit>;

/// An area measured in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SquarePixels(pub usize);

/// An area measured in square millimeters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct SquareMillimeters(pub f64);

impl SquarePixels {
    /// Convert using the edge length of one pixel in micrometers.
    pub fn to_square_millimeters(self, micrometers_per_pixel: f64) -> SquareMillimeters {
        let millimeters_per_pixel = micrometers_per_pixel / 1000.0;
        SquareMillimeters(self.0 as f64 * millimeters_per_pixel * millimeters_per_pixel)
    }
}

impl fmt::Display for SquarePixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} px²", self.0)
    }
}

impl fmt::Display for SquareMillimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} mm²", self.0)
    }
}

impl Mask {
    pub fn foreground_count(&self) -> usize {
        self.pixels().iter().filter(|bit| bit.is_foreground()).count()
    }

    /// Colony size as the number of foreground pixels.
    pub fn colony_area(&self) -> SquarePixels {
        SquarePixels(self.foreground_count())
    }

    /// Smallest rectangle containing every foreground pixel.
    ///
    /// Returns `None` when the mask has no foreground at all. A single
    /// foreground pixel yields a 1x1 rectangle.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let width = self.width();
        let mut min = Coordinate::new(usize::MAX, usize::MAX);
        let mut max = Coordinate::new(0, 0);
        let mut found = false;

        for (index, bit) in self.pixels().iter().enumerate() {
            if !bit.is_foreground() {
                continue;
            }
            let (x, y) = (index % width, index / width);
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            found = true;
        }

        found.then(|| Rect::from_corners(min, max))
    }

    /// The mask drawn white on black.
    pub fn to_image(&self) -> ImageBuffer {
        self.map(Pixel::to_rgb)
    }

    /// Reset every pixel outside `rect` to background.
    pub fn clear_outside(&mut self, rect: Rect) {
        let width = self.width();
        for (index, bit) in self.pixels_mut().iter_mut().enumerate() {
            if !rect.contains(Coordinate::new(index % width, index / width)) {
                *bit = MaskBit::Background;
            }
        }
    }
}
