//! Pixel containers and integer geometry
//!
//! A [`PixelBuffer`] stores one element per pixel in row-major order
//! (`index = y * width + x`). [`ImageBuffer`] holds colors and [`Mask`]
//! holds the per-pixel foreground/background decision; both share the same
//! indexing so a mask produced from an image lines up with it pixel for
//! pixel.

mod geometry;
mod mask;
mod pixel_buffer;

pub use geometry::{Coordinate, Rect, Size};
pub use mask::{Mask, MaskBit, SquareMillimeters, SquarePixels};
pub use pixel_buffer::{ImageBuffer, Pixel, PixelBuffer};
