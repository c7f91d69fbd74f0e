//! Mask cleanup: fill holes inside the colony and drop stray speckles.
//!
//! Both passes use the same primitive: find every 8-connected component of
//! one mask value and flip the components whose pixel count is below a
//! fraction of the whole image. Holes (background components) are filled
//! first, then speckles (foreground components) are removed. Running the
//! cleanup again on its own output changes nothing.

use tracing::debug;

use crate::buffer::{Coordinate, Mask, MaskBit};
use crate::error::Result;
use crate::numeric::ensure_unit_range;

/// Horizontal neighbors first, then the row above, then the row below.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Area thresholds for [`clean`], as fractions of the image pixel count.
///
/// # Example
///
/// ```
/// use colony_kit::CleanupOptions;
///
/// let options = CleanupOptions::new().hole_area_fraction(0.1);
/// assert_eq!(options.speckle_area_fraction, 0.02);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupOptions {
    /// Background components smaller than this become foreground.
    pub hole_area_fraction: f64,
    /// Foreground components smaller than this become background.
    pub speckle_area_fraction: f64,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            hole_area_fraction: 0.2,
            speckle_area_fraction: 0.02,
        }
    }
}

impl CleanupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn hole_area_fraction(mut self, fraction: f64) -> Self {
        self.hole_area_fraction = fraction;
        self
    }

    #[inline]
    pub fn speckle_area_fraction(mut self, fraction: f64) -> Self {
        self.speckle_area_fraction = fraction;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_unit_range("hole area fraction", self.hole_area_fraction)?;
        ensure_unit_range("speckle area fraction", self.speckle_area_fraction)?;
        Ok(())
    }
}

/// What one flipping pass found and changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Connected components of the examined value.
    pub components: usize,
    /// Components that were below the area threshold and flipped.
    pub flipped_components: usize,
    pub flipped_pixels: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub holes: PassReport,
    pub speckles: PassReport,
}

/// Fill small holes, then remove small speckles, in place.
pub fn clean(mask: &mut Mask, options: &CleanupOptions) -> Result<CleanupReport> {
    options.validate()?;

    let holes = flip_small_components(mask, MaskBit::Background, options.hole_area_fraction);
    let speckles = flip_small_components(mask, MaskBit::Foreground, options.speckle_area_fraction);

    debug!(
        holes_filled = holes.flipped_components,
        hole_pixels = holes.flipped_pixels,
        speckles_removed = speckles.flipped_components,
        speckle_pixels = speckles.flipped_pixels,
        "cleaned mask"
    );
    Ok(CleanupReport { holes, speckles })
}

/// Flip every 8-connected component of `value` with fewer than
/// `floor(pixel_count * fraction)` pixels to the opposite value.
pub fn flip_small_components(mask: &mut Mask, value: MaskBit, fraction: f64) -> PassReport {
    let width = mask.width();
    let height = mask.height();
    let min_area = (mask.len() as f64 * fraction) as usize;

    let pixels = mask.pixels_mut();
    let mut visited = vec![false; pixels.len()];
    let mut stack = Vec::new();
    let mut component = Vec::new();
    let mut report = PassReport::default();

    for seed in 0..pixels.len() {
        if visited[seed] || pixels[seed] != value {
            continue;
        }

        visited[seed] = true;
        stack.push(seed);
        component.clear();

        while let Some(index) = stack.pop() {
            component.push(index);
            let point = Coordinate::new(index % width, index / width);

            for (dx, dy) in NEIGHBOR_OFFSETS {
                let Some(next) = point.offset(dx, dy) else {
                    continue;
                };
                if next.x >= width || next.y >= height {
                    continue;
                }
                let neighbor = next.y * width + next.x;
                if !visited[neighbor] && pixels[neighbor] == value {
                    visited[neighbor] = true;
                    stack.push(neighbor);
                }
            }
        }

        report.components += 1;
        if component.len() < min_area {
            for &index in &component {
                pixels[index] = value.opposite();
            }
            report.flipped_components += 1;
            report.flipped_pixels += component.len();
        }
    }

    report
}
