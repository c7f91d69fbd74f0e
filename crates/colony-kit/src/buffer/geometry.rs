//! Integer coordinates, sizes and axis-aligned rectangles.
//!
//! Rectangles are half-open: `max_x()` and `max_y()` are one past the last
//! column and row that belong to the rectangle.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Shift by a signed offset, `None` if either axis would go negative.
    #[inline]
    pub fn offset(self, dx: isize, dy: isize) -> Option<Coordinate> {
        Some(Coordinate::new(
            self.x.checked_add_signed(dx)?,
            self.y.checked_add_signed(dy)?,
        ))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub origin: Coordinate,
    pub size: Size,
}

impl Rect {
    #[inline]
    pub const fn new(origin: Coordinate, size: Size) -> Self {
        Self { origin, size }
    }

    /// Rectangle spanning `min` up to and including `max`.
    #[inline]
    pub fn from_corners(min: Coordinate, max: Coordinate) -> Self {
        Self::new(min, Size::new(max.x - min.x + 1, max.y - min.y + 1))
    }

    /// Rectangle at the origin covering a whole buffer.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(Coordinate::new(0, 0), size)
    }

    #[inline]
    pub const fn min_x(&self) -> usize {
        self.origin.x
    }

    #[inline]
    pub const fn min_y(&self) -> usize {
        self.origin.y
    }

    #[inline]
    pub const fn max_x(&self) -> usize {
        self.origin.x + self.size.width
    }

    #[inline]
    pub const fn max_y(&self) -> usize {
        self.origin.y + self.size.height
    }

    /// Middle row, rounded towards the top.
    #[inline]
    pub const fn mid_y(&self) -> usize {
        self.origin.y + self.size.height / 2
    }

    #[inline]
    pub const fn width(&self) -> usize {
        self.size.width
    }

    #[inline]
    pub const fn height(&self) -> usize {
        self.size.height
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    #[inline]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.min_x()..self.max_x()).contains(&point.x)
            && (self.min_y()..self.max_y()).contains(&point.y)
    }

    /// Whether `other` lies completely inside this rectangle.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x() >= self.min_x()
            && other.min_y() >= self.min_y()
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.origin, self.size)
    }
}
