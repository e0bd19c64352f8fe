//! Page geometry in pixel coordinates (origin top-left).

use serde::Deserialize;

use crate::error::{FolioError, FolioResult};

/// A rectangle in document or screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the area (zero for degenerate rects).
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Returns true if the point is inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains_inclusive(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Returns the overlapping area of two rectangles, or `None` if they
    /// don't overlap.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < x || bottom < y {
            return None;
        }

        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// Grows (positive) or shrinks (negative) each edge independently.
    #[must_use]
    pub fn outset(&self, top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self::new(
            self.x - left,
            self.y - top,
            self.width + left + right,
            self.height + top + bottom,
        )
    }
}

/// Drawing-surface size. Always strictly positive on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    width: u32,
    height: u32,
}

impl Bounds {
    /// Validates a canvas size.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::InvalidBounds`] if either side is zero.
    pub fn new(width: u32, height: u32) -> FolioResult<Self> {
        if width == 0 || height == 0 {
            return Err(FolioError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Width as a float, for position math.
    #[inline]
    #[must_use]
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    /// Height as a float, for position math.
    #[inline]
    #[must_use]
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_partial() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        let i = a.intersection(&b).unwrap();
        assert_eq!(i, Rect::new(50.0, 50.0, 50.0, 50.0));
        assert!((i.area() - 2500.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_intersection_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn test_outset_negative_bottom() {
        let viewport = Rect::new(0.0, 100.0, 800.0, 600.0);
        let shrunk = viewport.outset(0.0, 0.0, -50.0, 0.0);
        assert!((shrunk.bottom() - 650.0).abs() < f32::EPSILON);
        assert!((shrunk.y - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bounds_reject_zero() {
        assert!(Bounds::new(0, 600).is_err());
        assert!(Bounds::new(800, 0).is_err());
        assert!(Bounds::new(800, 600).is_ok());
    }
}
