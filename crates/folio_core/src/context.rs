//! Process-wide page context.
//!
//! One `PageContext` exists per page. Each field has exactly one writer:
//!
//! | field            | written by            | read by                         |
//! |------------------|-----------------------|---------------------------------|
//! | `viewport`       | resize handling       | particle field, visibility, nav |
//! | `pointer`        | pointer-move handling | particle field, cursor          |
//! | `scroll_y`       | scroll handling       | visibility, nav                 |
//! | `document_height`| layout handling       | nav (scroll progress)           |

use crate::geometry::{Bounds, Rect};

/// Window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Inner width.
    pub width: u32,
    /// Inner height.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Canvas bounds for this viewport, or `None` while the window is
    /// collapsed to zero on either axis.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::new(self.width, self.height).ok()
    }

    /// True at or below the given breakpoint (phones, narrow windows).
    #[inline]
    #[must_use]
    pub const fn is_narrow(&self, breakpoint: u32) -> bool {
        self.width <= breakpoint
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 800)
    }
}

/// Last known pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Pointer {
    /// Creates a pointer position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Shared state read by every page component.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    viewport: Viewport,
    pointer: Pointer,
    scroll_y: f32,
    document_height: f32,
}

impl PageContext {
    /// Creates a context for a freshly loaded page (scrolled to top, pointer
    /// at the origin).
    #[must_use]
    pub fn new(viewport: Viewport, document_height: f32) -> Self {
        Self {
            viewport,
            pointer: Pointer::default(),
            scroll_y: 0.0,
            document_height,
        }
    }

    /// Current viewport.
    #[inline]
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current pointer.
    #[inline]
    #[must_use]
    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /// Current vertical scroll offset.
    #[inline]
    #[must_use]
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Total scrollable document height.
    #[inline]
    #[must_use]
    pub fn document_height(&self) -> f32 {
        self.document_height
    }

    /// Visible part of the document, in document coordinates.
    #[must_use]
    pub fn viewport_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.scroll_y,
            self.viewport.width as f32,
            self.viewport.height as f32,
        )
    }

    /// Records a pointer move. Only input handling calls this.
    pub fn record_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Pointer::new(x, y);
    }

    /// Records a resize. Only resize handling calls this.
    pub fn record_resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Records a scroll. Negative offsets (overscroll bounce) clamp to zero.
    pub fn record_scroll(&mut self, y: f32) {
        self.scroll_y = y.max(0.0);
    }

    /// Records a new document height after layout.
    pub fn record_document_height(&mut self, height: f32) {
        self.document_height = height.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_rect_follows_scroll() {
        let mut ctx = PageContext::new(Viewport::new(800, 600), 3000.0);
        ctx.record_scroll(250.0);
        let rect = ctx.viewport_rect();
        assert!((rect.y - 250.0).abs() < f32::EPSILON);
        assert!((rect.bottom() - 850.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_collapsed_viewport_has_no_bounds() {
        assert!(Viewport::new(0, 600).bounds().is_none());
        assert!(Viewport::new(800, 600).bounds().is_some());
    }
}
