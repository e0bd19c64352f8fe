//! Pointer and touch handling: the custom cursor and swipe navigation.

use folio_core::Pointer;

/// Minimum vertical travel (px) for a swipe.
pub const SWIPE_MIN_DISTANCE: f32 = 50.0;

/// The custom cursor that replaces the system pointer on wide viewports.
#[derive(Debug, Clone, Default)]
pub struct CursorState {
    enabled: bool,
    position: Pointer,
    hovering: u32,
}

impl CursorState {
    /// Enabled only above `mobile_breakpoint`.
    #[must_use]
    pub fn new(viewport_width: u32, mobile_breakpoint: u32) -> Self {
        let enabled = viewport_width > mobile_breakpoint;
        if !enabled {
            tracing::debug!(viewport_width, "custom cursor disabled on narrow viewport");
        }
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// False on touch-sized viewports.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Where the cursor dot is drawn.
    #[must_use]
    pub const fn position(&self) -> Pointer {
        self.position
    }

    /// True while the pointer is over an interactive element.
    #[must_use]
    pub const fn is_hovering(&self) -> bool {
        self.hovering > 0
    }

    /// Follows the pointer. Returns the new position if the cursor is shown.
    pub fn on_move(&mut self, pointer: Pointer) -> Option<Pointer> {
        if !self.enabled {
            return None;
        }
        self.position = pointer;
        Some(pointer)
    }

    /// Entered an interactive element. Returns true when the hover marker
    /// turns on.
    pub fn on_enter(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.hovering += 1;
        self.hovering == 1
    }

    /// Left an interactive element. Returns true when the hover marker
    /// turns off.
    pub fn on_leave(&mut self) -> bool {
        if !self.enabled || self.hovering == 0 {
            return false;
        }
        self.hovering -= 1;
        self.hovering == 0
    }
}

/// Recognizes an upward swipe (finger moves up, page should advance).
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeDetector {
    start: Option<Pointer>,
}

impl SwipeDetector {
    /// No touch in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finger down.
    pub fn touch_start(&mut self, at: Pointer) {
        self.start = Some(at);
    }

    /// Finger up. True if the gesture was a mostly vertical upward swipe of
    /// more than [`SWIPE_MIN_DISTANCE`].
    pub fn touch_end(&mut self, at: Pointer) -> bool {
        let Some(start) = self.start.take() else {
            return false;
        };
        let dy = start.y - at.y;
        let dx = start.x - at.x;
        dy.abs() > dx.abs() && dy > SWIPE_MIN_DISTANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_disabled_on_mobile() {
        let mut cursor = CursorState::new(768, 768);
        assert!(!cursor.is_enabled());
        assert_eq!(cursor.on_move(Pointer::new(1.0, 2.0)), None);
        assert!(!cursor.on_enter());
    }

    #[test]
    fn test_cursor_follows_and_hovers() {
        let mut cursor = CursorState::new(1280, 768);
        assert_eq!(cursor.on_move(Pointer::new(10.0, 20.0)), Some(Pointer::new(10.0, 20.0)));
        assert_eq!(cursor.position(), Pointer::new(10.0, 20.0));

        assert!(cursor.on_enter());
        // Nested element: marker already on.
        assert!(!cursor.on_enter());
        assert!(!cursor.on_leave());
        assert!(cursor.on_leave());
        assert!(!cursor.on_leave());
        assert!(!cursor.is_hovering());
    }

    #[test]
    fn test_swipe_up_detected() {
        let mut swipe = SwipeDetector::new();
        swipe.touch_start(Pointer::new(100.0, 500.0));
        assert!(swipe.touch_end(Pointer::new(110.0, 300.0)));
    }

    #[test]
    fn test_short_or_sideways_swipes_ignored() {
        let mut swipe = SwipeDetector::new();
        swipe.touch_start(Pointer::new(100.0, 500.0));
        assert!(!swipe.touch_end(Pointer::new(100.0, 460.0)));

        swipe.touch_start(Pointer::new(100.0, 500.0));
        assert!(!swipe.touch_end(Pointer::new(300.0, 400.0)));

        swipe.touch_start(Pointer::new(100.0, 300.0));
        assert!(!swipe.touch_end(Pointer::new(100.0, 500.0)));

        assert!(!swipe.touch_end(Pointer::new(0.0, 0.0)));
    }
}
