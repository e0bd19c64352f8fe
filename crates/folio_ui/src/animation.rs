//! Smooth scrolling.
//!
//! The scroll is advanced by explicit `dt`; nothing here owns a clock.

/// Cubic ease-in-out, the curve browsers use for smooth scrolling.
fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Smoothly scrolls the document to a target offset.
///
/// The host feeds the position produced by [`SmoothScroll::update`] back
/// into the page as a scroll event. User scrolling does not cancel it; a new
/// [`SmoothScroll::scroll_to`] retargets from wherever the page currently is.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    from: f32,
    to: f32,
    current: f32,
    elapsed: f32,
    duration: f32,
    active: bool,
}

impl SmoothScroll {
    /// Creates an idle scroller. `duration` is in seconds.
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            current: 0.0,
            elapsed: 0.0,
            duration,
            active: false,
        }
    }

    /// Begins scrolling from `from` to `to` (clamped at 0).
    pub fn scroll_to(&mut self, from: f32, to: f32) {
        self.from = from;
        self.to = to.max(0.0);
        self.current = from;
        self.elapsed = 0.0;
        self.active = true;
        tracing::debug!(from, to = self.to, "smooth scroll started");
    }

    /// True while a scroll is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Final offset of the current (or last) scroll.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Advances by `dt`. Returns the new scroll offset while active.
    pub fn update(&mut self, dt: f32) -> Option<f32> {
        if !self.active {
            return None;
        }

        self.elapsed += dt;
        let progress = if self.duration > 0.0 { self.elapsed / self.duration } else { 1.0 };

        if progress >= 1.0 {
            self.current = self.to;
            self.active = false;
        } else {
            self.current = self.from + (self.to - self.from) * ease_in_out_cubic(progress);
        }
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        assert!(ease_in_out_cubic(0.0).abs() < 1e-6);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out_cubic(1.0) - 1.0).abs() < 1e-6);
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn test_smooth_scroll_lands_on_target() {
        let mut scroll = SmoothScroll::new(0.6);
        scroll.scroll_to(0.0, 1200.0);

        let mut last = 0.0;
        let mut steps = 0;
        while let Some(y) = scroll.update(0.016) {
            assert!(y >= last - 1e-3, "scroll went backwards");
            last = y;
            steps += 1;
            assert!(steps < 100);
        }
        assert!((last - 1200.0).abs() < f32::EPSILON);
        assert!(!scroll.is_active());
        assert_eq!(scroll.update(0.016), None);
    }

    #[test]
    fn test_smooth_scroll_retargets_from_current_position() {
        let mut scroll = SmoothScroll::new(0.5);
        scroll.scroll_to(0.0, 1000.0);
        scroll.update(0.1);

        scroll.scroll_to(400.0, 0.0);
        let first = scroll.update(0.01).unwrap();
        assert!(first <= 400.0 && first > 390.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut scroll = SmoothScroll::new(0.0);
        scroll.scroll_to(50.0, 900.0);
        assert_eq!(scroll.update(0.016), Some(900.0));
        assert!(!scroll.is_active());
    }

    #[test]
    fn test_smooth_scroll_clamps_negative_target() {
        let mut scroll = SmoothScroll::new(0.1);
        scroll.scroll_to(300.0, -70.0);
        assert!(scroll.target().abs() < f32::EPSILON);
    }
}
