//! Numeric counter ramp.
//!
//! Counts from 0 to a target integer over a fixed duration in equal
//! increments, then clamps to the target and stops for good.

use folio_core::config::CounterConfig;

/// A one-shot stepped ramp from 0 to `target`.
#[derive(Debug, Clone)]
pub struct CounterRamp {
    target: u64,
    current: f64,
    step: f64,
    tick_interval: f32,
    pending: f32,
    complete: bool,
}

impl CounterRamp {
    /// Ramps to `target` in `duration / tick_interval` increments.
    #[must_use]
    pub fn new(target: u64, config: &CounterConfig) -> Self {
        let ticks = if config.tick_interval > 0.0 {
            f64::from(config.duration / config.tick_interval)
        } else {
            0.0
        };
        // Fewer than one tick: jump straight to the target.
        let step = if ticks >= 1.0 {
            target as f64 / ticks
        } else {
            target as f64
        };

        Self {
            target,
            current: 0.0,
            step,
            tick_interval: config.tick_interval,
            pending: 0.0,
            complete: false,
        }
    }

    /// The value being counted to.
    #[must_use]
    pub const fn target(&self) -> u64 {
        self.target
    }

    /// The value shown on the page: the running value rounded down.
    #[must_use]
    pub fn displayed(&self) -> u64 {
        if self.complete {
            self.target
        } else {
            self.current.floor() as u64
        }
    }

    /// True once the target has been reached.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Advances one interval. Returns the displayed value, or `None` once
    /// complete.
    pub fn tick(&mut self) -> Option<u64> {
        if self.complete {
            return None;
        }

        self.current += self.step;
        if self.current >= self.target as f64 {
            self.current = self.target as f64;
            self.complete = true;
            tracing::debug!(target = self.target, "counter ramp complete");
        }
        Some(self.displayed())
    }

    /// Advances by `dt` seconds, running every whole interval that elapsed.
    /// Returns the displayed value if it was ticked at least once.
    pub fn update(&mut self, dt: f32) -> Option<u64> {
        if self.complete {
            return None;
        }
        if self.tick_interval <= 0.0 {
            return self.tick();
        }

        self.pending += dt;
        let mut shown = None;
        while self.pending >= self.tick_interval && !self.complete {
            self.pending -= self.tick_interval;
            shown = self.tick();
        }
        shown
    }
}
