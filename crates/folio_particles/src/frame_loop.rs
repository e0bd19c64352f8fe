//! # Frame Loop
//!
//! The page's only continuously running process.
//!
//! ```text
//! loop:
//!   ┌─ cancelled? ──────────── yes ──> return report
//!   │   no
//!   ├─ clock.wait_next_frame()   (suspends until the next display refresh)
//!   ├─ handler.frame(&info)      (runs to completion, never overlaps)
//!   └─ record timing
//! ```
//!
//! Single-threaded and cooperative. The [`CancelToken`] is the only way out;
//! it is checked before every tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use folio_core::config::FrameConfig;

/// Shared stop flag for a [`FrameLoop`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the loop to stop before its next tick.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// True once [`CancelToken::cancel`] has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Per-tick information handed to the handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Frame number, starting at 0.
    pub frame: u64,
    /// Seconds since the previous frame.
    pub dt: f32,
}

/// Source of display-refresh signals.
pub trait FrameClock {
    /// Blocks until the next frame is due and returns the elapsed seconds.
    fn wait_next_frame(&mut self) -> f32;
}

/// Clock that sleeps to hold a fixed refresh rate.
#[derive(Debug)]
pub struct FixedRateClock {
    frame_time: Duration,
    last_frame: Instant,
}

impl FixedRateClock {
    /// Paces to `fps` frames per second (at least 1).
    #[must_use]
    pub fn new(fps: u32) -> Self {
        Self {
            frame_time: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            last_frame: Instant::now(),
        }
    }
}

impl FrameClock for FixedRateClock {
    fn wait_next_frame(&mut self) -> f32 {
        let remaining = self.frame_time.saturating_sub(self.last_frame.elapsed());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        let dt = self.last_frame.elapsed().as_secs_f32();
        self.last_frame = Instant::now();
        // Clamp so a stalled tab does not fast-forward every animation at once.
        dt.min(0.1)
    }
}

/// Clock that never waits and reports a constant `dt`. Used for headless runs
/// and tests.
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    dt: f32,
}

impl ManualClock {
    /// Reports `dt` seconds per frame.
    #[must_use]
    pub const fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl FrameClock for ManualClock {
    fn wait_next_frame(&mut self) -> f32 {
        self.dt
    }
}

/// Work done once per frame.
pub trait FrameHandler {
    /// Runs one frame.
    fn frame(&mut self, info: &FrameInfo);
}

impl<F: FnMut(&FrameInfo)> FrameHandler for F {
    fn frame(&mut self, info: &FrameInfo) {
        self(info);
    }
}

/// Timing summary of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameLoopReport {
    /// Frames executed.
    pub frames: u64,
    /// Mean handler time (ms).
    pub avg_frame_ms: f64,
    /// Slowest handler time (ms).
    pub worst_frame_ms: f64,
    /// Frames whose handler exceeded the budget.
    pub frames_over_budget: u64,
}

/// Drives a [`FrameHandler`] until cancelled.
#[derive(Debug)]
pub struct FrameLoop {
    token: CancelToken,
    budget: Duration,
    frame_count: u64,
    total_us: u64,
    worst_us: u64,
    over_budget: u64,
}

impl FrameLoop {
    /// Creates a loop stopped by `token`.
    #[must_use]
    pub fn new(config: &FrameConfig, token: CancelToken) -> Self {
        Self {
            token,
            budget: Duration::from_secs_f32(config.budget_ms.max(0.0) / 1000.0),
            frame_count: 0,
            total_us: 0,
            worst_us: 0,
            over_budget: 0,
        }
    }

    /// A clone of the loop's cancel token.
    #[must_use]
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Ticks until the token is cancelled.
    pub fn run<C: FrameClock, H: FrameHandler>(&mut self, clock: &mut C, handler: &mut H) -> FrameLoopReport {
        tracing::debug!("frame loop started");

        while !self.token.is_cancelled() {
            let dt = clock.wait_next_frame();
            let info = FrameInfo {
                frame: self.frame_count,
                dt,
            };

            let start = Instant::now();
            handler.frame(&info);
            self.record(start.elapsed());
        }

        let report = self.report();
        tracing::debug!(frames = report.frames, "frame loop stopped");
        report
    }

    fn record(&mut self, elapsed: Duration) {
        let us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.frame_count += 1;
        self.total_us = self.total_us.saturating_add(us);
        self.worst_us = self.worst_us.max(us);

        if elapsed > self.budget {
            self.over_budget += 1;
            tracing::warn!(
                frame = self.frame_count,
                ms = elapsed.as_secs_f64() * 1000.0,
                budget_ms = self.budget.as_secs_f64() * 1000.0,
                "frame exceeded budget"
            );
        }
    }

    /// Statistics so far.
    #[must_use]
    pub fn report(&self) -> FrameLoopReport {
        let avg_frame_ms = if self.frame_count == 0 {
            0.0
        } else {
            self.total_us as f64 / self.frame_count as f64 / 1000.0
        };
        FrameLoopReport {
            frames: self.frame_count,
            avg_frame_ms,
            worst_frame_ms: self.worst_us as f64 / 1000.0,
            frames_over_budget: self.over_budget,
        }
    }
}
