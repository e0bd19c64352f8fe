//! Loading screen with a randomly advancing progress bar.

use folio_core::config::PreloaderConfig;
use rand::Rng;

/// What the preloader did during an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreloaderEvent {
    /// Progress bar width changed (percent).
    Progress(f32),
    /// The loading screen hid itself. Reported once.
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Filling,
    Hiding { remaining: f32 },
    Done,
}

/// Fake progress bar: jumps by a random amount every interval until full,
/// then hides after a short delay.
#[derive(Debug, Clone)]
pub struct Preloader {
    config: PreloaderConfig,
    progress: f32,
    until_next: f32,
    phase: Phase,
}

impl Preloader {
    /// Starts at 0%.
    #[must_use]
    pub fn new(config: PreloaderConfig) -> Self {
        Self {
            until_next: config.interval,
            config,
            progress: 0.0,
            phase: Phase::Filling,
        }
    }

    /// Current progress (percent).
    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// True once the loading screen is gone.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Advances by `dt` seconds.
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) -> Vec<PreloaderEvent> {
        let mut events = Vec::new();
        let mut dt = dt;

        while dt > 0.0 {
            match self.phase {
                Phase::Filling => {
                    if dt < self.until_next {
                        self.until_next -= dt;
                        break;
                    }
                    dt -= self.until_next;
                    self.until_next = self.config.interval.max(f32::EPSILON);

                    self.progress += rng.gen::<f32>() * self.config.max_increment;
                    if self.progress >= 100.0 {
                        self.progress = 100.0;
                        self.phase = Phase::Hiding {
                            remaining: self.config.hide_delay,
                        };
                    }
                    events.push(PreloaderEvent::Progress(self.progress));
                }
                Phase::Hiding { remaining } => {
                    if dt < remaining {
                        self.phase = Phase::Hiding {
                            remaining: remaining - dt,
                        };
                        break;
                    }
                    dt -= remaining;
                    self.phase = Phase::Done;
                    tracing::info!("preloader hidden");
                    events.push(PreloaderEvent::Loaded);
                }
                Phase::Done => break,
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_loads_exactly_once() {
        let mut preloader = Preloader::new(PreloaderConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut loaded = 0;
        let mut last = 0.0;

        for _ in 0..3_000 {
            for event in preloader.update(0.016, &mut rng) {
                match event {
                    PreloaderEvent::Progress(p) => {
                        assert!(p >= last && p <= 100.0);
                        last = p;
                    }
                    PreloaderEvent::Loaded => loaded += 1,
                }
            }
        }

        assert_eq!(loaded, 1);
        assert!(preloader.is_loaded());
        assert!((preloader.progress() - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_waits_hide_delay_after_full() {
        let config = PreloaderConfig {
            interval: 0.1,
            max_increment: 1000.0,
            hide_delay: 0.5,
        };
        let mut preloader = Preloader::new(config);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        // A huge increment fills the bar on the first interval (unless the
        // sample is tiny, so keep ticking until full).
        while preloader.progress() < 100.0 {
            preloader.update(0.1, &mut rng);
        }
        assert!(!preloader.is_loaded());
        assert!(preloader.update(0.4, &mut rng).is_empty());
        assert_eq!(preloader.update(0.2, &mut rng), vec![PreloaderEvent::Loaded]);
    }

    #[test]
    fn test_large_dt_catches_up() {
        let mut preloader = Preloader::new(PreloaderConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let events = preloader.update(60.0, &mut rng);
        assert_eq!(events.last(), Some(&PreloaderEvent::Loaded));
    }
}
