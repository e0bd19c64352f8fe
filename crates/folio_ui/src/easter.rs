//! Easter eggs: the Konami code and the footer message.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

/// ↑ ↑ ↓ ↓ ← → ← → B A, as `KeyboardEvent.code` values.
pub const KONAMI_SEQUENCE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "KeyB",
    "KeyA",
];

/// Toast shown when the code is entered.
pub const KONAMI_MESSAGE: &str = "🎉 Konami Code activated! You found the secret!";

/// How long the rainbow effect runs (seconds).
pub const RAINBOW_DURATION: f32 = 4.0;

/// Messages the footer easter egg picks from.
pub const FOOTER_MESSAGES: [&str; 5] = [
    "🎮 Game development is my passion!",
    "💻 Code is poetry in motion",
    "🚀 Building the future, one line at a time",
    "🎯 Precision in every pixel",
    "⚡ Speed of thought, power of code",
];

/// What an easter egg wants the page to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasterEggEvent {
    /// Konami code entered: start the rainbow effect and congratulate.
    RainbowStarted,
    /// Rainbow effect ran its course.
    RainbowEnded,
}

/// Watches key presses and runs the rainbow timer.
#[derive(Debug, Clone, Default)]
pub struct EasterEggs {
    recent: VecDeque<String>,
    rainbow_remaining: Option<f32>,
}

impl EasterEggs {
    /// Nothing typed yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the rainbow effect runs.
    #[must_use]
    pub const fn is_rainbow(&self) -> bool {
        self.rainbow_remaining.is_some()
    }

    /// Records a key press. Returns [`EasterEggEvent::RainbowStarted`] when
    /// the last ten keys spell the Konami code.
    pub fn key_down(&mut self, code: &str) -> Option<EasterEggEvent> {
        self.recent.push_back(code.to_string());
        if self.recent.len() > KONAMI_SEQUENCE.len() {
            self.recent.pop_front();
        }

        if !self.recent.iter().eq(KONAMI_SEQUENCE.iter()) {
            return None;
        }

        self.recent.clear();
        // Re-entering the code restarts the effect.
        self.rainbow_remaining = Some(RAINBOW_DURATION);
        tracing::info!("konami code entered");
        Some(EasterEggEvent::RainbowStarted)
    }

    /// Advances the rainbow timer.
    pub fn update(&mut self, dt: f32) -> Option<EasterEggEvent> {
        let remaining = self.rainbow_remaining? - dt;
        if remaining > 0.0 {
            self.rainbow_remaining = Some(remaining);
            None
        } else {
            self.rainbow_remaining = None;
            Some(EasterEggEvent::RainbowEnded)
        }
    }
}

/// A random footer message.
#[must_use]
pub fn footer_message<R: Rng>(rng: &mut R) -> &'static str {
    FOOTER_MESSAGES.choose(rng).copied().unwrap_or(FOOTER_MESSAGES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_konami_detected() {
        let mut eggs = EasterEggs::new();
        let mut events = Vec::new();
        for key in ["KeyX", "ArrowUp"].iter().chain(KONAMI_SEQUENCE.iter()) {
            events.extend(eggs.key_down(key));
        }
        assert_eq!(events, vec![EasterEggEvent::RainbowStarted]);
        assert!(eggs.is_rainbow());
    }

    #[test]
    fn test_wrong_sequence_ignored() {
        let mut eggs = EasterEggs::new();
        for key in KONAMI_SEQUENCE.iter().rev() {
            assert_eq!(eggs.key_down(key), None);
        }
    }

    #[test]
    fn test_history_cleared_after_match() {
        let mut eggs = EasterEggs::new();
        for key in KONAMI_SEQUENCE {
            eggs.key_down(key);
        }
        // The final "KeyA" of a match cannot start the next one.
        for key in &KONAMI_SEQUENCE[..9] {
            assert_eq!(eggs.key_down(key), None);
        }
    }

    #[test]
    fn test_rainbow_ends_after_duration() {
        let mut eggs = EasterEggs::new();
        for key in KONAMI_SEQUENCE {
            eggs.key_down(key);
        }
        assert_eq!(eggs.update(3.9), None);
        assert_eq!(eggs.update(0.2), Some(EasterEggEvent::RainbowEnded));
        assert!(!eggs.is_rainbow());
        assert_eq!(eggs.update(1.0), None);
    }

    #[test]
    fn test_footer_message_is_known() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..20 {
            assert!(FOOTER_MESSAGES.contains(&footer_message(&mut rng)));
        }
    }
}
