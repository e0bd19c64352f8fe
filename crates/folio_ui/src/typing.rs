//! Typing text effects.
//!
//! [`TypingEffect`] runs in one of two modes:
//!
//! - **Cycle**: types a role, holds it, deletes it, moves to the next role,
//!   forever.
//! - **Once**: types a single text character by character and stops.
//!
//! Both are driven by [`TypingEffect::update`] and emit the full text to
//! show whenever it changes. Slicing counts `char`s, not bytes.

use folio_core::config::TypingConfig;

/// Floor on the per-step delay so zero-delay configs cannot spin.
const MIN_STEP: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Cycle,
    Once,
}

/// Character-by-character text effect.
#[derive(Debug, Clone)]
pub struct TypingEffect {
    mode: Mode,
    roles: Vec<Vec<char>>,
    role_index: usize,
    char_index: usize,
    deleting: bool,
    done: bool,
    /// Seconds until the next step.
    wait: f32,
    type_delay: f32,
    delete_delay: f32,
    hold_delay: f32,
    next_delay: f32,
    text: String,
}

impl TypingEffect {
    /// Cycles through `config.roles`, starting after `start_delay`.
    #[must_use]
    pub fn cycle(config: &TypingConfig) -> Self {
        let roles: Vec<Vec<char>> = config.roles.iter().map(|r| r.chars().collect()).collect();
        Self {
            mode: Mode::Cycle,
            done: roles.is_empty(),
            roles,
            role_index: 0,
            char_index: 0,
            deleting: false,
            wait: config.start_delay,
            type_delay: config.type_delay,
            delete_delay: config.delete_delay,
            hold_delay: config.hold_delay,
            next_delay: config.next_delay,
            text: String::new(),
        }
    }

    /// Types `text` once at `char_delay` seconds per character. The first
    /// character appears on the first update.
    #[must_use]
    pub fn once(text: &str, char_delay: f32) -> Self {
        let chars: Vec<char> = text.chars().collect();
        Self {
            mode: Mode::Once,
            done: chars.is_empty(),
            roles: vec![chars],
            role_index: 0,
            char_index: 0,
            deleting: false,
            wait: 0.0,
            type_delay: char_delay,
            delete_delay: char_delay,
            hold_delay: 0.0,
            next_delay: 0.0,
            text: String::new(),
        }
    }

    /// Text currently shown.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Index of the role being typed.
    #[must_use]
    pub const fn role_index(&self) -> usize {
        self.role_index
    }

    /// True when a one-shot effect has finished (or had nothing to type).
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Advances by `dt` seconds. Returns the new text if it changed.
    pub fn update(&mut self, dt: f32) -> Option<&str> {
        if self.done {
            return None;
        }

        self.wait -= dt;
        let mut changed = false;
        while self.wait <= 0.0 && !self.done {
            self.wait += self.step().max(MIN_STEP);
            changed = true;
        }

        if changed {
            Some(self.text.as_str())
        } else {
            None
        }
    }

    /// One edit of the text. Returns the delay before the next edit.
    fn step(&mut self) -> f32 {
        let role_len = self.roles[self.role_index].len();

        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(role_len);
        }
        self.text = self.roles[self.role_index][..self.char_index].iter().collect();

        let mut delay = if self.deleting {
            self.delete_delay
        } else {
            self.type_delay
        };

        if !self.deleting && self.char_index == role_len {
            if self.mode == Mode::Once {
                self.done = true;
                tracing::debug!(text = %self.text, "typewriter finished");
                return 0.0;
            }
            delay = self.hold_delay;
            self.deleting = true;
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.role_index = (self.role_index + 1) % self.roles.len();
            delay = self.next_delay;
        }

        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(roles: &[&str]) -> TypingConfig {
        TypingConfig {
            roles: roles.iter().map(|r| (*r).to_string()).collect(),
            ..TypingConfig::default()
        }
    }

    #[test]
    fn test_waits_start_delay() {
        let mut effect = TypingEffect::cycle(&config(&["Hi"]));
        assert_eq!(effect.update(0.5), None);
        assert_eq!(effect.update(0.5), Some("H"));
    }

    #[test]
    fn test_full_cycle_sequence() {
        let mut effect = TypingEffect::cycle(&config(&["ab", "c"]));
        let mut frames = Vec::new();
        // 10ms steps over 8 seconds; record every change.
        for _ in 0..800 {
            if let Some(text) = effect.update(0.01) {
                frames.push(text.to_string());
            }
        }
        let expected_prefix = ["a", "ab", "a", "", "c", "", "a", "ab"];
        assert_eq!(&frames[..expected_prefix.len()], &expected_prefix);
    }

    #[test]
    fn test_hold_then_delete_timing() {
        let mut effect = TypingEffect::cycle(&config(&["ab"]));
        effect.update(1.0);
        effect.update(0.1);
        assert_eq!(effect.text(), "ab");
        // Holds for two seconds.
        assert_eq!(effect.update(1.9), None);
        assert_eq!(effect.update(0.11), Some("a"));
    }

    #[test]
    fn test_role_advances_and_wraps() {
        let mut effect = TypingEffect::cycle(&config(&["x", "y"]));
        let mut seen = Vec::new();
        for _ in 0..2000 {
            effect.update(0.01);
            if effect.text().len() == 1 && seen.last().map(String::as_str) != Some(effect.text()) {
                seen.push(effect.text().to_string());
            }
        }
        assert!(seen.starts_with(&["x".to_string(), "y".to_string(), "x".to_string()]));
    }

    #[test]
    fn test_multibyte_roles() {
        let mut effect = TypingEffect::cycle(&config(&["héllo 🎮"]));
        effect.update(1.0);
        effect.update(0.1);
        assert_eq!(effect.text(), "hé");
    }

    #[test]
    fn test_empty_roles_do_nothing() {
        let mut effect = TypingEffect::cycle(&config(&[]));
        assert!(effect.is_done());
        assert_eq!(effect.update(5.0), None);
    }

    #[test]
    fn test_once_types_and_stops() {
        let mut effect = TypingEffect::once("Folio", 0.1);
        assert_eq!(effect.update(0.0), Some("F"));
        for _ in 0..10 {
            effect.update(0.1);
        }
        assert_eq!(effect.text(), "Folio");
        assert!(effect.is_done());
        assert_eq!(effect.update(1.0), None);
    }
}
