//! # Page Configuration
//!
//! All tunables live in one TOML file loaded at startup. Every field has a
//! default matching the shipped page, so an empty file is a valid config.
//!
//! ```toml
//! [particles]
//! desktop_count = 80
//! seed = 7
//!
//! [contact]
//! recipient = "someone@example.com"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::FolioResult;

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Ambient particle background.
    pub particles: ParticleConfig,
    /// Frame loop pacing.
    pub frame: FrameConfig,
    /// Numeric counter ramps.
    pub counter: CounterConfig,
    /// Hero role typing effect.
    pub typing: TypingConfig,
    /// Loading screen.
    pub preloader: PreloaderConfig,
    /// Navbar, scroll progress and anchors.
    pub navigation: NavigationConfig,
    /// Toast notifications.
    pub notifications: NotificationConfig,
    /// Contact form hand-off.
    pub contact: ContactConfig,
    /// Scroll-triggered reveals.
    pub reveal: RevealConfig,
}

impl FolioConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FolioError::Config`] on malformed TOML or mistyped
    /// fields.
    pub fn from_toml_str(text: &str) -> FolioResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FolioError::Io`] if the file cannot be read, or
    /// [`crate::FolioError::Config`] if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> FolioResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.as_ref().display(), "loaded page config");
        Ok(config)
    }
}

/// Ambient particle field tunables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particle count above the breakpoint.
    pub desktop_count: usize,
    /// Particle count at or below the breakpoint.
    pub mobile_count: usize,
    /// Viewport width (px) at or below which the page counts as mobile.
    pub mobile_breakpoint: u32,
    /// Velocity components are sampled from `[-speed, speed]` px/frame.
    pub speed: f32,
    /// Smallest particle radius (px).
    pub radius_min: f32,
    /// Largest particle radius (px, exclusive).
    pub radius_max: f32,
    /// Faintest particle opacity.
    pub opacity_min: f32,
    /// Strongest particle opacity (exclusive).
    pub opacity_max: f32,
    /// Pointer distance (px) inside which particles are pushed away.
    pub repulsion_radius: f32,
    /// Scales the per-frame push.
    pub repulsion_damping: f32,
    /// Particle RGB color.
    pub color: [u8; 3],
    /// Fixed RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            desktop_count: 50,
            mobile_count: 25,
            mobile_breakpoint: 768,
            speed: 0.25,
            radius_min: 1.0,
            radius_max: 4.0,
            opacity_min: 0.2,
            opacity_max: 0.7,
            repulsion_radius: 100.0,
            repulsion_damping: 0.01,
            color: [255, 255, 255],
            seed: None,
        }
    }
}

/// Frame loop pacing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Display refresh rate the loop paces itself to.
    pub target_fps: u32,
    /// Frames slower than this (ms) get logged.
    pub budget_ms: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            budget_ms: 33.0,
        }
    }
}

/// Counter ramp timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Total ramp duration (seconds).
    pub duration: f32,
    /// Interval between increments (seconds).
    pub tick_interval: f32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration: 2.0,
            tick_interval: 0.016,
        }
    }
}

/// Typing effect roles and pacing (seconds).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Phrases typed in turn.
    pub roles: Vec<String>,
    /// Delay after typing one character.
    pub type_delay: f32,
    /// Delay after deleting one character.
    pub delete_delay: f32,
    /// Pause on a fully typed phrase.
    pub hold_delay: f32,
    /// Pause before starting the next phrase.
    pub next_delay: f32,
    /// Delay before the first character.
    pub start_delay: f32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            roles: [
                "Student Developer",
                "Game Creator",
                "AI Enthusiast",
                "Problem Solver",
                "Future Engineer",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            type_delay: 0.1,
            delete_delay: 0.05,
            hold_delay: 2.0,
            next_delay: 0.5,
            start_delay: 1.0,
        }
    }
}

/// Loading screen pacing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    /// Seconds between progress increments.
    pub interval: f32,
    /// Each increment is uniform in `[0, max_increment)` percent.
    pub max_increment: f32,
    /// Seconds between reaching 100% and hiding.
    pub hide_delay: f32,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            interval: 0.1,
            max_increment: 15.0,
            hide_delay: 0.5,
        }
    }
}

/// Navbar and scroll offsets (px) and smooth-scroll timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Scroll offset past which the navbar gets its compact style.
    pub scrolled_offset: f32,
    /// Scroll offset past which scrolling down hides the navbar.
    pub hide_offset: f32,
    /// Probe offset below the top edge used to pick the active section.
    pub active_offset: f32,
    /// Fixed navbar height subtracted from anchor targets.
    pub anchor_offset: f32,
    /// Scroll offset past which the back-to-top button shows.
    pub back_to_top_offset: f32,
    /// Smooth scroll duration (seconds).
    pub smooth_scroll_duration: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scrolled_offset: 50.0,
            hide_offset: 100.0,
            active_offset: 100.0,
            anchor_offset: 70.0,
            back_to_top_offset: 300.0,
            smooth_scroll_duration: 0.6,
        }
    }
}

/// Toast notification timing (seconds).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Time a toast stays before dismissing itself.
    pub lifetime: f32,
    /// Slide-out time before the toast is removed.
    pub exit_duration: f32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            lifetime: 5.0,
            exit_duration: 0.3,
        }
    }
}

/// Contact form hand-off.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Address the generated `mailto:` link points at.
    pub recipient: String,
    /// Seconds between opening the mail client and resetting the form.
    pub open_delay: f32,
    /// Seconds before the submit button is restored.
    pub restore_delay: f32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: "AbhijnanSahariah18@gmail.com".to_string(),
            open_delay: 1.0,
            restore_delay: 2.0,
        }
    }
}

/// Visibility thresholds for the scroll-triggered effects.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction visible before a reveal animation starts.
    pub threshold: f32,
    /// Bottom viewport margin (px) for reveals; negative shrinks the viewport.
    pub bottom_margin: f32,
    /// Fraction visible before a skill bar fills.
    pub skill_threshold: f32,
    /// Fraction visible before a counter starts.
    pub counter_threshold: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: -50.0,
            skill_threshold: 0.5,
            counter_threshold: 0.5,
        }
    }
}
