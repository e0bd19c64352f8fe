//! # Navigation and Scroll State
//!
//! Everything that reacts to the scroll offset alone:
//!
//! ```text
//! scroll_y ──> compact navbar     (y > scrolled_offset)
//!          ──> hide navbar        (scrolling down and y > hide_offset)
//!          ──> progress bar       (y / (document - viewport) as percent)
//!          ──> back-to-top button (y > back_to_top_offset)
//!          ──> active nav link    (y + active_offset inside a section)
//! ```
//!
//! Only changes are reported; an unchanged flag produces nothing.

use folio_core::config::NavigationConfig;
use folio_core::{FolioError, FolioResult};
use serde::Deserialize;

/// A top-level page section with an anchor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Section {
    /// Anchor id (`#about` is `about`).
    pub name: String,
    /// Document offset of the top edge (px).
    pub top: f32,
    /// Rendered height (px).
    pub height: f32,
}

impl Section {
    /// Builds a section.
    #[must_use]
    pub fn new(name: impl Into<String>, top: f32, height: f32) -> Self {
        Self {
            name: name.into(),
            top,
            height,
        }
    }

    /// Document offset of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// A scroll-driven change to the page chrome.
#[derive(Debug, Clone, PartialEq)]
pub enum NavChange {
    /// Compact navbar style on/off.
    Scrolled(bool),
    /// Navbar slid out of view / back in.
    NavbarHidden(bool),
    /// Scroll progress bar width (percent).
    Progress(f32),
    /// Back-to-top button shown/hidden.
    BackToTop(bool),
    /// Nav link of this section becomes the only active one.
    ActiveSection(String),
}

/// Scroll-derived navigation state.
#[derive(Debug, Clone)]
pub struct NavigationState {
    config: NavigationConfig,
    sections: Vec<Section>,
    last_scroll_y: f32,
    scrolled: bool,
    hidden: bool,
    back_to_top: bool,
    progress: f32,
    active: Option<usize>,
    menu_open: bool,
}

impl NavigationState {
    /// State for a page scrolled to the top.
    #[must_use]
    pub fn new(config: NavigationConfig, sections: Vec<Section>) -> Self {
        Self {
            config,
            sections,
            last_scroll_y: 0.0,
            scrolled: false,
            hidden: false,
            back_to_top: false,
            progress: 0.0,
            active: None,
            menu_open: false,
        }
    }

    /// Replaces section geometry after a layout change.
    pub fn set_sections(&mut self, sections: Vec<Section>) {
        self.sections = sections;
        self.active = None;
    }

    /// Known sections in document order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Name of the section whose nav link is active.
    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.active.map(|i| self.sections[i].name.as_str())
    }

    /// True while the navbar is slid out.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Latest scroll progress (percent).
    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// True while the mobile menu is open.
    #[must_use]
    pub const fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Applies a new scroll offset.
    pub fn on_scroll(&mut self, scroll_y: f32, viewport_height: f32, document_height: f32) -> Vec<NavChange> {
        let mut changes = Vec::new();

        let scrolled = scroll_y > self.config.scrolled_offset;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            changes.push(NavChange::Scrolled(scrolled));
        }

        let hidden = scroll_y > self.last_scroll_y && scroll_y > self.config.hide_offset;
        if hidden != self.hidden {
            self.hidden = hidden;
            changes.push(NavChange::NavbarHidden(hidden));
        }
        self.last_scroll_y = scroll_y;

        self.progress = scroll_progress(scroll_y, viewport_height, document_height);
        changes.push(NavChange::Progress(self.progress));

        let back_to_top = scroll_y > self.config.back_to_top_offset;
        if back_to_top != self.back_to_top {
            self.back_to_top = back_to_top;
            changes.push(NavChange::BackToTop(back_to_top));
        }

        // Probe just below the navbar. When several sections match the last
        // one wins; when none does, the previous link stays active.
        let marker = scroll_y + self.config.active_offset;
        let matched = self
            .sections
            .iter()
            .rposition(|s| marker >= s.top && marker < s.bottom());
        if let Some(index) = matched {
            if self.active != Some(index) {
                self.active = Some(index);
                changes.push(NavChange::ActiveSection(self.sections[index].name.clone()));
            }
        }

        changes
    }

    /// Scroll offset that puts `name` just below the fixed navbar.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::UnknownSection`] if no section has that name.
    pub fn anchor_target(&self, name: &str) -> FolioResult<f32> {
        let name = name.trim_start_matches('#');
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| (s.top - self.config.anchor_offset).max(0.0))
            .ok_or_else(|| FolioError::UnknownSection(name.to_string()))
    }

    /// Section containing the middle of the viewport (first match).
    #[must_use]
    pub fn current_section(&self, scroll_y: f32, viewport_height: f32) -> Option<usize> {
        let middle = scroll_y + viewport_height / 2.0;
        self.sections
            .iter()
            .position(|s| middle >= s.top && middle <= s.bottom())
    }

    /// Top of the section after the one in the middle of the viewport.
    #[must_use]
    pub fn next_section_top(&self, scroll_y: f32, viewport_height: f32) -> Option<f32> {
        let current = self.current_section(scroll_y, viewport_height)?;
        self.sections.get(current + 1).map(|s| s.top)
    }

    /// Flips the mobile menu. Returns the new state; the body scroll lock
    /// follows it.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        tracing::debug!(open = self.menu_open, "mobile menu toggled");
        self.menu_open
    }

    /// Closes the mobile menu. Returns true if it was open.
    pub fn close_menu(&mut self) -> bool {
        std::mem::replace(&mut self.menu_open, false)
    }
}

/// Scroll progress in percent; 0 when the document does not scroll.
#[must_use]
pub fn scroll_progress(scroll_y: f32, viewport_height: f32, document_height: f32) -> f32 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

/// CSS transform for the `index`-th decorative shape: deeper shapes move
/// faster, all rotate with the scroll.
#[must_use]
pub fn parallax_transform(index: usize, scroll_y: f32) -> String {
    let speed = 0.5 + index as f32 * 0.1;
    format!("translateY({}px) rotate({}deg)", scroll_y * speed, scroll_y * 0.1)
}
