//! # Visibility Trigger Engine
//!
//! "When this element scrolls into view, do something once."
//!
//! Elements are registered with their document-space bounds and a threshold:
//! the fraction of the element's area that must lie inside the viewport.
//! [`VisibilityEngine::evaluate`] is called whenever geometry changes (scroll,
//! resize, layout) and fires the callback of every watch whose visible
//! fraction rose from below the threshold to at or above it.
//!
//! - [`TriggerMode::Once`]: fires on the first crossing, then is no longer
//!   observed. [`VisibilityEngine::rearm`] makes it eligible again.
//! - [`TriggerMode::EveryEntry`]: fires on every upward crossing.
//!
//! Callbacks run synchronously inside `evaluate` and must not assume any
//! ordering relative to other watches.

use std::fmt;

use folio_core::{FolioError, FolioResult, Rect};
use serde::Deserialize;

/// Opaque handle to a page element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Required visible fraction, in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f32);

impl Threshold {
    /// Validates a threshold.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::InvalidThreshold`] outside `(0, 1]` (NaN included).
    pub fn new(value: f32) -> FolioResult<Self> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(FolioError::InvalidThreshold(value))
        }
    }

    /// The fraction.
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// How often a watch may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerMode {
    /// First crossing only.
    #[default]
    Once,
    /// Every crossing from below to at-or-above the threshold.
    EveryEntry,
}

/// Per-side adjustment of the viewport (px). Negative values shrink it, so a
/// bottom margin of `-50` requires the element to be 50px clear of the
/// bottom edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RootMargin {
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
    /// Left edge.
    pub left: f32,
}

impl RootMargin {
    /// Only the bottom edge adjusted.
    #[must_use]
    pub const fn bottom(px: f32) -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: px,
            left: 0.0,
        }
    }

    fn apply(&self, viewport: Rect) -> Rect {
        viewport.outset(self.top, self.right, self.bottom, self.left)
    }
}

/// Options for a single watch.
#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    /// Required visible fraction.
    pub threshold: Threshold,
    /// One-shot or repeating.
    pub mode: TriggerMode,
    /// Viewport adjustment.
    pub root_margin: RootMargin,
}

impl WatchOptions {
    /// One-shot watch with no margin.
    #[must_use]
    pub fn once(threshold: Threshold) -> Self {
        Self {
            threshold,
            mode: TriggerMode::Once,
            root_margin: RootMargin::default(),
        }
    }

    /// Sets the viewport margin.
    #[must_use]
    pub fn with_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }

    /// Sets the trigger mode.
    #[must_use]
    pub fn with_mode(mut self, mode: TriggerMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Fraction of `element`'s area inside `viewport`.
///
/// A zero-area element counts as fully visible when it touches the viewport,
/// otherwise invisible.
#[must_use]
pub fn visible_fraction(element: Rect, viewport: Rect) -> f32 {
    let Some(overlap) = element.intersection(&viewport) else {
        return 0.0;
    };

    let area = element.area();
    if area <= 0.0 {
        return if viewport.contains_inclusive(element.x, element.y) {
            1.0
        } else {
            0.0
        };
    }

    (overlap.area() / area).clamp(0.0, 1.0)
}

type Callback = Box<dyn FnMut(ElementId)>;

struct Watch {
    element: ElementId,
    bounds: Rect,
    options: WatchOptions,
    /// Set once a one-shot watch has fired.
    triggered: bool,
    /// At or above threshold at the last evaluation.
    above: bool,
    callback: Callback,
}

/// Observes elements and fires callbacks on threshold crossings.
#[derive(Default)]
pub struct VisibilityEngine {
    watches: Vec<Watch>,
}

impl VisibilityEngine {
    /// Creates an engine with nothing watched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Watches `element` one-shot: `callback` fires the first time at least
    /// `threshold` of it is visible.
    pub fn register(
        &mut self,
        element: ElementId,
        bounds: Rect,
        threshold: Threshold,
        callback: impl FnMut(ElementId) + 'static,
    ) {
        self.register_with(element, bounds, WatchOptions::once(threshold), callback);
    }

    /// Watches `element` with explicit options. An element may carry several
    /// independent watches.
    pub fn register_with(
        &mut self,
        element: ElementId,
        bounds: Rect,
        options: WatchOptions,
        callback: impl FnMut(ElementId) + 'static,
    ) {
        tracing::debug!(%element, threshold = options.threshold.value(), mode = ?options.mode, "watching element");
        self.watches.push(Watch {
            element,
            bounds,
            options,
            triggered: false,
            above: false,
            callback: Box::new(callback),
        });
    }

    /// Stops observing every watch on `element`. Unknown elements are a no-op.
    pub fn unregister(&mut self, element: ElementId) {
        self.watches.retain(|w| w.element != element);
    }

    /// Updates an element's bounds after a layout change.
    pub fn set_bounds(&mut self, element: ElementId, bounds: Rect) {
        for watch in self.watches.iter_mut().filter(|w| w.element == element) {
            watch.bounds = bounds;
        }
    }

    /// Makes fired one-shot watches on `element` eligible again. The element
    /// has to leave and re-enter (or be evaluated while visible) to refire.
    pub fn rearm(&mut self, element: ElementId) {
        for watch in self.watches.iter_mut().filter(|w| w.element == element) {
            watch.triggered = false;
            watch.above = false;
        }
    }

    /// True if any one-shot watch on `element` has fired.
    #[must_use]
    pub fn is_triggered(&self, element: ElementId) -> bool {
        self.watches.iter().any(|w| w.element == element && w.triggered)
    }

    /// True if `element` has any registration.
    #[must_use]
    pub fn is_watched(&self, element: ElementId) -> bool {
        self.watches.iter().any(|w| w.element == element)
    }

    /// Every watched element, once per registration.
    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.watches.iter().map(|w| w.element)
    }

    /// Watches still waiting to fire or repeating.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.watches.iter().filter(|w| !w.triggered).count()
    }

    /// Re-checks every live watch against `viewport` (document coordinates)
    /// and fires callbacks for upward crossings. Returns how many fired.
    pub fn evaluate(&mut self, viewport: Rect) -> usize {
        let mut fired = 0;

        for watch in &mut self.watches {
            if watch.triggered {
                continue;
            }

            let area = watch.options.root_margin.apply(viewport);
            let fraction = visible_fraction(watch.bounds, area);
            let above = fraction > 0.0 && fraction >= watch.options.threshold.value();
            let crossed = above && !watch.above;
            watch.above = above;

            if crossed {
                if watch.options.mode == TriggerMode::Once {
                    watch.triggered = true;
                }
                tracing::debug!(element = %watch.element, fraction, "element became visible");
                (watch.callback)(watch.element);
                fired += 1;
            }
        }

        fired
    }
}

impl fmt::Debug for VisibilityEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityEngine")
            .field("watches", &self.watches.len())
            .field("active", &self.active_count())
            .finish()
    }
}
