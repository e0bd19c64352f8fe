//! Toast notifications.
//!
//! A toast lives for `lifetime` seconds (or until closed), slides out for
//! `exit_duration`, then is removed.

use std::fmt;

use folio_core::config::NotificationConfig;

/// Toast style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    /// Green check.
    Success,
    /// Red circle.
    Error,
    /// Amber triangle.
    Warning,
    /// Blue circle.
    #[default]
    Info,
}

impl NotificationKind {
    /// Icon class shown next to the message.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "fas fa-check-circle",
            Self::Error => "fas fa-exclamation-circle",
            Self::Warning => "fas fa-exclamation-triangle",
            Self::Info => "fas fa-info-circle",
        }
    }

    /// Lowercase name used in the toast's class (`notification-success`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

/// Lifecycle transitions reported by [`NotificationCenter::update`] and
/// [`NotificationCenter::close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationEvent {
    /// Started sliding out.
    Dismissed(NotificationId),
    /// Gone from the page.
    Removed(NotificationId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Showing { remaining: f32 },
    Exiting { remaining: f32 },
}

/// A toast on screen.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Handle.
    pub id: NotificationId,
    /// Style.
    pub kind: NotificationKind,
    /// Text shown.
    pub message: String,
    phase: Phase,
}

impl Notification {
    /// True once the slide-out has started.
    #[must_use]
    pub fn is_dismissed(&self) -> bool {
        matches!(self.phase, Phase::Exiting { .. })
    }
}

/// Owns every toast currently on the page.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    config: NotificationConfig,
    toasts: Vec<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    /// Creates an empty center.
    #[must_use]
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            toasts: Vec::new(),
            next_id: 0,
        }
    }

    /// Adds a toast.
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        let message = message.into();
        tracing::debug!(id = id.0, %kind, %message, "notification shown");
        self.toasts.push(Notification {
            id,
            kind,
            message,
            phase: Phase::Showing {
                remaining: self.config.lifetime,
            },
        });
        id
    }

    /// Starts the slide-out early. Returns the event if the toast was still
    /// showing.
    pub fn close(&mut self, id: NotificationId) -> Option<NotificationEvent> {
        let toast = self.toasts.iter_mut().find(|t| t.id == id)?;
        match toast.phase {
            Phase::Showing { .. } => {
                toast.phase = Phase::Exiting {
                    remaining: self.config.exit_duration,
                };
                Some(NotificationEvent::Dismissed(id))
            }
            Phase::Exiting { .. } => None,
        }
    }

    /// Toasts on screen, oldest first.
    #[must_use]
    pub fn active(&self) -> &[Notification] {
        &self.toasts
    }

    /// Looks up a toast.
    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.toasts.iter().find(|t| t.id == id)
    }

    /// Advances every toast by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> Vec<NotificationEvent> {
        let mut events = Vec::new();
        let exit_duration = self.config.exit_duration;

        for toast in &mut self.toasts {
            let mut dt = dt;
            if let Phase::Showing { remaining } = toast.phase {
                if dt < remaining {
                    toast.phase = Phase::Showing {
                        remaining: remaining - dt,
                    };
                    continue;
                }
                dt -= remaining;
                toast.phase = Phase::Exiting {
                    remaining: exit_duration,
                };
                events.push(NotificationEvent::Dismissed(toast.id));
            }
            if let Phase::Exiting { remaining } = toast.phase {
                toast.phase = Phase::Exiting {
                    remaining: remaining - dt,
                };
                if remaining - dt <= 0.0 {
                    events.push(NotificationEvent::Removed(toast.id));
                }
            }
        }

        self.toasts
            .retain(|t| !matches!(t.phase, Phase::Exiting { remaining } if remaining <= 0.0));
        events
    }
}
