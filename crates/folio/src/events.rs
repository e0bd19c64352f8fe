//! # Page Event Channels
//!
//! ```text
//! ┌──────────┐  PageEvent (bounded)   ┌──────┐  PresentationChange (unbounded)  ┌──────────┐
//! │   Host   │ ─────────────────────> │ Page │ ───────────────────────────────> │   Host   │
//! │ (input)  │                        └──────┘                                  │ (render) │
//! └──────────┘                                                                  └──────────┘
//! ```
//!
//! Inbound events are dropped when the queue is full so input bursts never
//! stall a frame. Outbound changes are never dropped; the host drains them
//! after every frame.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use folio_ui::{ElementId, Field, NotificationId, NotificationKind};

use crate::layout::PageLayout;

/// Something clickable.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickTarget {
    /// Navbar link to `#section`.
    NavLink(String),
    /// Any other in-page `#anchor` link.
    Anchor(String),
    /// Mobile menu button.
    Hamburger,
    /// Dark/light switch.
    ThemeToggle,
    /// Back-to-top button.
    BackToTop,
    /// The footer easter egg.
    FooterEasterEgg,
    /// Close button of a toast.
    NotificationClose(NotificationId),
    /// Link opening in a new tab.
    ExternalLink(String),
    /// Gallery tile (press feedback).
    GalleryItem(ElementId),
}

/// Input from the host page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Window resized.
    Resize {
        /// New width (px).
        width: u32,
        /// New height (px).
        height: u32,
    },
    /// Pointer moved (viewport coordinates).
    PointerMove {
        /// X (px).
        x: f32,
        /// Y (px).
        y: f32,
    },
    /// Document scrolled.
    Scroll {
        /// New vertical offset (px).
        y: f32,
    },
    /// Key pressed (`KeyboardEvent.code`).
    KeyDown {
        /// Key code, e.g. `"ArrowUp"`.
        code: String,
    },
    /// Click.
    Click(ClickTarget),
    /// Pointer entered an interactive element.
    HoverEnter(ElementId),
    /// Pointer left an interactive element.
    HoverLeave(ElementId),
    /// Finger down.
    TouchStart {
        /// X (px).
        x: f32,
        /// Y (px).
        y: f32,
    },
    /// Finger up.
    TouchEnd {
        /// X (px).
        x: f32,
        /// Y (px).
        y: f32,
    },
    /// Contact field focused.
    FieldFocus(Field),
    /// Contact field blurred.
    FieldBlur(Field),
    /// Contact field edited.
    FieldInput(Field, String),
    /// Contact form submitted.
    Submit,
    /// The page reflowed.
    LayoutChanged(Box<PageLayout>),
}

/// Page element a change applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// `<body>`.
    Body,
    /// Top navigation bar.
    Navbar,
    /// Mobile menu button.
    Hamburger,
    /// Mobile menu.
    NavMenu,
    /// Navbar link to a section.
    NavLink(String),
    /// Scroll progress bar.
    ScrollProgress,
    /// Back-to-top button.
    BackToTop,
    /// Loading screen.
    Preloader,
    /// Loading screen progress bar.
    PreloaderProgress,
    /// Hero block.
    Hero,
    /// Typed role line in the hero.
    RoleText,
    /// Custom cursor.
    Cursor,
    /// Decorative parallax shape by index.
    Shape(usize),
    /// A measured layout element.
    Element(ElementId),
    /// Contact input.
    Field(Field),
    /// Wrapper around a contact input.
    FieldGroup(Field),
    /// Contact submit button.
    SubmitButton,
}

/// Instruction for the host to update what is on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationChange {
    /// Add a CSS class.
    AddClass(Target, &'static str),
    /// Remove a CSS class.
    RemoveClass(Target, &'static str),
    /// Set `width` in percent.
    SetWidthPercent(Target, f32),
    /// Replace text content.
    SetText(Target, String),
    /// Set `transform`; empty clears it.
    SetTransform(Target, String),
    /// Set `animation`; empty clears it.
    SetAnimation(Target, String),
    /// Move to viewport coordinates.
    SetPosition(Target, f32, f32),
    /// Show or hide entirely.
    SetVisible(Target, bool),
    /// Enable or disable.
    SetDisabled(Target, bool),
    /// Clear every contact input.
    ResetForm,
    /// Scroll the document to this offset (one step of a smooth scroll).
    ScrollTo(f32),
    /// Append a toast.
    ShowNotification {
        /// Toast handle.
        id: NotificationId,
        /// Style.
        kind: NotificationKind,
        /// Icon class.
        icon: &'static str,
        /// Text.
        message: String,
    },
    /// Slide a toast out.
    DismissNotification(NotificationId),
    /// Remove a toast from the page.
    RemoveNotification(NotificationId),
    /// Navigate to a URL.
    OpenUrl(String),
    /// Lock or unlock body scrolling.
    LockScroll(bool),
}

/// Bounded inbound queue.
pub struct EventBus;

impl EventBus {
    /// Default inbound capacity.
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Creates a connected sender/receiver pair.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let (sender, receiver) = bounded(capacity);
        (EventSender { sender }, EventReceiver { receiver })
    }
}

/// Handle for sending events into a page.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: Sender<PageEvent>,
}

impl EventSender {
    /// Queues an event without blocking.
    ///
    /// Returns `false` if the event was dropped (queue full or page gone).
    #[inline]
    pub fn send(&self, event: PageEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!(?event, "page event queue full, dropping event");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Receiving end owned by the page.
#[derive(Debug)]
pub struct EventReceiver {
    receiver: Receiver<PageEvent>,
}

impl EventReceiver {
    /// Takes every pending event.
    #[inline]
    pub fn drain(&self) -> Vec<PageEvent> {
        self.receiver.try_iter().collect()
    }

    /// Number of queued events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

/// Creates the outbound change channel.
#[must_use]
pub fn change_channel() -> (ChangeSink, ChangeReceiver) {
    let (sender, receiver) = unbounded();
    (ChangeSink { sender }, ChangeReceiver { receiver })
}

/// Page side of the outbound channel.
#[derive(Debug, Clone)]
pub struct ChangeSink {
    sender: Sender<PresentationChange>,
}

impl ChangeSink {
    /// Emits a change. Changes with no host listening are discarded.
    #[inline]
    pub fn emit(&self, change: PresentationChange) {
        // A disconnected receiver means nobody renders the page any more.
        let _ = self.sender.send(change);
    }
}

/// Host side of the outbound channel.
#[derive(Debug, Clone)]
pub struct ChangeReceiver {
    receiver: Receiver<PresentationChange>,
}

impl ChangeReceiver {
    /// Takes every pending change, oldest first.
    #[inline]
    pub fn drain(&self) -> Vec<PresentationChange> {
        self.receiver.try_iter().collect()
    }

    /// True if nothing is pending.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_queue_drops() {
        let (tx, rx) = EventBus::create_pair(2);
        assert!(tx.send(PageEvent::Submit));
        assert!(tx.send(PageEvent::Scroll { y: 1.0 }));
        assert!(!tx.send(PageEvent::Submit));
        assert_eq!(rx.pending_count(), 2);
        assert_eq!(rx.drain(), vec![PageEvent::Submit, PageEvent::Scroll { y: 1.0 }]);
        assert_eq!(rx.pending_count(), 0);
    }

    #[test]
    fn test_send_after_page_dropped() {
        let (tx, rx) = EventBus::create_pair(4);
        drop(rx);
        assert!(!tx.send(PageEvent::Submit));
    }

    #[test]
    fn test_changes_keep_order() {
        let (sink, changes) = change_channel();
        sink.emit(PresentationChange::LockScroll(true));
        sink.emit(PresentationChange::ScrollTo(10.0));
        assert_eq!(
            changes.drain(),
            vec![PresentationChange::LockScroll(true), PresentationChange::ScrollTo(10.0)]
        );
        assert!(changes.is_empty());
    }
}
