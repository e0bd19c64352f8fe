//! # Folio UI
//!
//! Page effects as plain state machines. Nothing in this crate touches a
//! DOM: components take geometry and elapsed time, and report what should
//! change on screen.
//!
//! ```text
//! ┌──────────────┐  scroll/resize  ┌──────────────────┐  callback  ┌─────────────┐
//! │ PageContext  │ ──────────────> │ VisibilityEngine │ ─────────> │ CounterRamp │
//! └──────────────┘                 └──────────────────┘            │ reveal, bar │
//!                                                                  └─────────────┘
//! dt ──> TypingEffect, Preloader, NotificationCenter, ContactForm, Timers
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod animation;
pub mod contact;
pub mod counter;
pub mod easter;
pub mod input;
pub mod navigation;
pub mod notify;
pub mod preloader;
pub mod timer;
pub mod typing;
pub mod visibility;

pub use animation::SmoothScroll;
pub use contact::{ContactForm, Field, FormChange};
pub use counter::CounterRamp;
pub use easter::{EasterEggEvent, EasterEggs};
pub use input::{CursorState, SwipeDetector};
pub use navigation::{NavChange, NavigationState, Section};
pub use notify::{Notification, NotificationCenter, NotificationEvent, NotificationId, NotificationKind};
pub use preloader::{Preloader, PreloaderEvent};
pub use timer::{TimerId, Timers};
pub use typing::TypingEffect;
pub use visibility::{ElementId, RootMargin, Threshold, TriggerMode, VisibilityEngine, WatchOptions};
