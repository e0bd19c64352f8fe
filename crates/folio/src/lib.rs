//! # Folio
//!
//! Runtime for an interactive single-page portfolio. A [`Page`] owns the
//! particle background, the scroll-triggered effects and the page chrome
//! (navbar, preloader, typing hero, toasts, contact form), and is driven
//! one frame at a time by a [`folio_particles::FrameLoop`].
//!
//! ```text
//! host input ──PageEvent──> Page::frame(dt) ──PresentationChange──> host render
//!                              │
//!                              └──> ParticleLayer ──> Surface
//! ```
//!
//! The host owns the real screen. Folio never touches it directly; it only
//! reports what should change.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod events;
pub mod layout;
pub mod page;

pub use events::{
    change_channel, ChangeReceiver, ChangeSink, ClickTarget, EventBus, EventReceiver, EventSender, PageEvent,
    PresentationChange, Target,
};
pub use layout::{CounterElement, PageLayout, RevealElement, SkillBar};
pub use page::Page;
