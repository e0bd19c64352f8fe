//! # Folio Core
//!
//! The page model shared by every folio crate:
//!
//! - `geometry`: rects and validated canvas bounds
//! - `context`: viewport, pointer and scroll, with one writer per field
//! - `config`: TOML configuration loaded once at startup
//! - `theme`: the persisted dark/light preference
//! - `error`: the setup-time error type
//!
//! Nothing in here draws or schedules anything.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod context;
pub mod error;
pub mod geometry;
pub mod rng;
pub mod theme;

pub use config::FolioConfig;
pub use context::{PageContext, Pointer, Viewport};
pub use error::{FolioError, FolioResult};
pub use geometry::{Bounds, Rect};
pub use rng::{rng_from_seed, FolioRng};
pub use theme::{FileStore, MemoryStore, PreferenceStore, Theme, ThemeState, THEME_KEY};
