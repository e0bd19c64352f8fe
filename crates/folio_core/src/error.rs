//! # Folio Error Types
//!
//! Everything that can go wrong while setting a page up. Once a page is
//! running, the per-frame operations are total and never produce these.

use thiserror::Error;

/// Errors raised while configuring or initializing page components.
#[derive(Error, Debug)]
pub enum FolioError {
    /// The particle layer was started without a drawing surface.
    #[error("no rendering surface available for the particle layer")]
    MissingSurface,

    /// Canvas size with a zero side.
    #[error("invalid canvas bounds {width}x{height}: both sides must be positive")]
    InvalidBounds {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Visibility threshold outside (0, 1].
    #[error("visibility threshold {0} is outside (0, 1]")]
    InvalidThreshold(f32),

    /// A stored theme string that is neither "dark" nor "light".
    #[error("unknown theme: {0:?}")]
    UnknownTheme(String),

    /// A navigation target that is not part of the page layout.
    #[error("unknown section: {0:?}")]
    UnknownSection(String),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for FolioError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for FolioError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for folio operations.
pub type FolioResult<T> = Result<T, FolioError>;
