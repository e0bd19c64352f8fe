//! Theme preference.
//!
//! The only state that outlives a page visit. It is stored as the string
//! `"dark"` or `"light"` under the key [`THEME_KEY`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{FolioError, FolioResult};

/// Key the theme preference is stored under.
pub const THEME_KEY: &str = "theme";

/// Page color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Dark background (the default).
    #[default]
    Dark,
    /// Light background.
    Light,
}

impl Theme {
    /// Stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(FolioError::UnknownTheme(other.to_string())),
        }
    }
}

/// Key/value store for user preferences.
pub trait PreferenceStore {
    /// Reads a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> FolioResult<Option<String>>;

    /// Writes a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> FolioResult<()>;
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> FolioResult<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> FolioResult<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat TOML table on disk. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Uses `path` as the backing file.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_table(&self) -> FolioResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> FolioResult<Option<String>> {
        Ok(self.read_table()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> FolioResult<()> {
        let mut table = self.read_table()?;
        table.insert(key.to_string(), value.to_string());
        std::fs::write(&self.path, toml::to_string(&table)?)?;
        Ok(())
    }
}

/// Current theme plus the store it persists to.
pub struct ThemeState<S: PreferenceStore> {
    current: Theme,
    store: S,
}

impl<S: PreferenceStore> ThemeState<S> {
    /// Restores the saved theme, falling back to [`Theme::Dark`] when nothing
    /// (or nothing readable) is stored.
    pub fn load(store: S) -> Self {
        let current = match store.get(THEME_KEY) {
            Ok(Some(saved)) => saved.parse().unwrap_or_else(|err| {
                tracing::warn!(%err, "ignoring stored theme");
                Theme::Dark
            }),
            Ok(None) => Theme::Dark,
            Err(err) => {
                tracing::warn!(%err, "theme preference unreadable");
                Theme::Dark
            }
        };
        Self { current, store }
    }

    /// Active theme.
    #[must_use]
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flips the theme and persists it.
    ///
    /// The in-memory theme flips even if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the preference could not be written.
    pub fn toggle(&mut self) -> FolioResult<Theme> {
        self.current = self.current.toggled();
        self.store.set(THEME_KEY, self.current.as_str())?;
        Ok(self.current)
    }
}
