//! File-backed theme persistence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pulsecube_core::{Host, Result, ThemeName};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct StoredTheme {
    theme: String,
}

/// Persists the last explicitly chosen theme as `{"theme": "<name>"}`.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    /// Creates a store backed by `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored theme name; `None` if nothing has been saved yet.
    pub fn load(&self) -> Result<Option<String>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let stored: StoredTheme = serde_json::from_str(&text)?;
        Ok(Some(stored.theme))
    }

    /// Writes `theme`, creating parent directories as needed.
    pub fn save(&self, theme: ThemeName) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredTheme {
            theme: theme.as_str().to_string(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        Ok(())
    }
}

impl Host for FileThemeStore {
    fn load_theme(&mut self) -> Option<String> {
        self.load().unwrap_or_else(|err| {
            log::warn!("could not read theme from {}: {err}", self.path.display());
            None
        })
    }

    fn store_theme(&mut self, theme: ThemeName) {
        if let Err(err) = self.save(theme) {
            log::warn!("could not save theme to {}: {err}", self.path.display());
        }
    }
}
