//! Host capability: what a simulation may ask of its execution context.
//!
//! The simulation never touches windows, storage or threads directly. A host
//! implementation supplies the persisted theme and receives theme changes, and
//! tells the core whether it is running on a background worker.

use crate::theme::ThemeName;

/// Who asked for a theme change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeOrigin {
    /// An explicit user pick.
    User,
    /// The periodic auto-cycle.
    AutoCycle,
}

/// Capabilities supplied by the execution context.
pub trait Host {
    /// Whether the simulation runs on a background worker thread.
    fn is_worker(&self) -> bool {
        false
    }

    /// Last persisted theme name, if any.
    fn load_theme(&mut self) -> Option<String> {
        None
    }

    /// Persists an explicitly chosen theme.
    fn store_theme(&mut self, _theme: ThemeName) {}

    /// Notified whenever the current theme changes.
    fn theme_changed(&mut self, _theme: ThemeName, _origin: ThemeOrigin) {}
}

/// In-memory host for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    /// Last stored theme.
    pub stored: Option<ThemeName>,
    /// Every change notification received, oldest first.
    pub changes: Vec<(ThemeName, ThemeOrigin)>,
}

impl HeadlessHost {
    /// Creates a host with nothing persisted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host that reports `theme` as persisted.
    #[must_use]
    pub fn with_stored(theme: ThemeName) -> Self {
        Self {
            stored: Some(theme),
            changes: Vec::new(),
        }
    }
}

impl Host for HeadlessHost {
    fn load_theme(&mut self) -> Option<String> {
        self.stored.map(|t| t.as_str().to_string())
    }

    fn store_theme(&mut self, theme: ThemeName) {
        self.stored = Some(theme);
    }

    fn theme_changed(&mut self, theme: ThemeName, origin: ThemeOrigin) {
        self.changes.push((theme, origin));
    }
}

impl<H: Host + ?Sized> Host for Box<H> {
    fn is_worker(&self) -> bool {
        (**self).is_worker()
    }

    fn load_theme(&mut self) -> Option<String> {
        (**self).load_theme()
    }

    fn store_theme(&mut self, theme: ThemeName) {
        (**self).store_theme(theme);
    }

    fn theme_changed(&mut self, theme: ThemeName, origin: ThemeOrigin) {
        (**self).theme_changed(theme, origin);
    }
}
