//! Error types for pulsecube.

use thiserror::Error;

/// The main error type for pulsecube operations.
///
/// Simulation methods never return these to their callers; they are produced by
/// parsing, configuration and persistence, and absorbed (logged) at the
/// simulation surface.
#[derive(Error, Debug)]
pub enum PulseError {
    /// A theme name outside the built-in preset set.
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),

    /// A grid size outside the supported range.
    #[error("invalid grid size {0} (expected 1..={max})", max = crate::grid::MAX_GRID)]
    InvalidGridSize(usize),

    /// Viewport dimensions that are zero, negative or not finite.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for pulsecube operations.
pub type Result<T> = std::result::Result<T, PulseError>;
