//! Error types for the pulsecube facade.

use pulsecube_core::PulseError;
use thiserror::Error;

/// Errors raised by the worker host and message codec.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Failure inside the simulation core or its (de)serialization.
    #[error(transparent)]
    Core(#[from] PulseError),

    /// The worker thread could not be started.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// A frame rate of zero was configured.
    #[error("frame rate must be positive")]
    InvalidFrameRate,

    /// The worker has stopped and no longer accepts messages.
    #[error("worker has shut down")]
    Disconnected,

    /// The worker thread panicked.
    #[error("worker thread panicked")]
    Panicked,
}

/// Result type alias for facade operations.
pub type Result<T> = std::result::Result<T, WorkerError>;
