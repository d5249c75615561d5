//! pulsecube: an animated breathing cube display.
//!
//! A grid of cubelets breathes in a slow wave, swells near the pointer, and
//! every few seconds turns one of its layers like a puzzle cube. Themes
//! cross-fade the lights and layer colors.
//!
//! # Quick Start
//!
//! ```no_run
//! use pulsecube::*;
//!
//! fn main() -> std::result::Result<(), WorkerError> {
//!     init_logging();
//!
//!     let worker = Worker::spawn(Options::default(), FileThemeStore::new("theme.json"))?;
//!     worker.send(Message::Theme { name: "tide".into() })?;
//!     worker.send(Message::Tap)?;
//!
//!     for event in worker.events().iter().take(120) {
//!         if let Event::Frame(frame) = event {
//!             // upload frame.instance_bytes() and draw
//!             let _ = frame.instances.len();
//!         }
//!     }
//!     worker.shutdown()
//! }
//! ```
//!
//! # Execution contexts
//!
//! The simulation runs on exactly one thread. On the main thread, feed a
//! [`Runner`] with [`Message`]s and call [`Runner::frame`] from the display
//! callback. Off the main thread, [`Worker`] does the same on its own thread and
//! publishes [`Event`]s.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod clock;
pub mod error;
pub mod message;
pub mod runner;
pub mod store;
pub mod worker;

pub use clock::{FrameClock, FrameTime, MAX_FRAME_DT};
pub use error::{Result, WorkerError};
pub use message::{Control, Message};
pub use runner::{FrameSnapshot, Runner};
pub use store::FileThemeStore;
pub use worker::{Event, Worker, WorkerHost};

// Re-export core types
pub use pulsecube_core::{
    Camera, Cube, Cubelet, CubeletInstance, Gradient, HeadlessHost, Host, LayerMaterial, Lighting,
    Move, Options, Orbit, Palette, PulseError, Simulation, ThemeName, ThemeOrigin, Viewport,
    Mat4, Quat, Vec2, Vec3, Vec4,
};

/// Initializes `env_logger` from `RUST_LOG`. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Creates a main-thread runner with `host`.
pub fn run_local<H: Host>(options: Options, host: H) -> Runner<H> {
    log::info!("pulsecube running on the main thread");
    Runner::new(Simulation::new(options, host))
}
