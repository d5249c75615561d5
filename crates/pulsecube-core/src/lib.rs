//! Simulation core for pulsecube.
//!
//! This crate holds everything that animates the cube and nothing that draws it:
//! - [`Cube`] and the grid model: N³ cubelets, layer materials, the move table
//! - [`TurnEngine`] for randomized face turns
//! - the breathing wave and pointer [`Proximity`]
//! - [`ThemeState`] cross-fades between [`ThemeName`] presets
//! - [`Orbit`] and [`Camera`]
//! - [`Simulation`], the owned context tying them together behind a [`Host`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Options structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Geometry code names many related values alike (theta/phi, near/far)
#![allow(clippy::similar_names)]

pub mod breathe;
pub mod camera;
pub mod color;
pub mod cube;
pub mod ease;
pub mod error;
pub mod grid;
pub mod host;
pub mod instance;
pub mod options;
pub mod orbit;
pub mod palette;
pub mod pick;
pub mod simulation;
pub mod theme;
pub mod turn;

pub use breathe::Proximity;
pub use camera::Camera;
pub use color::Gradient;
pub use cube::{Attachment, Cube, Cubelet, Move, Pivot};
pub use error::{PulseError, Result};
pub use grid::{grid_size_for_width, Axis, CUBELET_RADIUS, CUBELET_SIZE, MAX_GRID, STEP};
pub use host::{HeadlessHost, Host, ThemeOrigin};
pub use instance::CubeletInstance;
pub use options::Options;
pub use orbit::Orbit;
pub use palette::{LayerMaterial, Light, Lighting, Palette};
pub use pick::{BoundingSphere, Ray};
pub use simulation::{Simulation, Viewport};
pub use theme::{ThemeCycle, ThemeName, ThemePreset, ThemeState, ThemeTransition};
pub use turn::{TurnAnimation, TurnEngine, TurnState};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
