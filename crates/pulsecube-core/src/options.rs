//! Configuration options for a simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::theme::{ThemeName, AUTO_CYCLE_INTERVAL};

/// Startup configuration for a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Disables face turns and breathing.
    pub reduced_motion: bool,

    /// Whether the input device can hover; without it pointer proximity is ignored.
    pub has_hover: bool,

    /// Initial theme; overrides the persisted one when set.
    pub theme: Option<ThemeName>,

    /// Whether the theme advances automatically.
    pub auto_cycle: bool,

    /// Seconds between automatic theme advances.
    pub auto_cycle_interval: f32,

    /// Seed for the random source (phase offsets and move selection).
    pub seed: Option<u64>,

    /// Initial viewport width in CSS pixels.
    pub initial_width: f32,

    /// Initial viewport height in CSS pixels.
    pub initial_height: f32,

    /// Initial device pixel ratio.
    pub device_pixel_ratio: f32,

    /// Frames per second of the worker's frame source.
    pub frame_rate: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            has_hover: true,
            theme: None,
            auto_cycle: true,
            auto_cycle_interval: AUTO_CYCLE_INTERVAL,
            seed: None,
            initial_width: 1280.0,
            initial_height: 800.0,
            device_pixel_ratio: 1.0,
            frame_rate: 60,
        }
    }
}

impl Options {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Sets the reduced-motion flag.
    #[must_use]
    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    /// Sets the hover capability.
    #[must_use]
    pub fn with_hover(mut self, has_hover: bool) -> Self {
        self.has_hover = has_hover;
        self
    }

    /// Sets the initial theme.
    #[must_use]
    pub fn with_theme(mut self, theme: ThemeName) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Enables or disables the theme auto-cycle.
    #[must_use]
    pub fn with_auto_cycle(mut self, auto_cycle: bool) -> Self {
        self.auto_cycle = auto_cycle;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the initial viewport.
    #[must_use]
    pub fn with_viewport(mut self, width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        self.initial_width = width;
        self.initial_height = height;
        self.device_pixel_ratio = device_pixel_ratio;
        self
    }
}
