//! Theme presets, the theme cross-fade interpolator and the auto-cycle timer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{from_hex, Gradient};
use crate::ease;
use crate::error::PulseError;
use crate::palette::{Light, Lighting, Palette};

/// Duration of a theme cross-fade in seconds.
pub const THEME_TRANSITION_DURATION: f32 = 1.4;

/// Default auto-cycle interval in seconds.
pub const AUTO_CYCLE_INTERVAL: f32 = 15.0;

/// Name of a built-in theme preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Warm terracotta.
    #[default]
    Dusk,
    /// Cold blue.
    Tide,
    /// Green.
    Moss,
    /// Greyscale.
    Void,
}

impl ThemeName {
    /// All themes in auto-cycle order.
    pub const ALL: [ThemeName; 4] = [
        ThemeName::Dusk,
        ThemeName::Tide,
        ThemeName::Moss,
        ThemeName::Void,
    ];

    /// Returns the lower-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Dusk => "dusk",
            ThemeName::Tide => "tide",
            ThemeName::Moss => "moss",
            ThemeName::Void => "void",
        }
    }

    /// Returns the theme following this one in auto-cycle order.
    #[must_use]
    pub fn next(self) -> ThemeName {
        match self {
            ThemeName::Dusk => ThemeName::Tide,
            ThemeName::Tide => ThemeName::Moss,
            ThemeName::Moss => ThemeName::Void,
            ThemeName::Void => ThemeName::Dusk,
        }
    }

    /// Returns the preset values for this theme.
    #[must_use]
    pub fn preset(self) -> &'static ThemePreset {
        match self {
            ThemeName::Dusk => &DUSK,
            ThemeName::Tide => &TIDE,
            ThemeName::Moss => &MOSS,
            ThemeName::Void => &VOID,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dusk" => Ok(ThemeName::Dusk),
            "tide" => Ok(ThemeName::Tide),
            "moss" => Ok(ThemeName::Moss),
            "void" => Ok(ThemeName::Void),
            other => Err(PulseError::UnknownTheme(other.to_string())),
        }
    }
}

/// Immutable theme values, colors as sRGB hex literals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePreset {
    /// Fog and page background.
    pub background: u32,
    /// Bottom layer color.
    pub cube_bottom: u32,
    /// Top layer color.
    pub cube_top: u32,
    /// Key light color and intensity.
    pub key: (u32, f32),
    /// Side light color and intensity.
    pub side: (u32, f32),
    /// Fill light color and intensity.
    pub fill: (u32, f32),
    /// Ambient light color and intensity.
    pub ambient: (u32, f32),
    /// Bloom strength.
    pub bloom_strength: f32,
}

const DUSK: ThemePreset = ThemePreset {
    background: 0x13_0d0a,
    cube_bottom: 0xbe_7858,
    cube_top: 0xf2_e2d8,
    key: (0xff_dcc8, 1.6),
    side: (0xc8_d8ff, 1.4),
    fill: (0xff_5040, 40.0),
    ambient: (0xff_ecd8, 0.4),
    bloom_strength: 0.45,
};

const TIDE: ThemePreset = ThemePreset {
    background: 0x09_0e15,
    cube_bottom: 0x3a_6888,
    cube_top: 0xc8_dce8,
    key: (0xc8_e0ff, 1.8),
    side: (0xff_d8c0, 1.2),
    fill: (0x20_60c0, 48.0),
    ambient: (0xd0_e8f8, 0.4),
    bloom_strength: 0.55,
};

const MOSS: ThemePreset = ThemePreset {
    background: 0x09_0d0a,
    cube_bottom: 0x4a_7858,
    cube_top: 0xc8_e0d0,
    key: (0xd0_ffe0, 1.5),
    side: (0xff_d8c0, 1.2),
    fill: (0x30_b060, 38.0),
    ambient: (0xd0_f8e0, 0.4),
    bloom_strength: 0.40,
};

const VOID: ThemePreset = ThemePreset {
    background: 0x0d_0d0d,
    cube_bottom: 0x38_3838,
    cube_top: 0xd8_d8d8,
    key: (0xff_ffff, 1.5),
    side: (0xdd_e0ff, 1.1),
    fill: (0x88_8888, 35.0),
    ambient: (0xff_ffff, 0.35),
    bloom_strength: 0.30,
};

impl ThemePreset {
    /// Layer gradient of this preset.
    #[must_use]
    pub fn gradient(&self) -> Gradient {
        Gradient::from_hex(self.cube_bottom, self.cube_top)
    }

    /// Light setup of this preset.
    #[must_use]
    pub fn lighting(&self) -> Lighting {
        let light = |(hex, intensity): (u32, f32)| Light::new(from_hex(hex), intensity);
        Lighting {
            key: light(self.key),
            side: light(self.side),
            fill: light(self.fill),
            ambient: light(self.ambient),
        }
    }

    /// Resolves the preset into a full palette for an `n`-layer grid.
    #[must_use]
    pub fn palette(&self, n: usize) -> Palette {
        Palette::new(
            self.lighting(),
            &self.gradient(),
            n,
            self.bloom_strength,
            from_hex(self.background),
        )
    }
}

/// An in-flight cross-fade between two palettes.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeTransition {
    /// Snapshot taken when the transition started.
    pub from: Palette,
    /// Fully resolved target.
    pub to: Palette,
    /// Linear progress in `[0, 1]`.
    pub progress: f32,
}

impl ThemeTransition {
    /// Interpolated palette at the current progress.
    #[must_use]
    pub fn current(&self) -> Palette {
        if self.progress >= 1.0 {
            return self.to.clone();
        }
        self.from.lerp(&self.to, ease::theme(self.progress))
    }
}

/// Current theme plus the optional in-flight transition.
#[derive(Debug, Clone, Default)]
pub struct ThemeState {
    current: ThemeName,
    transition: Option<ThemeTransition>,
}

impl ThemeState {
    /// Creates a state showing `theme` with no transition.
    #[must_use]
    pub fn new(theme: ThemeName) -> Self {
        Self {
            current: theme,
            transition: None,
        }
    }

    /// The theme most recently requested.
    #[must_use]
    pub fn current(&self) -> ThemeName {
        self.current
    }

    /// The in-flight transition, if any.
    #[must_use]
    pub fn transition(&self) -> Option<&ThemeTransition> {
        self.transition.as_ref()
    }

    /// Whether a cross-fade is running.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Jumps to `theme` without a transition, returning the palette to apply.
    pub fn init(&mut self, theme: ThemeName, n: usize) -> Palette {
        self.current = theme;
        self.transition = None;
        theme.preset().palette(n)
    }

    /// Starts a cross-fade from `shown` (the palette currently displayed) toward `theme`.
    ///
    /// Returns `false` when `theme` is already current and nothing is in flight.
    pub fn begin(&mut self, theme: ThemeName, shown: &Palette, n: usize) -> bool {
        if theme == self.current && self.transition.is_none() {
            return false;
        }
        self.transition = Some(ThemeTransition {
            from: shown.clone(),
            to: theme.preset().palette(n),
            progress: 0.0,
        });
        self.current = theme;
        true
    }

    /// Advances the cross-fade and returns the palette to apply this frame.
    pub fn tick(&mut self, dt: f32) -> Option<Palette> {
        let transition = self.transition.as_mut()?;
        transition.progress = (transition.progress + dt / THEME_TRANSITION_DURATION).min(1.0);
        let palette = transition.current();
        if transition.progress >= 1.0 {
            self.transition = None;
        }
        Some(palette)
    }

    /// Resizes the in-flight gradients after a rebuild to `n` layers.
    pub fn regrid(&mut self, n: usize) {
        if let Some(transition) = self.transition.as_mut() {
            transition.from.resample_layers(n);
            transition.to.regrade(&self.current.preset().gradient(), n);
        }
    }
}

/// Fixed-interval timer advancing through [`ThemeName::ALL`].
#[derive(Debug, Clone)]
pub struct ThemeCycle {
    interval: f32,
    elapsed: f32,
}

impl ThemeCycle {
    /// Creates a cycle firing every `interval` seconds.
    ///
    /// Zero, negative or non-finite intervals fall back to [`AUTO_CYCLE_INTERVAL`].
    #[must_use]
    pub fn new(interval: f32) -> Self {
        let interval = if interval.is_finite() && interval > 0.0 {
            interval
        } else {
            AUTO_CYCLE_INTERVAL
        };
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Advances the timer; returns `true` once per elapsed interval.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            true
        } else {
            false
        }
    }
}

impl Default for ThemeCycle {
    fn default() -> Self {
        Self::new(AUTO_CYCLE_INTERVAL)
    }
}
