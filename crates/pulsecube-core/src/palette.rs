//! The palette: every color channel the theme interpolator drives.
//!
//! A [`Palette`] is owned by the [`Cube`](crate::cube::Cube) and replaced only
//! through [`Cube::set_palette`](crate::cube::Cube::set_palette). Renderers read
//! it to configure lights, layer materials, bloom and fog.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::Gradient;

/// A colored light with a scalar intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// Linear light color.
    pub color: Vec3,
    /// Intensity (renderer units; the fill light is a point light and uses larger values).
    pub intensity: f32,
}

impl Light {
    /// Creates a light.
    #[must_use]
    pub fn new(color: Vec3, intensity: f32) -> Self {
        Self { color, intensity }
    }

    /// Linearly interpolates color and intensity.
    #[must_use]
    pub fn lerp(&self, other: &Light, t: f32) -> Light {
        Light {
            color: self.color.lerp(other.color, t),
            intensity: self.intensity + (other.intensity - self.intensity) * t,
        }
    }
}

/// The four scene lights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    /// Directional key light, below and in front of the cube.
    pub key: Light,
    /// Directional side light.
    pub side: Light,
    /// Point fill light above the cube.
    pub fill: Light,
    /// Ambient term.
    pub ambient: Light,
}

impl Lighting {
    /// Interpolates every light.
    #[must_use]
    pub fn lerp(&self, other: &Lighting, t: f32) -> Lighting {
        Lighting {
            key: self.key.lerp(&other.key, t),
            side: self.side.lerp(&other.side, t),
            fill: self.fill.lerp(&other.fill, t),
            ambient: self.ambient.lerp(&other.ambient, t),
        }
    }
}

/// Material shared by every cubelet of one Y layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerMaterial {
    /// Linear base color.
    pub color: Vec3,
    /// Metalness (0.0 - 1.0).
    pub metalness: f32,
    /// Roughness (0.0 - 1.0).
    pub roughness: f32,
    /// Environment map contribution.
    pub env_map_intensity: f32,
}

impl LayerMaterial {
    /// Creates the standard glossy cubelet material in the given color.
    #[must_use]
    pub fn new(color: Vec3) -> Self {
        Self {
            color,
            metalness: 0.04,
            roughness: 0.22,
            env_map_intensity: 1.0,
        }
    }
}

/// Complete set of theme-driven channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Scene lights.
    pub lighting: Lighting,
    /// One material per Y layer, bottom first.
    pub layers: Vec<LayerMaterial>,
    /// Bloom post-process strength.
    pub bloom_strength: f32,
    /// Fog and background color.
    pub fog_color: Vec3,
}

impl Palette {
    /// Creates a palette whose layers follow `gradient` for an `n`-layer grid.
    #[must_use]
    pub fn new(lighting: Lighting, gradient: &Gradient, n: usize, bloom_strength: f32, fog_color: Vec3) -> Self {
        Self {
            lighting,
            layers: gradient.layers(n).into_iter().map(LayerMaterial::new).collect(),
            bloom_strength,
            fog_color,
        }
    }

    /// Per-layer colors, bottom first.
    #[must_use]
    pub fn layer_colors(&self) -> Vec<Vec3> {
        self.layers.iter().map(|m| m.color).collect()
    }

    /// Replaces the layer materials with a fresh `n`-layer gradient.
    pub fn regrade(&mut self, gradient: &Gradient, n: usize) {
        self.layers = gradient.layers(n).into_iter().map(LayerMaterial::new).collect();
    }

    /// Resamples the existing layer colors to `n` layers, keeping the end colors.
    pub fn resample_layers(&mut self, n: usize) {
        if self.layers.len() == n {
            return;
        }
        let gradient = Gradient::from_layers(&self.layer_colors())
            .unwrap_or_else(|| Gradient::new(Vec3::ONE, Vec3::ONE));
        self.regrade(&gradient, n);
    }

    /// Interpolates every channel from `self` toward `other`.
    ///
    /// Layer colors are paired by index; if the layer counts differ, the target
    /// layers are used unchanged.
    #[must_use]
    pub fn lerp(&self, other: &Palette, t: f32) -> Palette {
        let layers = if self.layers.len() == other.layers.len() {
            self.layers
                .iter()
                .zip(&other.layers)
                .map(|(a, b)| LayerMaterial {
                    color: a.color.lerp(b.color, t),
                    ..*b
                })
                .collect()
        } else {
            other.layers.clone()
        };
        Palette {
            lighting: self.lighting.lerp(&other.lighting, t),
            layers,
            bloom_strength: self.bloom_strength + (other.bloom_strength - self.bloom_strength) * t,
            fog_color: self.fog_color.lerp(other.fog_color, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lighting(v: f32) -> Lighting {
        let l = Light::new(Vec3::splat(v), v);
        Lighting {
            key: l,
            side: l,
            fill: l,
            ambient: l,
        }
    }

    fn palette(v: f32, n: usize) -> Palette {
        Palette::new(
            lighting(v),
            &Gradient::new(Vec3::ZERO, Vec3::splat(v)),
            n,
            v,
            Vec3::splat(v),
        )
    }

    #[test]
    fn test_layer_material_defaults() {
        let m = LayerMaterial::new(Vec3::ONE);
        assert_eq!(m.metalness, 0.04);
        assert_eq!(m.roughness, 0.22);
        assert_eq!(m.env_map_intensity, 1.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = palette(0.0, 3);
        let b = palette(1.0, 3);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        let mid = a.lerp(&b, 0.5);
        assert!((mid.bloom_strength - 0.5).abs() < 1e-6);
        assert!((mid.lighting.fill.intensity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_with_mismatched_layers_uses_target() {
        let a = palette(0.0, 2);
        let b = palette(1.0, 4);
        assert_eq!(a.lerp(&b, 0.3).layers, b.layers);
    }

    #[test]
    fn test_resample_keeps_end_colors() {
        let mut p = palette(1.0, 3);
        let bottom = p.layers[0].color;
        let top = p.layers[2].color;
        p.resample_layers(5);
        assert_eq!(p.layers.len(), 5);
        assert!((p.layers[0].color - bottom).length() < 1e-6);
        assert!((p.layers[4].color - top).length() < 1e-6);
    }
}
