//! Color helpers and the layer gradient.

use glam::Vec3;

/// Converts one sRGB-encoded channel to linear.
fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.077_399_38
    } else {
        (c * 0.947_867_3 + 0.052_132_7).powf(2.4)
    }
}

/// Converts one linear channel to sRGB encoding.
fn linear_to_srgb(c: f32) -> f32 {
    if c < 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(0.416_666_66) - 0.055
    }
}

/// Builds a linear color from a `0xRRGGBB` sRGB literal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn from_hex(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
}

/// Encodes a linear color back to a `0xRRGGBB` sRGB literal.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_hex(color: Vec3) -> u32 {
    let encode = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u32;
    (encode(color.x) << 16) | (encode(color.y) << 8) | encode(color.z)
}

/// A two-stop linear gradient used to color the Y layers of the cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    /// Color of the bottom layer.
    pub bottom: Vec3,
    /// Color of the top layer.
    pub top: Vec3,
}

impl Gradient {
    /// Creates a gradient from two linear colors.
    #[must_use]
    pub fn new(bottom: Vec3, top: Vec3) -> Self {
        Self { bottom, top }
    }

    /// Creates a gradient from two sRGB hex literals.
    #[must_use]
    pub fn from_hex(bottom: u32, top: u32) -> Self {
        Self::new(from_hex(bottom), from_hex(top))
    }

    /// Samples the gradient at a given value (0 to 1).
    #[must_use]
    pub fn sample(&self, t: f32) -> Vec3 {
        self.bottom.lerp(self.top, t.clamp(0.0, 1.0))
    }

    /// Returns one color per layer for an `n`-layer grid.
    ///
    /// Layer `i` samples at `i / (n - 1)`; a single layer samples the midpoint.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn layers(&self, n: usize) -> Vec<Vec3> {
        (0..n)
            .map(|i| {
                let t = if n <= 1 {
                    0.5
                } else {
                    i as f32 / (n - 1) as f32
                };
                self.sample(t)
            })
            .collect()
    }

    /// Rebuilds a gradient from existing per-layer colors (first and last entries).
    #[must_use]
    pub fn from_layers(layers: &[Vec3]) -> Option<Self> {
        match layers {
            [] => None,
            [only] => Some(Self::new(*only, *only)),
            [first, .., last] => Some(Self::new(*first, *last)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip_known_colors() {
        for hex in [0xbe7858, 0xf2e2d8, 0x130d0a, 0xffffff, 0x000000] {
            assert_eq!(to_hex(from_hex(hex)), hex);
        }
    }

    #[test]
    fn test_from_hex_is_linear() {
        let mid = from_hex(0x808080);
        // sRGB 0.5 is roughly 0.216 in linear space
        assert!((mid.x - 0.2158).abs() < 1e-3);
    }

    #[test]
    fn test_gradient_endpoints() {
        let g = Gradient::from_hex(0xbe7858, 0xf2e2d8);
        let layers = g.layers(3);
        assert_eq!(layers.len(), 3);
        assert!((layers[0] - g.bottom).length() < 1e-6);
        assert!((layers[2] - g.top).length() < 1e-6);
        assert!((layers[1] - g.sample(0.5)).length() < 1e-6);
    }

    #[test]
    fn test_single_layer_uses_midpoint() {
        let g = Gradient::new(Vec3::ZERO, Vec3::ONE);
        let layers = g.layers(1);
        assert_eq!(layers, vec![Vec3::splat(0.5)]);
    }

    #[test]
    fn test_from_layers() {
        let g = Gradient::new(Vec3::ZERO, Vec3::ONE);
        let rebuilt = Gradient::from_layers(&g.layers(4)).unwrap();
        assert!((rebuilt.bottom - g.bottom).length() < 1e-6);
        assert!((rebuilt.top - g.top).length() < 1e-6);
        assert!(Gradient::from_layers(&[]).is_none());
    }
}
