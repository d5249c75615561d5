//! Easing curves.

use std::f32::consts::PI;

/// Cosine ease-in-out used for face turns: `(1 - cos(pi t)) / 2`.
#[must_use]
pub fn turn(t: f32) -> f32 {
    (1.0 - (PI * t).cos()) / 2.0
}

/// Quadratic ease-in-out used for theme cross-fades.
#[must_use]
pub fn theme(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}
