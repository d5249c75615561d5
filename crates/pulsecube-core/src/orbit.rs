//! Orbit state: spherical camera angles, radius and drag/pinch bookkeeping.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::grid::STEP;

/// Minimum distance of the polar angle from either pole.
pub const POLE_MARGIN: f32 = 0.22;

/// Seconds without dragging before the camera starts drifting.
pub const AUTO_ROTATE_DELAY: f32 = 2.5;

/// Azimuth drift speed in radians per second.
pub const AUTO_ROTATE_SPEED: f32 = 0.25;

/// Camera radius assigned when a grid is built.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn default_radius(n: usize) -> f32 {
    (n as f32 * STEP * 3.4).max(4.0)
}

/// Allowed pinch-zoom radius range for a grid.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn zoom_bounds(n: usize) -> (f32, f32) {
    let n = n as f32;
    (n * STEP * 1.8, n * STEP * 6.0)
}

/// Spherical orbit around the origin.
#[derive(Debug, Clone)]
pub struct Orbit {
    /// Azimuth angle.
    pub theta: f32,
    /// Polar angle, kept inside `(POLE_MARGIN, PI - POLE_MARGIN)`.
    pub phi: f32,
    /// Distance from the origin.
    pub radius: f32,
    dragging: bool,
    idle_time: f32,
    pinch_base: Option<f32>,
}

impl Default for Orbit {
    fn default() -> Self {
        Self {
            theta: 0.72,
            phi: 1.12,
            radius: 12.0,
            dragging: false,
            idle_time: AUTO_ROTATE_DELAY,
            pinch_base: None,
        }
    }
}

impl Orbit {
    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Starts a drag.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Applies a drag delta. Ignored unless a drag is in progress.
    pub fn drag_by(&mut self, d_theta: f32, d_phi: f32) {
        if !self.dragging || !d_theta.is_finite() || !d_phi.is_finite() {
            return;
        }
        self.theta = (self.theta + d_theta).rem_euclid(TAU);
        self.phi = (self.phi + d_phi).clamp(POLE_MARGIN, PI - POLE_MARGIN);
        self.idle_time = 0.0;
    }

    /// Ends a drag.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Starts a pinch, capturing the radius the zoom ratio scales.
    pub fn begin_pinch(&mut self) {
        self.dragging = false;
        self.pinch_base = Some(self.radius);
    }

    /// Scales the pinch base radius by `ratio`, clamped to the grid's zoom bounds.
    pub fn set_zoom_ratio(&mut self, ratio: f32, n: usize) {
        if !ratio.is_finite() || ratio <= 0.0 {
            return;
        }
        let (min_r, max_r) = zoom_bounds(n);
        let base = self.pinch_base.unwrap_or(self.radius);
        self.radius = (base * ratio).clamp(min_r, max_r);
    }

    /// Ends a pinch.
    pub fn end_pinch(&mut self) {
        self.pinch_base = None;
    }

    /// Advances idle drift: once [`AUTO_ROTATE_DELAY`] seconds have passed since
    /// the last drag movement, and no drag is held, the azimuth rotates slowly.
    ///
    /// The azimuth stays in `[0, 2pi)` so drift keeps its speed however long it runs.
    pub fn tick(&mut self, dt: f32) {
        self.idle_time = (self.idle_time + dt).min(2.0 * AUTO_ROTATE_DELAY);
        if !self.dragging && self.idle_time > AUTO_ROTATE_DELAY {
            self.theta = (self.theta + dt * AUTO_ROTATE_SPEED).rem_euclid(TAU);
        }
    }

    /// Camera position on the orbit sphere.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let r = self.radius;
        Vec3::new(
            r * self.phi.sin() * self.theta.sin(),
            r * self.phi.cos(),
            r * self.phi.sin() * self.theta.cos(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_radius() {
        assert_eq!(default_radius(0), 4.0);
        assert!((default_radius(3) - 3.0 * STEP * 3.4).abs() < 1e-5);
    }

    #[test]
    fn test_phi_clamped_away_from_poles() {
        let mut orbit = Orbit::default();
        orbit.begin_drag();
        orbit.drag_by(0.0, -10.0);
        assert_eq!(orbit.phi, POLE_MARGIN);
        orbit.drag_by(0.0, 10.0);
        assert_eq!(orbit.phi, PI - POLE_MARGIN);
    }

    #[test]
    fn test_drag_ignored_without_begin() {
        let mut orbit = Orbit::default();
        orbit.drag_by(1.0, 0.5);
        assert_eq!(orbit.theta, 0.72);
        assert_eq!(orbit.phi, 1.12);
    }

    #[test]
    fn test_zoom_clamps_to_min_radius() {
        let mut orbit = Orbit::default();
        orbit.begin_pinch();
        orbit.set_zoom_ratio(0.01, 3);
        let (min_r, _) = zoom_bounds(3);
        assert_eq!(orbit.radius, min_r);
    }

    #[test]
    fn test_zoom_scales_pinch_base() {
        let mut orbit = Orbit {
            radius: 10.0,
            ..Orbit::default()
        };
        orbit.begin_pinch();
        orbit.set_zoom_ratio(1.2, 3);
        orbit.set_zoom_ratio(1.1, 3);
        // Ratios apply to the captured base, not cumulatively
        assert!((orbit.radius - 11.0).abs() < 1e-5);
    }

    #[test]
    fn test_drifts_from_startup() {
        let mut orbit = Orbit::default();
        orbit.tick(0.5);
        assert!((orbit.theta - (0.72 + 0.125)).abs() < 1e-6);
    }

    #[test]
    fn test_drift_waits_after_drag_movement() {
        let mut orbit = Orbit::default();
        orbit.begin_drag();
        orbit.drag_by(0.1, 0.0);
        orbit.end_drag();
        let theta = orbit.theta;

        orbit.tick(2.0);
        assert_eq!(orbit.theta, theta);
        orbit.tick(1.0);
        assert!((orbit.theta - (theta + 0.25)).abs() < 1e-6);
    }

    #[test]
    fn test_held_drag_without_movement_does_not_drift() {
        let mut orbit = Orbit::default();
        orbit.begin_drag();
        orbit.tick(5.0);
        assert_eq!(orbit.theta, 0.72);
        // Pressing and releasing without moving does not restart the delay
        orbit.end_drag();
        orbit.tick(0.4);
        assert!((orbit.theta - (0.72 + 0.1)).abs() < 1e-6);
    }

    #[test]
    fn test_long_drift_keeps_speed() {
        let mut orbit = Orbit {
            theta: 140_000.0,
            ..Orbit::default()
        };
        orbit.tick(1.0 / 60.0);
        assert!((0.0..TAU).contains(&orbit.theta));

        let start = orbit.theta;
        let mut travelled = 0.0f32;
        let mut last = start;
        for _ in 0..600 {
            orbit.tick(1.0 / 60.0);
            travelled += (orbit.theta - last).rem_euclid(TAU);
            last = orbit.theta;
        }
        assert!((travelled - 2.5).abs() < 1e-2, "travelled {travelled}");
    }

    #[test]
    fn test_drag_wraps_azimuth() {
        let mut orbit = Orbit::default();
        orbit.begin_drag();
        orbit.drag_by(-1.0, 0.0);
        assert!((orbit.theta - (0.72 - 1.0 + TAU)).abs() < 1e-5);
        orbit.drag_by(100.0, 0.0);
        assert!((0.0..TAU).contains(&orbit.theta));
    }

    #[test]
    fn test_position_radius() {
        let orbit = Orbit::default();
        assert!((orbit.position().length() - orbit.radius).abs() < 1e-4);
    }
}
