//! Breathing wave and pointer proximity.
//!
//! Every cubelet's scale is `base * wave(phase) * proximity`. The phase travels
//! mostly along the vertical axis, so breaths roll up through the cube; the
//! proximity multiplier swells cubelets near the point where the pointer ray
//! meets the cube's bounding sphere.

use std::f32::consts::TAU;
use std::f64::consts::TAU as TAU_F64;

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::grid::STEP;
use crate::pick::BoundingSphere;

/// Global breathing phase speed in radians per second.
pub const BREATH_RATE: f64 = 1.1;

/// Fraction of the cycle spent growing.
pub const GROW_FRACTION: f32 = 0.78;

/// Phase where the grow segment ends.
pub const GROW_END: f32 = TAU * GROW_FRACTION;

/// Length of the shrink segment.
pub const SHRINK_LEN: f32 = TAU * (1.0 - GROW_FRACTION);

/// Per-axis phase lag `(x, y, z)` per world unit.
pub const PHASE_LAG: Vec3 = Vec3::new(0.08, 1.16, 0.05);

/// Largest extra scale at the pointer hit point.
pub const PROXIMITY_BOOST: f32 = 0.35;

/// Distance at which the proximity boost fades out.
pub const INFLUENCE_RADIUS: f32 = 2.5 * STEP;

/// Global phase at time `now` (seconds), already reduced to `[0, 2pi)`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn global_phase(now: f64) -> f32 {
    (now * BREATH_RATE).rem_euclid(TAU_F64) as f32
}

/// Phase of a cubelet at `world`, normalized to `[0, 2pi)`.
#[must_use]
pub fn phase(global: f32, world: Vec3, offset: f32) -> f32 {
    let p = global - world.dot(PHASE_LAG) + offset;
    let np = p.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if np >= TAU {
        0.0
    } else {
        np
    }
}

/// Two-segment breathing wave over a normalized phase in `[0, 2pi)`.
///
/// Quadratic ease-in growth over the first 78% of the cycle, smoothstep
/// contraction over the rest.
#[must_use]
pub fn wave(np: f32) -> f32 {
    if np < GROW_END {
        let t = np / GROW_END;
        t * t
    } else {
        let t = ((np - GROW_END) / SHRINK_LEN).min(1.0);
        1.0 - t * t * (3.0 - 2.0 * t)
    }
}

/// Proximity multiplier for a cubelet at distance `d` from the hit point.
#[must_use]
pub fn proximity_multiplier(d: f32) -> f32 {
    if d < INFLUENCE_RADIUS {
        1.0 + PROXIMITY_BOOST * (1.0 - d / INFLUENCE_RADIUS).powi(2)
    } else {
        1.0
    }
}

/// Pointer state and the cached per-cubelet proximity multipliers.
#[derive(Debug, Clone)]
pub struct Proximity {
    pointer: Option<Vec2>,
    dirty: bool,
    multipliers: Vec<f32>,
    sphere: BoundingSphere,
    hit: Option<Vec3>,
}

impl Proximity {
    /// Creates neutral bookkeeping for `count` cubelets and a sphere of `radius`.
    #[must_use]
    pub fn new(count: usize, radius: f32) -> Self {
        Self {
            pointer: None,
            dirty: false,
            multipliers: vec![1.0; count],
            sphere: BoundingSphere {
                center: Vec3::ZERO,
                radius,
            },
            hit: None,
        }
    }

    /// Resizes for a rebuilt cube and resets every multiplier to 1.
    ///
    /// The pointer is kept and marked for re-evaluation.
    pub fn rebuild(&mut self, count: usize, radius: f32) {
        self.multipliers = vec![1.0; count];
        self.sphere.radius = radius;
        self.hit = None;
        self.dirty = self.pointer.is_some();
    }

    /// Resets every multiplier to 1 without forgetting the pointer.
    pub fn reset(&mut self) {
        self.multipliers.fill(1.0);
        self.hit = None;
        self.dirty = self.pointer.is_some();
    }

    /// Sets the pointer in normalized device coordinates.
    ///
    /// Coordinates outside `[-1, 1]` (such as the 999 off-screen sentinel) clear it.
    pub fn set_pointer(&mut self, ndc: Vec2) {
        let on_screen = ndc.is_finite() && ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0;
        let pointer = on_screen.then_some(ndc);
        if pointer != self.pointer {
            self.pointer = pointer;
            self.dirty = true;
        }
    }

    /// Removes the pointer.
    pub fn clear_pointer(&mut self) {
        if self.pointer.is_some() {
            self.pointer = None;
            self.dirty = true;
        }
    }

    /// Current pointer, if on screen.
    #[must_use]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Whether the multipliers need recomputing.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Last ray/sphere hit point.
    #[must_use]
    pub fn hit_point(&self) -> Option<Vec3> {
        self.hit
    }

    /// The pick sphere.
    #[must_use]
    pub fn sphere(&self) -> &BoundingSphere {
        &self.sphere
    }

    /// Cached multiplier for cubelet `index` (1 when out of range).
    #[must_use]
    pub fn multiplier(&self, index: usize) -> f32 {
        self.multipliers.get(index).copied().unwrap_or(1.0)
    }

    /// All cached multipliers, by cubelet index.
    #[must_use]
    pub fn multipliers(&self) -> &[f32] {
        &self.multipliers
    }

    /// Recomputes the multipliers if the pointer changed since the last update.
    ///
    /// `positions` yields `(index, world position)` for every cubelet.
    pub fn update<I>(&mut self, camera: &Camera, center: Vec3, positions: I)
    where
        I: IntoIterator<Item = (usize, Vec3)>,
    {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        self.sphere.center = center;

        let hit = self
            .pointer
            .and_then(|ndc| camera.ray_from_ndc(ndc))
            .and_then(|ray| ray.intersect_sphere(&self.sphere));
        self.hit = hit;

        match hit {
            Some(hit) => {
                for (index, world) in positions {
                    if let Some(m) = self.multipliers.get_mut(index) {
                        *m = proximity_multiplier(world.distance(hit));
                    }
                }
            }
            None => self.multipliers.fill(1.0),
        }
    }
}
