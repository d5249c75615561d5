//! Grid model: grid size breakpoints, lattice offsets and snapping.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Spacing between neighbouring cubelet centres.
pub const STEP: f32 = 1.35;

/// Edge length of one cubelet.
pub const CUBELET_SIZE: f32 = 0.82;

/// Corner radius of the rounded cubelet box.
pub const CUBELET_RADIUS: f32 = 0.17;

/// Largest supported grid size (125 cubelets).
pub const MAX_GRID: usize = 5;

/// Returns the grid size for a viewport width (CSS pixels).
///
/// ```
/// use pulsecube_core::grid::grid_size_for_width;
///
/// assert_eq!(grid_size_for_width(1280.0), 5);
/// assert_eq!(grid_size_for_width(640.0), 4);
/// assert_eq!(grid_size_for_width(390.0), 3);
/// assert_eq!(grid_size_for_width(320.0), 2);
/// ```
#[must_use]
pub fn grid_size_for_width(width: f32) -> usize {
    if width >= 900.0 {
        5
    } else if width >= 600.0 {
        4
    } else if width >= 380.0 {
        3
    } else {
        2
    }
}

/// World offset of grid index `i` along any axis for an `n`-sized grid.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn layer_offset(i: usize, n: usize) -> f32 {
    let half = (n as f32 - 1.0) / 2.0;
    (i as f32 - half) * STEP
}

/// All slab coordinates along one axis, lowest first.
#[must_use]
pub fn layer_values(n: usize) -> Vec<f32> {
    (0..n).map(|i| layer_offset(i, n)).collect()
}

/// Snaps a coordinate to the nearest lattice value, clamping the grid index to `[0, n-1]`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn snap(coord: f32, n: usize) -> f32 {
    if n == 0 {
        return 0.0;
    }
    let half = (n as f32 - 1.0) / 2.0;
    let idx = (coord / STEP + half).round().clamp(0.0, n as f32 - 1.0);
    (idx - half) * STEP
}

/// Snaps every component of a position.
#[must_use]
pub fn snap_vec(p: Vec3, n: usize) -> Vec3 {
    Vec3::new(snap(p.x, n), snap(p.y, n), snap(p.z, n))
}

/// Whether `coord` lies on the lattice of an `n`-sized grid (within `eps`).
#[must_use]
pub fn on_lattice(coord: f32, n: usize, eps: f32) -> bool {
    (0..n).any(|i| (coord - layer_offset(i, n)).abs() <= eps)
}

/// One of the three cube axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Left-right.
    X,
    /// Up-down.
    Y,
    /// Front-back.
    Z,
}

impl Axis {
    /// All axes in move-table order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the unit vector for this axis.
    #[must_use]
    pub fn to_vec3(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Returns the component of `v` along this axis.
    #[must_use]
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}
