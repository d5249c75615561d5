//! Cube builder: cubelets, layer materials and the move table.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Gradient;
use crate::grid::{layer_offset, layer_values, Axis};
use crate::palette::{LayerMaterial, Palette};

/// Range of the per-cubelet breathing phase offset.
pub const PHASE_OFFSET_SPREAD: f32 = 0.7;

/// Which transform parent a cubelet currently hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attachment {
    /// The cube root.
    #[default]
    Root,
    /// The rotating face-turn pivot.
    Pivot,
}

/// One unit cube of the N³ arrangement.
#[derive(Debug, Clone)]
pub struct Cubelet {
    /// Stable index assigned in creation order.
    pub index: usize,
    /// Position relative to the current parent.
    pub position: Vec3,
    /// Orientation relative to the current parent.
    pub orientation: Quat,
    /// Scale before breathing and proximity are applied.
    pub base_scale: f32,
    /// Breathing phase offset in `[-0.7, 0.7)`.
    pub phase_offset: f32,
    /// Index of the layer material (Y layer at build time).
    pub layer: usize,
    /// Current parent.
    pub attachment: Attachment,
    /// Scale computed by the last animation frame.
    pub scale: f32,
}

/// One possible face turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Move {
    /// Rotation axis.
    pub axis: Axis,
    /// Slab coordinate along `axis`.
    pub layer: f32,
    /// Signed quarter turn in radians.
    pub angle: f32,
}

/// Builds the move table: 3 axes × `n` layers × 2 directions.
#[must_use]
pub fn move_table(n: usize) -> Vec<Move> {
    let layers = layer_values(n);
    let mut moves = Vec::with_capacity(6 * n);
    for axis in Axis::ALL {
        for &layer in &layers {
            for angle in [FRAC_PI_2, -FRAC_PI_2] {
                moves.push(Move { axis, layer, angle });
            }
        }
    }
    moves
}

/// Rotation of the face-turn pivot about the cube root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    /// Axis of rotation.
    pub axis: Axis,
    /// Rotation applied so far in radians.
    pub angle: f32,
}

impl Pivot {
    /// The pivot's rotation as a quaternion.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(self.axis.to_vec3(), self.angle)
    }
}

/// The cubelet set, its palette and move table.
#[derive(Debug, Clone)]
pub struct Cube {
    grid: usize,
    cubelets: Vec<Cubelet>,
    moves: Vec<Move>,
    palette: Palette,
    pivot: Option<Pivot>,
    generation: u64,
}

impl Cube {
    /// Builds an `n`³ cube.
    ///
    /// `palette` supplies the lights, bloom and fog; its layers are replaced with
    /// a fresh `n`-layer `gradient`.
    pub fn build<R: Rng>(
        n: usize,
        gradient: &Gradient,
        mut palette: Palette,
        generation: u64,
        rng: &mut R,
    ) -> Self {
        palette.regrade(gradient, n);

        let mut cubelets = Vec::with_capacity(n * n * n);
        for xi in 0..n {
            for yi in 0..n {
                for zi in 0..n {
                    cubelets.push(Cubelet {
                        index: cubelets.len(),
                        position: Vec3::new(layer_offset(xi, n), layer_offset(yi, n), layer_offset(zi, n)),
                        orientation: Quat::IDENTITY,
                        base_scale: 1.0,
                        phase_offset: rng.gen_range(-PHASE_OFFSET_SPREAD..PHASE_OFFSET_SPREAD),
                        layer: yi,
                        attachment: Attachment::Root,
                        scale: 1.0,
                    });
                }
            }
        }

        Self {
            grid: n,
            cubelets,
            moves: move_table(n),
            palette,
            pivot: None,
            generation,
        }
    }

    /// Grid size N.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.grid
    }

    /// Rebuild counter; changes whenever GPU resources must be recreated.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// All cubelets in identity order.
    #[must_use]
    pub fn cubelets(&self) -> &[Cubelet] {
        &self.cubelets
    }

    pub(crate) fn cubelets_mut(&mut self) -> &mut [Cubelet] {
        &mut self.cubelets
    }

    /// The move table.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Current palette.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Per-layer materials, bottom first.
    #[must_use]
    pub fn layer_materials(&self) -> &[LayerMaterial] {
        &self.palette.layers
    }

    /// Replaces the palette.
    ///
    /// A palette whose layer count does not match the grid keeps the current
    /// layer materials and only updates lights, bloom and fog.
    pub fn set_palette(&mut self, palette: Palette) {
        if palette.layers.len() == self.palette.layers.len() {
            self.palette = palette;
        } else {
            log::warn!(
                "palette has {} layers, cube has {}; keeping layer materials",
                palette.layers.len(),
                self.palette.layers.len()
            );
            self.palette.lighting = palette.lighting;
            self.palette.bloom_strength = palette.bloom_strength;
            self.palette.fog_color = palette.fog_color;
        }
    }

    /// The face-turn pivot, present while a turn is in progress.
    #[must_use]
    pub fn pivot(&self) -> Option<Pivot> {
        self.pivot
    }

    pub(crate) fn set_pivot(&mut self, pivot: Option<Pivot>) {
        self.pivot = pivot;
    }

    /// Position of a cubelet relative to the cube root.
    #[must_use]
    pub fn local_position(&self, cubelet: &Cubelet) -> Vec3 {
        match (cubelet.attachment, self.pivot) {
            (Attachment::Pivot, Some(pivot)) => pivot.rotation() * cubelet.position,
            _ => cubelet.position,
        }
    }

    /// Orientation of a cubelet relative to the cube root.
    #[must_use]
    pub fn local_orientation(&self, cubelet: &Cubelet) -> Quat {
        match (cubelet.attachment, self.pivot) {
            (Attachment::Pivot, Some(pivot)) => pivot.rotation() * cubelet.orientation,
            _ => cubelet.orientation,
        }
    }

    /// World position of a cubelet given the cube root offset.
    #[must_use]
    pub fn world_position(&self, cubelet: &Cubelet, root: Vec3) -> Vec3 {
        root + self.local_position(cubelet)
    }

    /// Indices of cubelets whose root-relative coordinate along `axis` is within
    /// `tolerance` of `layer`.
    #[must_use]
    pub fn layer_members(&self, axis: Axis, layer: f32, tolerance: f32) -> Vec<usize> {
        self.cubelets
            .iter()
            .filter(|c| (axis.component(self.local_position(c)) - layer).abs() < tolerance)
            .map(|c| c.index)
            .collect()
    }
}
