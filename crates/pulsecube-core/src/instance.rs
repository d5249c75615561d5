//! Per-cubelet GPU instance records.

use glam::{Mat4, Quat, Vec3};

/// Instance data for one cubelet, laid out for direct upload to a vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeletInstance {
    /// Model matrix (column-major).
    pub model: [[f32; 4]; 4],
    /// Linear RGBA color of the cubelet's layer material.
    pub color: [f32; 4],
}

impl CubeletInstance {
    /// Builds an instance from a world transform and a layer color.
    #[must_use]
    pub fn new(position: Vec3, orientation: Quat, scale: f32, color: Vec3) -> Self {
        let model = Mat4::from_scale_rotation_translation(Vec3::splat(scale), orientation, position);
        Self {
            model: model.to_cols_array_2d(),
            color: color.extend(1.0).to_array(),
        }
    }

    /// Translation part of the model matrix.
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.model[3][0], self.model[3][1], self.model[3][2])
    }
}
