//! Camera and view management.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::pick::Ray;

/// Default vertical field of view (36 degrees).
pub const DEFAULT_FOV: f32 = 36.0 * std::f32::consts::PI / 180.0;

/// A perspective camera looking at the cube.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Camera {
    /// Creates a new camera with default settings.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 12.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: DEFAULT_FOV,
            aspect_ratio,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Sets the aspect ratio. Non-finite or non-positive ratios are ignored.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.aspect_ratio = aspect_ratio;
        }
    }

    /// Moves the camera to `position`, keeping it aimed at `target`.
    pub fn look_from(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Casts a ray from the camera through a point in normalized device coordinates.
    ///
    /// `ndc` spans `[-1, 1]` on both axes with +y up.
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let inv_view_proj = self.view_projection_matrix().inverse();

        // wgpu-style NDC depth [0, 1]
        let near = inv_view_proj * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = inv_view_proj * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);

        if near.w.abs() < 1e-6 || far.w.abs() < 1e-6 {
            return None;
        }

        let origin = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        Ray::new(origin, far - origin)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}
