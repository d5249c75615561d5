//! Pointer picking: rays and the cube's bounding sphere.

use glam::Vec3;

/// A half-line with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin in world space.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`. Returns `None` for a zero direction.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.normalize_or_zero();
        if direction.length_squared() < 1e-12 {
            return None;
        }
        Some(Self { origin, direction })
    }

    /// Point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersects the ray with a sphere.
    ///
    /// Returns the nearest intersection in front of the origin, or the exit point
    /// when the origin is inside the sphere.
    #[must_use]
    pub fn intersect_sphere(&self, sphere: &BoundingSphere) -> Option<Vec3> {
        let to_center = sphere.center - self.origin;
        let tca = to_center.dot(self.direction);
        let d2 = to_center.length_squared() - tca * tca;
        let r2 = sphere.radius * sphere.radius;
        if d2 > r2 {
            return None;
        }
        let thc = (r2 - d2).sqrt();
        let t0 = tca - thc;
        let t1 = tca + thc;
        if t1 < 0.0 {
            return None;
        }
        let t = if t0 < 0.0 { t1 } else { t0 };
        Some(self.at(t))
    }
}

/// Sphere enclosing the cube, used as the proximity pick target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Sphere center in world space.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: f32,
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 1.0,
        }
    }
}
