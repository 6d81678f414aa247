/// Camera and projection utilities
use crate::math::{self, Vec2, Vec3};

/// Focal factor tuned for a 1920 pixel wide viewport
pub const DEFAULT_FOV_FACTOR: f64 = 640.0;

/// A fixed pinhole camera looking down +Z.
///
/// Only `position.z` is used: it pushes the scene away from the eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub fov_factor: f64,
}

impl Camera {
    pub fn new(z: f64, fov_factor: f64) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, z),
            fov_factor,
        }
    }

    /// A camera whose focal factor keeps the 640-at-1920 ratio for `width`
    pub fn for_viewport(width: usize) -> Self {
        Self::new(-5.0, width as f64 / 3.0)
    }

    /// Move a world-space point into camera space
    pub fn to_camera_space(&self, point: &Vec3) -> Vec3 {
        math::translate(point, 0.0, 0.0, -self.position.z)
    }

    /// Project a world-space point to pixel coordinates with the origin at
    /// the viewport centre. Row 0 is the top of the buffer; `y` is not flipped.
    pub fn project_to_screen(&self, point: &Vec3, width: usize, height: usize) -> Option<Vec2> {
        let projected = math::project(&self.to_camera_space(point), self.fov_factor)?;
        Some(projected + Vec2::new(width as f64 / 2.0, height as f64 / 2.0))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(-5.0, DEFAULT_FOV_FACTOR)
    }
}
