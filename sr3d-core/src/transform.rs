/// Per-frame model transformation
use nalgebra::{Matrix4, Point3, Vector3};

use crate::math::{self, Vec3};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The same angle on every axis
    pub fn uniform(angle: f64) -> Self {
        Self::new(angle, angle, angle)
    }

    pub fn zero() -> Self {
        Self::uniform(0.0)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Rotation, then scale, then translation, applied to model-space points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub rotation: RotationState,
    pub scale: Vec3,
    pub translation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            rotation: RotationState::zero(),
            scale: Vec3::repeat(1.0),
            translation: Vec3::zeros(),
        }
    }
}

impl Transform {
    /// Create a rotation matrix applying X, then Y, then Z
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f64> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        rz * ry * rx
    }

    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// The whole transform as one matrix
    pub fn model_matrix(&self) -> Matrix4<f64> {
        let t = self.translation;
        let s = self.scale;
        Self::translation_matrix(t.x, t.y, t.z)
            * Self::scale_matrix(s.x, s.y, s.z)
            * Self::rotation_matrix(&self.rotation)
    }

    /// Apply the transform one operation at a time
    pub fn apply(&self, v: &Vec3) -> Vec3 {
        let v = math::rotate_x(v, self.rotation.x);
        let v = math::rotate_y(&v, self.rotation.y);
        let v = math::rotate_z(&v, self.rotation.z);
        let v = math::scale(&v, self.scale.x, self.scale.y, self.scale.z);
        math::translate(&v, self.translation.x, self.translation.y, self.translation.z)
    }
}

/// Transform a point by a homogeneous matrix with w = 1
pub fn transform_point(matrix: &Matrix4<f64>, v: &Vec3) -> Vec3 {
    matrix.transform_point(&Point3::from(*v)).coords
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix4::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_default_transform_is_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Transform::default().apply(&v), v);
        assert_relative_eq!(Transform::default().model_matrix(), Matrix4::identity());
    }

    #[test]
    fn test_model_matrix_matches_sequential_operations() {
        let transform = Transform {
            rotation: RotationState::new(0.4, -1.1, 2.3),
            scale: Vec3::new(1.5, 0.5, 2.0),
            translation: Vec3::new(2.0, -1.0, 5.0),
        };
        let matrix = transform.model_matrix();

        for v in [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-0.3, 0.7, 1.9),
            Vec3::new(4.0, -2.0, -8.0),
        ] {
            assert_relative_eq!(
                transform_point(&matrix, &v),
                transform.apply(&v),
                epsilon = 1e-10
            );
        }
    }

    #[test]
    fn test_translation_after_scale() {
        let transform = Transform {
            scale: Vec3::repeat(2.0),
            translation: Vec3::new(0.0, 0.0, 5.0),
            ..Default::default()
        };
        assert_eq!(transform.apply(&Vec3::new(1.0, 1.0, 1.0)), Vec3::new(2.0, 2.0, 7.0));
    }
}
