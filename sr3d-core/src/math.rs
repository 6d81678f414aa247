/// Vector value types and the arithmetic the pipeline is built from
use nalgebra::{Rotation3, Vector2, Vector3};

pub type Vec2 = Vector2<f64>;
pub type Vec3 = Vector3<f64>;

/// Depths closer to zero than this are not projected
pub const DEPTH_EPSILON: f64 = 1e-6;

pub fn add(a: &Vec3, b: &Vec3) -> Vec3 {
    a + b
}

pub fn subtract(a: &Vec3, b: &Vec3) -> Vec3 {
    a - b
}

/// Scale each axis by its own factor
pub fn scale(v: &Vec3, sx: f64, sy: f64, sz: f64) -> Vec3 {
    v.component_mul(&Vec3::new(sx, sy, sz))
}

pub fn scale_uniform(v: &Vec3, s: f64) -> Vec3 {
    v * s
}

pub fn translate(v: &Vec3, dx: f64, dy: f64, dz: f64) -> Vec3 {
    v + Vec3::new(dx, dy, dz)
}

// All three rotations are right-handed: a positive angle turns
// counter-clockwise when looking down the axis towards the origin.

pub fn rotate_x(v: &Vec3, angle: f64) -> Vec3 {
    Rotation3::from_axis_angle(&Vec3::x_axis(), angle) * v
}

pub fn rotate_y(v: &Vec3, angle: f64) -> Vec3 {
    Rotation3::from_axis_angle(&Vec3::y_axis(), angle) * v
}

pub fn rotate_z(v: &Vec3, angle: f64) -> Vec3 {
    Rotation3::from_axis_angle(&Vec3::z_axis(), angle) * v
}

/// Perspective divide: `f * x / z`, `f * y / z`.
///
/// Returns `None` for points sitting on the eye plane (`|z| < DEPTH_EPSILON`)
/// instead of producing infinite coordinates.
pub fn project(v: &Vec3, focal_length: f64) -> Option<Vec2> {
    if v.z.abs() < DEPTH_EPSILON {
        return None;
    }

    Some(Vec2::new(focal_length * v.x / v.z, focal_length * v.y / v.z))
}
