//! Vector helpers and the axis rotations used to pose the cube
//!
//! The cube is spun about X and Y only. Object space maps to world space by
//! rotating about Y first and X second; [`to_object`] undoes that in reverse.

use nalgebra::Vector3;

use crate::scene::Rotation;

/// Rotate `v` about the X axis by `angle` radians
pub fn rot_x(v: &Vector3<f32>, angle: f32) -> Vector3<f32> {
    let (s, c) = angle.sin_cos();
    Vector3::new(v.x, c * v.y - s * v.z, s * v.y + c * v.z)
}

/// Rotate `v` about the Y axis by `angle` radians
pub fn rot_y(v: &Vector3<f32>, angle: f32) -> Vector3<f32> {
    let (s, c) = angle.sin_cos();
    Vector3::new(c * v.x + s * v.z, v.y, -s * v.x + c * v.z)
}

/// Normalize, treating a zero length as 1 so degenerate input stays finite
pub fn normalize_or_unit(v: &Vector3<f32>) -> Vector3<f32> {
    let len = v.norm();
    let len = if len > 0.0 { len } else { 1.0 };
    v / len
}

/// Object space -> world space (Y spin, then X tilt)
pub fn to_world(v: &Vector3<f32>, rotation: &Rotation) -> Vector3<f32> {
    rot_x(&rot_y(v, rotation.y), rotation.x)
}

/// World space -> object space, the exact inverse of [`to_world`]
pub fn to_object(v: &Vector3<f32>, rotation: &Rotation) -> Vector3<f32> {
    rot_y(&rot_x(v, -rotation.x), -rotation.y)
}
