//! Degree-based transform builders.
//!
//! Part placement and view angles are expressed in degrees, and transforms
//! compose by right-multiplication: in `a * b` the transform `b` is applied
//! to points first. Chaining builders therefore reads in the same order as
//! the parts are attached:
//!
//! ```
//! use aviary::transform::{rotate_z, scale, translate};
//! use glam::Vec3;
//!
//! // Move to the joint, swing the part, then size its box.
//! let part = translate(1.0, 0.0, 0.0) * rotate_z(90.0) * scale(2.0, 1.0, 1.0);
//! let tip = part.transform_point3(Vec3::X);
//! assert!(tip.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-5));
//! ```

use glam::{Mat4, Vec3};

/// Translation by `(x, y, z)`.
pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

/// Non-uniform scale by `(x, y, z)`.
pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(x, y, z))
}

/// Right-handed rotation about +X.
pub fn rotate_x(degrees: f32) -> Mat4 {
    Mat4::from_rotation_x(degrees.to_radians())
}

/// Right-handed rotation about +Y.
pub fn rotate_y(degrees: f32) -> Mat4 {
    Mat4::from_rotation_y(degrees.to_radians())
}

/// Right-handed rotation about +Z.
pub fn rotate_z(degrees: f32) -> Mat4 {
    Mat4::from_rotation_z(degrees.to_radians())
}
