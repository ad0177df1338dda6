// Math utilities and conversions between rapier (nalgebra) and glam types

use glam::{Quat, Vec3};
use rapier3d::prelude::{Real, Rotation, Vector};

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Convert a physics vector into a glam vector
pub fn to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Convert a glam vector into a physics vector
pub fn to_vector(v: Vec3) -> Vector<Real> {
    Vector::new(v.x, v.y, v.z)
}

/// Convert a physics rotation (unit quaternion) into a glam quaternion
pub fn to_quat(rotation: &Rotation<Real>) -> Quat {
    let q = rotation.quaternion();
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}
