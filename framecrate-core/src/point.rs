//! Point, vector and color types

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// An RGB color with components in `[0, 1]`
pub type Rgb = [f32; 3];

pub const RED: Rgb = [1.0, 0.0, 0.0];
pub const GREEN: Rgb = [0.0, 1.0, 0.0];
pub const BLUE: Rgb = [0.0, 0.0, 1.0];
pub const BLACK: Rgb = [0.0, 0.0, 0.0];
pub const GREY: Rgb = [0.5, 0.5, 0.5];

/// Widen a single precision point
pub fn to_f64(point: &Point3f) -> Point3d {
    Point3d::new(point.x as f64, point.y as f64, point.z as f64)
}

/// Narrow a double precision point
pub fn to_f32(point: &Point3d) -> Point3f {
    Point3f::new(point.x as f32, point.y as f32, point.z as f32)
}
