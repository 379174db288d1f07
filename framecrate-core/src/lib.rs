//! Core data structures and traits for framecrate
//!
//! This crate provides rigid transforms and rotation utilities, pose
//! sequences, drawable geometry (meshes and line sets), shape descriptions
//! and the capability traits implemented by transform graphs and mesh
//! loaders.

pub mod point;
pub mod transform;
pub mod pose;
pub mod mesh;
pub mod line_set;
pub mod geometry;
pub mod shape;
pub mod traits;
pub mod error;

pub use point::*;
pub use transform::*;
pub use pose::*;
pub use mesh::*;
pub use line_set::*;
pub use geometry::*;
pub use shape::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, UnitQuaternion, Vector3};
