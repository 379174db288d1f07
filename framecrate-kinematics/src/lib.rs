//! Transform graphs for framecrate
//!
//! - [`TransformManager`]: a graph of named frames connected by rigid
//!   transforms, queried along the shortest chain of edges
//! - [`UrdfTransformManager`]: a transform graph built from a URDF robot
//!   description, with joint state, visuals and collision objects

pub mod manager;
pub mod urdf;

pub use manager::*;
pub use urdf::*;
