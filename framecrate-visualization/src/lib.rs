//! Scene authoring for coordinate frames, trajectories and robots
//!
//! This crate turns poses and transform graphs into drawable geometry and
//! hands it to a renderer:
//! - Coordinate frame triads and trajectories
//! - Camera placement from azimuth and elevation
//! - Visuals, collision objects and frames of transform graphs
//! - A `Renderer` capability with an in-memory implementation

pub mod camera;
pub mod figure;
pub mod frame;
pub mod graph;
pub mod primitives;
pub mod renderer;
pub mod shapes;
pub mod trajectory;

pub use camera::*;
pub use figure::*;
pub use frame::*;
pub use graph::*;
pub use primitives::*;
pub use renderer::*;
pub use shapes::*;
pub use trajectory::*;
