//! # framecrate
//!
//! Coordinate frames, trajectories and robot geometry for 3D scene authoring.
//!
//! This is the umbrella crate that provides convenient access to all framecrate
//! functionality. You can use this crate to get everything in one place, or use
//! individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Rigid transforms, pose sequences, meshes, line sets, shapes
//! - **I/O**: Mesh loading (OBJ, PLY)
//! - **Kinematics**: Named-frame transform graphs and URDF robots
//! - **Visualization**: Frames, trajectories, camera control and renderers
//!
//! ## Quick Start
//!
//! ```rust
//! use framecrate::prelude::*;
//!
//! # fn main() -> framecrate::Result<()> {
//! let mut fig = figure()?;
//! plot_basis(&mut fig, &Matrix3::identity(), &Vector3::zeros(), 1.0)?;
//!
//! let rows = [
//!     [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
//!     [1.0, 0.0, 0.5, 1.0, 0.0, 0.0, 0.0],
//! ];
//! plot_trajectory(&mut fig, &rows, TrajectoryOptions::default().with_n_frames(2))?;
//! fig.view_init(-60.0, 30.0)?;
//! fig.show()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables io, kinematics and visualization
//! - `io`: Mesh file support
//! - `kinematics`: Transform graphs and URDF
//! - `visualization`: Scene geometry and renderers
//! - `all`: Enables all features

// Re-export core functionality
pub use framecrate_core::*;

// Re-export sub-crates
#[cfg(feature = "io")]
pub use framecrate_io as io;

#[cfg(feature = "kinematics")]
pub use framecrate_kinematics as kinematics;

#[cfg(feature = "visualization")]
pub use framecrate_visualization as visualization;

/// Convenient imports for common use cases
pub mod prelude {
    pub use framecrate_core::*;

    #[cfg(feature = "io")]
    pub use framecrate_io::*;

    #[cfg(feature = "kinematics")]
    pub use framecrate_kinematics::*;

    #[cfg(feature = "visualization")]
    pub use framecrate_visualization::*;
}
