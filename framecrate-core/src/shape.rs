//! Shape descriptions attached to frames of a transform graph

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const PACKAGE_PREFIX: &str = "package://";

/// A mesh referenced by file name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshShape {
    /// File name as written in the robot description
    pub filename: String,
    /// Directory that `filename` is resolved against
    pub mesh_path: Option<PathBuf>,
    /// Per-axis scale applied to the vertices
    pub scale: Vector3<f64>,
}

impl MeshShape {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            mesh_path: None,
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_mesh_path(mut self, mesh_path: impl Into<PathBuf>) -> Self {
        self.mesh_path = Some(mesh_path.into());
        self
    }

    pub fn with_scale(mut self, scale: Vector3<f64>) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, scale: f64) -> Self {
        self.with_scale(Vector3::new(scale, scale, scale))
    }

    /// Full path of the mesh file, or `None` when no mesh directory is configured.
    ///
    /// A leading `package://` is stripped from the file name.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        let mesh_path = self.mesh_path.as_ref()?;
        let relative = self
            .filename
            .strip_prefix(PACKAGE_PREFIX)
            .unwrap_or(&self.filename);
        Some(mesh_path.join(relative))
    }
}

/// Primitive or mesh shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Box { size: Vector3<f64> },
    Sphere { radius: f64 },
    Cylinder { radius: f64, length: f64 },
    Mesh(MeshShape),
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Box { .. } => "box",
            Shape::Sphere { .. } => "sphere",
            Shape::Cylinder { .. } => "cylinder",
            Shape::Mesh(_) => "mesh",
        }
    }
}

/// A shape attached to a named frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryObject {
    pub frame: String,
    pub shape: Shape,
}

impl GeometryObject {
    pub fn new(frame: impl Into<String>, shape: Shape) -> Self {
        Self {
            frame: frame.into(),
            shape,
        }
    }
}
