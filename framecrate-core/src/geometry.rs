//! Drawable geometry handed to a renderer

use crate::line_set::LineSet;
use crate::mesh::TriangleMesh;
use crate::point::Point3f;
use crate::traits::{Drawable, Transformable};
use crate::transform::RigidTransform;
use serde::{Deserialize, Serialize};

/// Geometry that a renderer knows how to display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Mesh(TriangleMesh),
    LineSet(LineSet),
}

impl Geometry {
    pub fn as_mesh(&self) -> Option<&TriangleMesh> {
        match self {
            Geometry::Mesh(mesh) => Some(mesh),
            Geometry::LineSet(_) => None,
        }
    }

    pub fn as_line_set(&self) -> Option<&LineSet> {
        match self {
            Geometry::LineSet(lines) => Some(lines),
            Geometry::Mesh(_) => None,
        }
    }

    /// Short name of the variant, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Mesh(_) => "mesh",
            Geometry::LineSet(_) => "line_set",
        }
    }
}

impl From<TriangleMesh> for Geometry {
    fn from(mesh: TriangleMesh) -> Self {
        Geometry::Mesh(mesh)
    }
}

impl From<LineSet> for Geometry {
    fn from(lines: LineSet) -> Self {
        Geometry::LineSet(lines)
    }
}

impl Drawable for Geometry {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        match self {
            Geometry::Mesh(mesh) => mesh.bounding_box(),
            Geometry::LineSet(lines) => lines.bounding_box(),
        }
    }
}

impl Transformable for Geometry {
    fn transform(&mut self, transform: &RigidTransform) {
        match self {
            Geometry::Mesh(mesh) => mesh.transform(transform),
            Geometry::LineSet(lines) => lines.transform(transform),
        }
    }
}
