//! Mesh data structures and functionality

use crate::point::*;
use crate::transform::RigidTransform;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A triangle mesh with optional per-vertex normals and colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
    pub colors: Option<Vec<Rgb>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: None,
            colors: None,
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
            colors: None,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Set vertex normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }

    /// Set vertex colors
    pub fn set_colors(&mut self, colors: Vec<Rgb>) {
        if colors.len() == self.vertices.len() {
            self.colors = Some(colors);
        }
    }

    /// Color every vertex with the same color
    pub fn paint_uniform_color(&mut self, color: Rgb) {
        self.colors = Some(vec![color; self.vertices.len()]);
    }

    /// Scale vertex positions component-wise about the origin
    pub fn scale(&mut self, factors: &Vector3<f64>) {
        let factors = factors.cast::<f32>();
        for vertex in &mut self.vertices {
            vertex.coords.component_mul_assign(&factors);
        }
        // Non-uniform scaling invalidates normals
        if factors.x != factors.y || factors.y != factors.z {
            self.normals = None;
        }
    }

    /// Append another mesh, re-indexing its faces.
    ///
    /// Colors are kept only if both meshes have them; same for normals.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.vertices.len();
        let was_empty = self.vertices.is_empty();

        self.normals = match (self.normals.take(), &other.normals) {
            (Some(mut mine), Some(theirs)) => {
                mine.extend_from_slice(theirs);
                Some(mine)
            }
            (None, Some(theirs)) if was_empty => Some(theirs.clone()),
            _ => None,
        };
        self.colors = match (self.colors.take(), &other.colors) {
            (Some(mut mine), Some(theirs)) => {
                mine.extend_from_slice(theirs);
                Some(mine)
            }
            (None, Some(theirs)) if was_empty => Some(theirs.clone()),
            _ => None,
        };

        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]),
        );
    }

    /// Apply a rigid transform to vertices and normals
    pub fn apply_transform(&mut self, transform: &RigidTransform) {
        for vertex in &mut self.vertices {
            *vertex = to_f32(&transform.transform_point(&to_f64(vertex)));
        }
        if let Some(normals) = &mut self.normals {
            let rotation = transform.rotation().cast::<f32>();
            for normal in normals.iter_mut() {
                *normal = rotation * *normal;
            }
        }
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.normals = None;
        self.colors = None;
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{active_matrix_from_angle, Axis};

    fn triangle() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_merge_reindexes_faces() {
        let mut mesh = triangle();
        mesh.merge(&triangle());
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.faces[1], [3, 4, 5]);
    }

    #[test]
    fn test_merge_colors() {
        let mut colored = triangle();
        colored.paint_uniform_color(RED);

        let mut into_empty = TriangleMesh::new();
        into_empty.merge(&colored);
        assert_eq!(into_empty.colors.as_ref().map(Vec::len), Some(3));

        let mut mixed = triangle();
        mixed.merge(&colored);
        assert!(mixed.colors.is_none());
    }

    #[test]
    fn test_scale_and_transform() {
        let mut mesh = triangle();
        mesh.scale(&Vector3::new(2.0, 3.0, 1.0));
        assert_eq!(mesh.vertices[1], Point3f::new(2.0, 0.0, 0.0));
        assert_eq!(mesh.vertices[2], Point3f::new(0.0, 3.0, 0.0));

        let rotation = active_matrix_from_angle(Axis::Z, std::f64::consts::FRAC_PI_2);
        let transform = RigidTransform::from_parts(rotation, Vector3::new(0.0, 0.0, 1.0)).unwrap();
        mesh.apply_transform(&transform);
        let v = mesh.vertices[1];
        assert!((v - Point3f::new(0.0, 2.0, 1.0)).norm() < 1e-6);
    }
}
