//! PLY format support

use crate::{open_file, triangulate, validate_faces, MeshReader};
use framecrate_core::{Error, Point3f, Result, Rgb, TriangleMesh, Vector3f};
use ply_rs::{
    parser::Parser,
    ply::{DefaultElement, Ply, Property},
};
use std::io::{BufRead, BufReader};
use std::path::Path;

pub struct PlyReader;

impl MeshReader for PlyReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let path = path.as_ref();
        let mut reader = BufReader::new(open_file(path)?);
        read_mesh_from(&mut reader)
            .map_err(|e| match e {
                Error::Parse(message) => Error::Parse(format!("{}: {}", path.display(), message)),
                other => other,
            })
    }
}

/// Read a PLY mesh from any buffered reader
pub fn read_mesh_from<R: BufRead>(reader: &mut R) -> Result<TriangleMesh> {
    // Parse PLY header and payload
    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(reader)
        .map_err(|e| Error::Parse(e.to_string()))?;

    ply_to_mesh(&ply)
}

fn ply_to_mesh(ply: &Ply<DefaultElement>) -> Result<TriangleMesh> {
    let vertex_element = ply.payload.get("vertex").map(Vec::as_slice).unwrap_or_default();

    // Extract vertices
    let vertices = vertex_element
        .iter()
        .map(|vertex| {
            Ok(Point3f::new(
                extract_property_value(vertex, "x")?,
                extract_property_value(vertex, "y")?,
                extract_property_value(vertex, "z")?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    // Extract faces
    let mut faces = Vec::new();
    if let Some(face_element) = ply.payload.get("face") {
        for face in face_element {
            let indices = extract_face_indices(face)?;
            triangulate(&indices, &mut faces);
        }
    }

    let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
    validate_faces(&mesh)?;

    // Normals and colors only when every vertex has them
    let normals: Option<Vec<Vector3f>> = vertex_element
        .iter()
        .map(|vertex| {
            Some(Vector3f::new(
                extract_property_value(vertex, "nx").ok()?,
                extract_property_value(vertex, "ny").ok()?,
                extract_property_value(vertex, "nz").ok()?,
            ))
        })
        .collect();
    if let Some(normals) = normals.filter(|n| !n.is_empty()) {
        mesh.set_normals(normals);
    }

    let colors: Option<Vec<Rgb>> = vertex_element
        .iter()
        .map(|vertex| {
            Some([
                extract_color_channel(vertex, "red")?,
                extract_color_channel(vertex, "green")?,
                extract_color_channel(vertex, "blue")?,
            ])
        })
        .collect();
    if let Some(colors) = colors.filter(|c| !c.is_empty()) {
        mesh.set_colors(colors);
    }

    Ok(mesh)
}

/// Extract a property value as f32 from a PLY element
fn extract_property_value(element: &DefaultElement, name: &str) -> Result<f32> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(*val),
        Some(Property::Double(val)) => Ok(*val as f32),
        Some(Property::Int(val)) => Ok(*val as f32),
        Some(Property::UInt(val)) => Ok(*val as f32),
        Some(Property::Short(val)) => Ok(*val as f32),
        Some(Property::UShort(val)) => Ok(*val as f32),
        _ => Err(Error::Parse(format!(
            "Property '{}' not found or invalid type",
            name
        ))),
    }
}

/// Extract a color channel normalized to [0, 1]
fn extract_color_channel(element: &DefaultElement, name: &str) -> Option<f32> {
    match element.get(name)? {
        Property::UChar(val) => Some(*val as f32 / 255.0),
        Property::Float(val) => Some(*val),
        Property::Double(val) => Some(*val as f32),
        _ => None,
    }
}

/// Extract face indices from a PLY face element
fn extract_face_indices(element: &DefaultElement) -> Result<Vec<usize>> {
    fn to_indices<T: Copy + TryInto<usize>>(values: &[T]) -> Result<Vec<usize>> {
        values
            .iter()
            .map(|&v| {
                v.try_into()
                    .map_err(|_| Error::Parse("negative face index".to_string()))
            })
            .collect()
    }

    match element
        .get("vertex_indices")
        .or_else(|| element.get("vertex_index"))
    {
        Some(Property::ListInt(indices)) => to_indices(indices),
        Some(Property::ListUInt(indices)) => to_indices(indices),
        Some(Property::ListShort(indices)) => to_indices(indices),
        Some(Property::ListUShort(indices)) => to_indices(indices),
        Some(Property::ListUChar(indices)) => to_indices(indices),
        _ => Err(Error::Parse("Face indices not found".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORED_SQUARE: &str = "ply
format ascii 1.0
comment test square
element vertex 4
property float x
property float y
property float z
property uchar red
property uchar green
property uchar blue
element face 1
property list uchar int vertex_indices
end_header
0.0 0.0 0.0 255 0 0
1.0 0.0 0.0 255 0 0
1.0 1.0 0.0 255 0 0
0.0 1.0 0.0 255 0 0
4 0 1 2 3
";

    #[test]
    fn test_ascii_ply_with_colors() {
        let mut reader = COLORED_SQUARE.as_bytes();
        let mesh = read_mesh_from(&mut reader).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.colors.unwrap()[0], [1.0, 0.0, 0.0]);
        assert!(mesh.normals.is_none());
    }

    #[test]
    fn test_face_out_of_range() {
        let source = "ply
format ascii 1.0
element vertex 1
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0.0 0.0 0.0
3 0 1 2
";
        let mut reader = source.as_bytes();
        assert!(matches!(read_mesh_from(&mut reader), Err(Error::Parse(_))));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let mut reader = "not a ply file\n".as_bytes();
        assert!(matches!(read_mesh_from(&mut reader), Err(Error::Parse(_))));
    }
}
