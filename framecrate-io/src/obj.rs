//! OBJ format support

use crate::{open_file, triangulate, validate_faces, MeshReader};
use ::obj::ObjData;
use framecrate_core::{Error, Point3f, Result, TriangleMesh, Vector3f};
use std::io::BufReader;
use std::path::Path;

pub struct ObjReader;

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let path = path.as_ref();
        let reader = BufReader::new(open_file(path)?);
        let data = ObjData::load_buf(reader)
            .map_err(|e| Error::Parse(format!("{}: {}", path.display(), e)))?;
        obj_data_to_mesh(&data)
    }
}

/// Convert parsed OBJ data into a triangle mesh.
///
/// Every group of every object is merged; polygons are split into fans.
/// Normals are kept only when each position has exactly one normal.
pub fn obj_data_to_mesh(data: &ObjData) -> Result<TriangleMesh> {
    let vertices: Vec<Point3f> = data
        .position
        .iter()
        .map(|p| Point3f::new(p[0], p[1], p[2]))
        .collect();

    let mut faces = Vec::new();
    let mut vertex_normals: Vec<Option<usize>> = vec![None; vertices.len()];
    let mut consistent_normals = !data.normal.is_empty();

    for object in &data.objects {
        for group in &object.groups {
            for poly in &group.polys {
                let indices: Vec<usize> = poly.0.iter().map(|tuple| tuple.0).collect();
                for tuple in &poly.0 {
                    match (tuple.2, vertex_normals.get_mut(tuple.0)) {
                        (Some(n), Some(slot)) => {
                            if slot.is_some_and(|existing| existing != n) {
                                consistent_normals = false;
                            } else {
                                *slot = Some(n);
                            }
                        }
                        _ => consistent_normals = false,
                    }
                }
                triangulate(&indices, &mut faces);
            }
        }
    }

    let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
    validate_faces(&mesh)?;

    if consistent_normals {
        let normals: Option<Vec<Vector3f>> = vertex_normals
            .iter()
            .map(|n| n.and_then(|i| data.normal.get(i)).map(|v| Vector3f::new(v[0], v[1], v[2])))
            .collect();
        if let Some(normals) = normals {
            mesh.set_normals(normals);
        }
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# unit quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    #[test]
    fn test_obj_quad_is_triangulated() {
        let data = ObjData::load_buf(QUAD.as_bytes()).unwrap();
        let mesh = obj_data_to_mesh(&data).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
        assert!(mesh.normals.is_none());
    }

    #[test]
    fn test_obj_with_normals() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1
";
        let data = ObjData::load_buf(source.as_bytes()).unwrap();
        let mesh = obj_data_to_mesh(&data).unwrap();
        let normals = mesh.normals.unwrap();
        assert_eq!(normals.len(), 3);
        assert_eq!(normals[2], Vector3f::new(0.0, 0.0, 1.0));
    }
}
