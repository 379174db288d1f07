//! Mesh loading for framecrate
//!
//! This crate reads triangle meshes from Wavefront OBJ and PLY files and
//! exposes them through the [`MeshLoader`] capability used when robot
//! geometry is drawn.

pub mod ply;
pub mod obj;

use framecrate_core::{Error, MeshLoader, Result, TriangleMesh};
use std::fs::File;
use std::path::Path;

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh>;
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("obj") => obj::ObjReader::read_mesh(path),
        Some("ply") => ply::PlyReader::read_mesh(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}

/// Mesh loader that dispatches on the file extension
#[derive(Debug, Clone, Copy, Default)]
pub struct FileMeshLoader;

impl MeshLoader for FileMeshLoader {
    fn load_mesh(&self, path: &Path) -> Result<TriangleMesh> {
        let mesh = read_mesh(path)?;
        tracing::debug!(
            path = %path.display(),
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "loaded mesh"
        );
        Ok(mesh)
    }
}

/// Open a file, reporting a missing file as [`Error::FileNotFound`]
pub(crate) fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::FileNotFound {
            path: path.display().to_string(),
        },
        _ => Error::Io(e),
    })
}

/// Split a polygon into a triangle fan
pub(crate) fn triangulate(indices: &[usize], faces: &mut Vec<[usize; 3]>) {
    for i in 1..indices.len().saturating_sub(1) {
        faces.push([indices[0], indices[i], indices[i + 1]]);
    }
}

/// Reject faces that reference missing vertices
pub(crate) fn validate_faces(mesh: &TriangleMesh) -> Result<()> {
    let count = mesh.vertex_count();
    if let Some(face) = mesh.faces.iter().find(|f| f.iter().any(|&i| i >= count)) {
        return Err(Error::Parse(format!(
            "face {:?} references a vertex out of range (vertex count {})",
            face, count
        )));
    }
    Ok(())
}
