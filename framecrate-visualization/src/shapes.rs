//! Drawing shapes attached to transform graph frames

use framecrate_core::{
    Error, Geometry, GeometryObject, MeshLoader, MeshShape, Result, Rgb, Shape, TransformGraph,
};

/// Turn a shape into drawable geometry in a reference frame
pub trait ShowShape {
    /// Geometry of the shape attached to `frame`, expressed in
    /// `reference_frame`.
    ///
    /// Returns `Ok(None)` when the shape is skipped.
    fn render<G, L>(
        &self,
        frame: &str,
        graph: &G,
        reference_frame: &str,
        color: Option<Rgb>,
        loader: &L,
    ) -> Result<Option<Geometry>>
    where
        G: TransformGraph + ?Sized,
        L: MeshLoader + ?Sized;
}

impl ShowShape for Shape {
    fn render<G, L>(
        &self,
        frame: &str,
        graph: &G,
        reference_frame: &str,
        color: Option<Rgb>,
        loader: &L,
    ) -> Result<Option<Geometry>>
    where
        G: TransformGraph + ?Sized,
        L: MeshLoader + ?Sized,
    {
        match self {
            Shape::Box { .. } | Shape::Sphere { .. } | Shape::Cylinder { .. } => {
                Err(Error::UnsupportedFeature(format!(
                    "drawing {} shapes is not supported",
                    self.name()
                )))
            }
            Shape::Mesh(mesh) => render_mesh(mesh, frame, graph, reference_frame, color, loader),
        }
    }
}

impl ShowShape for GeometryObject {
    /// Renders the shape attached to [`GeometryObject::frame`]; the `frame`
    /// argument is ignored.
    fn render<G, L>(
        &self,
        _frame: &str,
        graph: &G,
        reference_frame: &str,
        color: Option<Rgb>,
        loader: &L,
    ) -> Result<Option<Geometry>>
    where
        G: TransformGraph + ?Sized,
        L: MeshLoader + ?Sized,
    {
        self.shape
            .render(&self.frame, graph, reference_frame, color, loader)
    }
}

fn render_mesh<G, L>(
    shape: &MeshShape,
    frame: &str,
    graph: &G,
    reference_frame: &str,
    color: Option<Rgb>,
    loader: &L,
) -> Result<Option<Geometry>>
where
    G: TransformGraph + ?Sized,
    L: MeshLoader + ?Sized,
{
    let Some(path) = shape.resolved_path() else {
        tracing::warn!(frame, filename = %shape.filename, "No mesh path given");
        return Ok(None);
    };

    let frame2reference = graph.get_transform(frame, reference_frame)?;
    let mut mesh = loader.load_mesh(&path)?;
    mesh.scale(&shape.scale);
    mesh.apply_transform(&frame2reference);
    if let Some(color) = color {
        mesh.paint_uniform_color(color);
    }
    tracing::debug!(
        frame,
        path = %path.display(),
        vertices = mesh.vertex_count(),
        "loaded mesh shape"
    );
    Ok(Some(Geometry::Mesh(mesh)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use framecrate_core::{Point3f, RigidTransform, TriangleMesh, Vector3, RED};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    struct SingleFrame;

    impl TransformGraph for SingleFrame {
        fn get_transform(&self, from: &str, to: &str) -> Result<RigidTransform> {
            match (from, to) {
                ("link", "world") => Ok(RigidTransform::from_translation(Vector3::new(
                    0.0, 0.0, 1.0,
                ))),
                ("link", "link") | ("world", "world") => Ok(RigidTransform::identity()),
                (name, _) => Err(Error::UnknownFrame(name.to_string())),
            }
        }

        fn nodes(&self) -> Vec<String> {
            vec!["world".to_string(), "link".to_string()]
        }
    }

    #[derive(Default)]
    struct TriangleLoader {
        requested: RefCell<Vec<PathBuf>>,
    }

    impl MeshLoader for TriangleLoader {
        fn load_mesh(&self, path: &Path) -> Result<TriangleMesh> {
            self.requested.borrow_mut().push(path.to_path_buf());
            Ok(TriangleMesh::from_vertices_and_faces(
                vec![
                    Point3f::new(0.0, 0.0, 0.0),
                    Point3f::new(1.0, 0.0, 0.0),
                    Point3f::new(0.0, 1.0, 0.0),
                ],
                vec![[0, 1, 2]],
            ))
        }
    }

    #[test]
    fn test_primitives_unsupported() {
        let loader = TriangleLoader::default();
        for shape in [
            Shape::Box {
                size: Vector3::new(1.0, 1.0, 1.0),
            },
            Shape::Sphere { radius: 1.0 },
            Shape::Cylinder {
                radius: 1.0,
                length: 2.0,
            },
        ] {
            assert!(matches!(
                shape.render("link", &SingleFrame, "world", None, &loader),
                Err(Error::UnsupportedFeature(_))
            ));
        }
    }

    #[test]
    fn test_mesh_without_path_is_skipped() {
        let loader = TriangleLoader::default();
        let shape = Shape::Mesh(MeshShape::new("part.obj"));
        let rendered = shape
            .render("link", &SingleFrame, "world", None, &loader)
            .unwrap();
        assert!(rendered.is_none());
        assert!(loader.requested.borrow().is_empty());
    }

    #[test]
    fn test_mesh_scaled_placed_and_colored() {
        let loader = TriangleLoader::default();
        let object = GeometryObject::new(
            "link",
            Shape::Mesh(
                MeshShape::new("package://robot/part.obj")
                    .with_mesh_path("/meshes")
                    .with_scale(Vector3::new(2.0, 3.0, 1.0)),
            ),
        );
        let geometry = object
            .render("ignored", &SingleFrame, "world", Some(RED), &loader)
            .unwrap()
            .unwrap();

        assert_eq!(
            loader.requested.borrow().as_slice(),
            &[PathBuf::from("/meshes/robot/part.obj")]
        );
        let mesh = geometry.as_mesh().unwrap();
        assert_eq!(mesh.vertices[1], Point3f::new(2.0, 0.0, 1.0));
        assert_eq!(mesh.vertices[2], Point3f::new(0.0, 3.0, 1.0));
        assert_eq!(mesh.colors.as_deref(), Some(&[RED; 3][..]));
    }

    #[test]
    fn test_unknown_frame_propagates() {
        let loader = TriangleLoader::default();
        let shape = Shape::Mesh(MeshShape::new("part.obj").with_mesh_path("/meshes"));
        assert!(matches!(
            shape.render("missing", &SingleFrame, "world", None, &loader),
            Err(Error::UnknownFrame(_))
        ));
    }
}
