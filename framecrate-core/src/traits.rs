//! Core traits for framecrate

use crate::{
    error::Result, line_set::LineSet, mesh::TriangleMesh, point::*, shape::GeometryObject,
    transform::RigidTransform,
};
use std::path::Path;

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the center point of the object
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        Point3f::from((min.coords + max.coords) / 2.0)
    }
}

/// Trait for objects that can be transformed
pub trait Transformable {
    /// Apply a transformation to the object
    fn transform(&mut self, transform: &RigidTransform);
}

/// Read access to a graph of named coordinate frames
pub trait TransformGraph {
    /// Transform from frame `from` to frame `to`.
    ///
    /// Fails with [`crate::Error::UnknownFrame`] if either frame is absent.
    fn get_transform(&self, from: &str, to: &str) -> Result<RigidTransform>;

    /// Names of all frames
    fn nodes(&self) -> Vec<String>;

    /// Visual geometry, if the graph carries any
    fn visuals(&self) -> Option<&[GeometryObject]> {
        None
    }

    /// Collision geometry, if the graph carries any
    fn collision_objects(&self) -> Option<&[GeometryObject]> {
        None
    }
}

/// Loads triangle meshes from files
pub trait MeshLoader {
    fn load_mesh(&self, path: &Path) -> Result<TriangleMesh>;
}

fn bounds_of<'a>(points: impl IntoIterator<Item = &'a Point3f>) -> (Point3f, Point3f) {
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return (Point3f::origin(), Point3f::origin());
    };

    let mut min = *first;
    let mut max = *first;
    for p in iter {
        min = min.inf(p);
        max = max.sup(p);
    }
    (min, max)
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        bounds_of(&self.vertices)
    }
}

impl Drawable for LineSet {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        bounds_of(&self.points)
    }
}

impl Transformable for TriangleMesh {
    fn transform(&mut self, transform: &RigidTransform) {
        self.apply_transform(transform);
    }
}

impl Transformable for LineSet {
    fn transform(&mut self, transform: &RigidTransform) {
        self.apply_transform(transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_and_center() {
        let lines = LineSet::polyline(
            vec![Point3f::new(-1.0, 2.0, 0.0), Point3f::new(3.0, -2.0, 4.0)],
            BLACK,
        );
        let (min, max) = lines.bounding_box();
        assert_eq!(min, Point3f::new(-1.0, -2.0, 0.0));
        assert_eq!(max, Point3f::new(3.0, 2.0, 4.0));
        assert_eq!(lines.center(), Point3f::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn test_empty_bounding_box() {
        let mesh = TriangleMesh::new();
        assert_eq!(mesh.bounding_box(), (Point3f::origin(), Point3f::origin()));
    }
}
