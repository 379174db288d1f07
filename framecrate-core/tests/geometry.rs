//! Integration tests for framecrate-core
//!
//! Poses drive drawable geometry through the public traits.

use approx::assert_relative_eq;
use framecrate_core::{
    active_matrix_from_angle, Axis, Drawable, Geometry, Isometry3, LineSet, Point3, Point3f,
    PoseSequence, RigidTransform, Transformable, TriangleMesh, Vector3, RED,
};
use std::f64::consts::FRAC_PI_2;

#[test]
fn test_pose_sequence_positions() {
    let rows = [
        [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        [1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0],
    ];
    let poses = PoseSequence::from_positions_quaternions(&rows).unwrap();
    assert_eq!(poses.len(), 2);
    assert_eq!(poses.positions(), vec![Point3::origin(), Point3::new(1.0, 2.0, 3.0)]);

    // 180 degrees about z
    let turned = poses[1].transform_vector(&Vector3::x());
    assert_relative_eq!(turned, -Vector3::x(), epsilon = 1e-12);
}

#[test]
fn test_geometry_follows_transform() {
    let lines = LineSet::polyline(
        vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 0.0, 0.0)],
        RED,
    );
    let mesh = TriangleMesh::from_vertices_and_faces(
        vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
            Point3f::new(0.0, 0.0, 1.0),
        ],
        vec![[0, 1, 2]],
    );
    let transform = RigidTransform::from_parts(
        active_matrix_from_angle(Axis::Z, FRAC_PI_2),
        Vector3::new(0.0, 0.0, 2.0),
    )
    .unwrap();

    let mut geometries: Vec<Geometry> = vec![lines.into(), mesh.into()];
    for geometry in &mut geometries {
        geometry.transform(&transform);
    }

    let (min, max) = geometries[0].bounding_box();
    assert!((min - Point3f::new(0.0, 0.0, 2.0)).norm() < 1e-6);
    assert!((max - Point3f::new(0.0, 1.0, 2.0)).norm() < 1e-6);

    let center = geometries[1].center();
    assert!((center - Point3f::new(-0.5, 0.0, 2.5)).norm() < 1e-6);
    assert_eq!(geometries[1].kind(), "mesh");
}

#[test]
fn test_isometry_conversion() {
    let isometry = Isometry3::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.3));
    let transform = RigidTransform::from(isometry);
    let p = Point3::new(0.2, 0.4, -1.0);
    assert_relative_eq!(transform.transform_point(&p), isometry * p, epsilon = 1e-12);

    let from_matrix = RigidTransform::try_from(transform.to_homogeneous()).unwrap();
    assert_eq!(from_matrix, transform);
}
