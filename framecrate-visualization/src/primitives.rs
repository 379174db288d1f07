//! Triangle mesh primitives
//!
//! Cylinders, cones and arrows are built along +Z starting at the origin.
//! Spheres are centered at the origin.

use framecrate_core::{
    Axis, Isometry3, Point3f, Rgb, RigidTransform, TriangleMesh, Vector3, BLUE, GREEN, GREY, RED,
};
use std::f32::consts::PI;
use std::f64::consts::FRAC_PI_2;

/// Segments around the circumference of cylinders and cones
pub const DEFAULT_RESOLUTION: usize = 20;

fn ring(radius: f32, z: f32, resolution: usize) -> impl Iterator<Item = Point3f> {
    (0..resolution).map(move |i| {
        let theta = 2.0 * PI * i as f32 / resolution as f32;
        Point3f::new(radius * theta.cos(), radius * theta.sin(), z)
    })
}

/// Closed cylinder from `z = 0` to `z = height`
pub fn create_cylinder(radius: f32, height: f32, resolution: usize) -> TriangleMesh {
    let resolution = resolution.max(3);
    let mut mesh = TriangleMesh::new();
    let bottom_center = mesh.add_vertex(Point3f::new(0.0, 0.0, 0.0));
    let top_center = mesh.add_vertex(Point3f::new(0.0, 0.0, height));
    let bottom = mesh.vertices.len();
    mesh.vertices.extend(ring(radius, 0.0, resolution));
    let top = mesh.vertices.len();
    mesh.vertices.extend(ring(radius, height, resolution));

    for i in 0..resolution {
        let j = (i + 1) % resolution;
        mesh.add_face([bottom + i, bottom + j, top + j]);
        mesh.add_face([bottom + i, top + j, top + i]);
        mesh.add_face([bottom_center, bottom + j, bottom + i]);
        mesh.add_face([top_center, top + i, top + j]);
    }
    mesh
}

/// Cone with its base at `z = 0` and its apex at `z = height`
pub fn create_cone(radius: f32, height: f32, resolution: usize) -> TriangleMesh {
    let resolution = resolution.max(3);
    let mut mesh = TriangleMesh::new();
    let base_center = mesh.add_vertex(Point3f::new(0.0, 0.0, 0.0));
    let apex = mesh.add_vertex(Point3f::new(0.0, 0.0, height));
    let base = mesh.vertices.len();
    mesh.vertices.extend(ring(radius, 0.0, resolution));

    for i in 0..resolution {
        let j = (i + 1) % resolution;
        mesh.add_face([base + i, base + j, apex]);
        mesh.add_face([base_center, base + j, base + i]);
    }
    mesh
}

/// UV sphere centered at the origin
pub fn create_sphere(radius: f32, resolution: usize) -> TriangleMesh {
    let rings = resolution.max(2);
    let segments = 2 * rings;
    let mut mesh = TriangleMesh::new();

    let north = mesh.add_vertex(Point3f::new(0.0, 0.0, radius));
    for i in 1..rings {
        let phi = PI * i as f32 / rings as f32;
        mesh.vertices
            .extend(ring(radius * phi.sin(), radius * phi.cos(), segments));
    }
    let south = mesh.add_vertex(Point3f::new(0.0, 0.0, -radius));

    let ring_start = |i: usize| 1 + (i - 1) * segments;
    for j in 0..segments {
        let k = (j + 1) % segments;
        mesh.add_face([north, ring_start(1) + j, ring_start(1) + k]);
        let last = ring_start(rings - 1);
        mesh.add_face([south, last + k, last + j]);
    }
    for i in 1..rings - 1 {
        let upper = ring_start(i);
        let lower = ring_start(i + 1);
        for j in 0..segments {
            let k = (j + 1) % segments;
            mesh.add_face([upper + j, lower + j, lower + k]);
            mesh.add_face([upper + j, lower + k, upper + k]);
        }
    }
    mesh
}

/// Arrow along +Z whose tip is at `z = cylinder_height + cone_height`
pub fn create_arrow(
    cylinder_radius: f32,
    cone_radius: f32,
    cylinder_height: f32,
    cone_height: f32,
    resolution: usize,
) -> TriangleMesh {
    let mut arrow = create_cylinder(cylinder_radius, cylinder_height, resolution);
    let mut cone = create_cone(cone_radius, cone_height, resolution);
    for vertex in &mut cone.vertices {
        vertex.z += cylinder_height;
    }
    arrow.merge(&cone);
    arrow
}

/// Axis triad of length `size`: red X, green Y and blue Z arrows around a
/// grey origin sphere.
///
/// Arrow tips are exactly at `size` along each axis.
pub fn create_coordinate_frame(size: f32) -> TriangleMesh {
    let mut frame = create_sphere(0.06 * size, DEFAULT_RESOLUTION / 2);
    frame.paint_uniform_color(GREY);

    let axes: [(Axis, Rgb); 3] = [(Axis::X, RED), (Axis::Y, GREEN), (Axis::Z, BLUE)];
    for (axis, color) in axes {
        let mut arrow = create_arrow(
            0.035 * size,
            0.06 * size,
            0.8 * size,
            0.2 * size,
            DEFAULT_RESOLUTION,
        );
        // Pin the tip to the exact axis length
        if let Some(apex) = arrow.vertices.iter_mut().max_by(|a, b| a.z.total_cmp(&b.z)) {
            apex.z = size;
        }
        arrow.apply_transform(&arrow_orientation(axis));
        arrow.paint_uniform_color(color);
        frame.merge(&arrow);
    }
    frame
}

/// Rotation taking +Z onto the given axis
fn arrow_orientation(axis: Axis) -> RigidTransform {
    let axis_angle = match axis {
        Axis::X => Vector3::y() * FRAC_PI_2,
        Axis::Y => Vector3::x() * -FRAC_PI_2,
        Axis::Z => Vector3::zeros(),
    };
    RigidTransform::from(Isometry3::rotation(axis_angle))
}
