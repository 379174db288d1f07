//! Integration tests for framecrate-kinematics
//!
//! A two-link arm is parsed from URDF and queried through the
//! `TransformGraph` capability.

use approx::assert_relative_eq;
use framecrate_core::{Error, Point3, Shape, TransformGraph, Vector3};
use framecrate_kinematics::{JointKind, UrdfTransformManager};
use std::f64::consts::FRAC_PI_2;
use std::path::PathBuf;

const ARM: &str = r#"<?xml version="1.0"?>
<robot name="arm">
  <link name="base">
    <visual>
      <origin xyz="0 0 0.05" rpy="0 0 0"/>
      <geometry>
        <mesh filename="package://arm/meshes/base.obj" scale="2 2 2"/>
      </geometry>
    </visual>
    <collision>
      <geometry>
        <box size="0.2 0.2 0.1"/>
      </geometry>
    </collision>
  </link>
  <link name="upper_arm"/>
  <link name="tool"/>
  <joint name="shoulder" type="revolute">
    <parent link="base"/>
    <child link="upper_arm"/>
    <origin xyz="0 0 0.1" rpy="0 0 0"/>
    <axis xyz="0 0 1"/>
    <limit lower="-3.14" upper="3.14" effort="10" velocity="1"/>
  </joint>
  <joint name="tool_mount" type="fixed">
    <parent link="upper_arm"/>
    <child link="tool"/>
    <origin xyz="1 0 0" rpy="0 0 0"/>
  </joint>
</robot>
"#;

fn arm(mesh_path: Option<PathBuf>) -> UrdfTransformManager {
    UrdfTransformManager::from_urdf_str(ARM, mesh_path).unwrap()
}

#[test]
fn test_frames_and_joints() {
    let tm = arm(None);
    let nodes = tm.nodes();
    for name in ["base", "upper_arm", "tool", "visual:base/0", "collision:base/0"] {
        assert!(nodes.iter().any(|n| n == name), "missing frame {}", name);
    }

    let joints: Vec<_> = tm.joints().map(|j| (j.name.as_str(), j.kind)).collect();
    assert_eq!(
        joints,
        vec![("shoulder", JointKind::Revolute), ("tool_mount", JointKind::Fixed)]
    );
}

#[test]
fn test_tool_pose_follows_joint() {
    let mut tm = arm(None);

    let tool2base = tm.get_transform("tool", "base").unwrap();
    assert_relative_eq!(tool2base.translation(), Vector3::new(1.0, 0.0, 0.1), epsilon = 1e-12);

    tm.set_joint("shoulder", FRAC_PI_2).unwrap();
    let tool2base = tm.get_transform("tool", "base").unwrap();
    assert_relative_eq!(tool2base.translation(), Vector3::new(0.0, 1.0, 0.1), epsilon = 1e-12);

    let tip = tool2base.transform_point(&Point3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(tip, Point3::new(0.0, 2.0, 0.1), epsilon = 1e-12);
}

#[test]
fn test_moving_fixed_or_unknown_joint_fails() {
    let mut tm = arm(None);
    assert!(matches!(
        tm.set_joint("tool_mount", 1.0),
        Err(Error::PreconditionViolation(_))
    ));
    assert!(tm.set_joint("elbow", 1.0).is_err());
}

#[test]
fn test_geometry_objects() {
    let tm = arm(Some(PathBuf::from("/robots")));

    let visuals = tm.visuals().unwrap();
    assert_eq!(visuals.len(), 1);
    assert_eq!(visuals[0].frame, "visual:base/0");
    match &visuals[0].shape {
        Shape::Mesh(mesh) => {
            assert_eq!(mesh.scale, Vector3::new(2.0, 2.0, 2.0));
            assert_eq!(
                mesh.resolved_path(),
                Some(PathBuf::from("/robots/arm/meshes/base.obj"))
            );
        }
        other => panic!("expected mesh, got {:?}", other),
    }

    let collisions = tm.collision_objects().unwrap();
    assert_eq!(collisions.len(), 1);
    assert!(matches!(collisions[0].shape, Shape::Box { .. }));

    let visual2base = tm.get_transform("visual:base/0", "base").unwrap();
    assert_relative_eq!(visual2base.translation(), Vector3::new(0.0, 0.0, 0.05), epsilon = 1e-12);
}

#[test]
fn test_invalid_urdf() {
    assert!(matches!(
        UrdfTransformManager::from_urdf_str("<robot", None),
        Err(Error::Parse(_))
    ));
    assert!(matches!(
        UrdfTransformManager::from_urdf_file("/nonexistent/robot.urdf", None),
        Err(Error::FileNotFound { .. })
    ));
}
