//! Transform graphs built from URDF robot descriptions

use crate::manager::TransformManager;
use framecrate_core::{
    active_matrix_from_angle, compose_rotations, Axis, Error, GeometryObject, MeshShape, Result,
    RigidTransform, Shape, TransformGraph, Vector3,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Kind of motion a joint allows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointKind {
    Revolute,
    Continuous,
    Prismatic,
    Fixed,
}

/// A movable (or fixed) connection between two links
#[derive(Debug, Clone, PartialEq)]
pub struct JointInfo {
    pub name: String,
    pub parent: String,
    pub child: String,
    pub kind: JointKind,
    /// Child frame to parent frame at joint value zero
    pub origin: RigidTransform,
    /// Unit motion axis in the joint frame
    pub axis: Vector3<f64>,
    pub limits: (f64, f64),
}

impl JointInfo {
    /// Child-to-parent transform for a joint value (radians or meters).
    ///
    /// Revolute and prismatic values are clamped to the joint limits.
    pub fn child_to_parent(&self, value: f64) -> Result<RigidTransform> {
        let (lower, upper) = self.limits;
        let clamped = |value: f64| {
            if lower <= upper && !(lower..=upper).contains(&value) {
                tracing::warn!(
                    joint = %self.name,
                    value,
                    lower,
                    upper,
                    "joint value outside limits, clamping"
                );
                value.clamp(lower, upper)
            } else {
                value
            }
        };

        let motion = match self.kind {
            JointKind::Fixed => {
                return Err(Error::PreconditionViolation(format!(
                    "joint '{}' is fixed and cannot be moved",
                    self.name
                )))
            }
            JointKind::Revolute => axis_angle(&self.axis, clamped(value))?,
            JointKind::Continuous => axis_angle(&self.axis, value)?,
            JointKind::Prismatic => RigidTransform::from_translation(self.axis * clamped(value)),
        };
        Ok(self.origin.compose(&motion))
    }
}

fn axis_angle(axis: &Vector3<f64>, angle: f64) -> Result<RigidTransform> {
    let axis = nalgebra::Unit::try_new(*axis, f64::EPSILON).ok_or_else(|| {
        Error::PreconditionViolation(format!("joint axis {:?} has zero length", axis))
    })?;
    let rotation = nalgebra::Rotation3::from_axis_angle(&axis, angle);
    RigidTransform::from_parts(rotation.into_inner(), Vector3::zeros())
}

// A revolute or prismatic joint without a usable <limit> element reads as
// (0, 0) and would be frozen by clamping; treat it as unbounded.
fn joint_limits(name: &str, kind: JointKind, limit: &urdf_rs::JointLimit) -> (f64, f64) {
    let bounded = matches!(kind, JointKind::Revolute | JointKind::Prismatic);
    if bounded && !(limit.lower < limit.upper) {
        tracing::warn!(
            joint = %name,
            lower = limit.lower,
            upper = limit.upper,
            "joint has no usable limits, leaving it unbounded"
        );
        return (f64::NEG_INFINITY, f64::INFINITY);
    }
    (limit.lower, limit.upper)
}

/// Rotation from URDF roll-pitch-yaw (fixed X, then Y, then Z axes)
pub fn rotation_from_rpy(rpy: [f64; 3]) -> nalgebra::Matrix3<f64> {
    let [roll, pitch, yaw] = rpy;
    compose_rotations(
        &active_matrix_from_angle(Axis::Z, yaw),
        &compose_rotations(
            &active_matrix_from_angle(Axis::Y, pitch),
            &active_matrix_from_angle(Axis::X, roll),
        ),
    )
}

fn transform_from_pose(pose: &urdf_rs::Pose) -> Result<RigidTransform> {
    let rotation = rotation_from_rpy([pose.rpy[0], pose.rpy[1], pose.rpy[2]]);
    RigidTransform::from_parts(
        rotation,
        Vector3::new(pose.xyz[0], pose.xyz[1], pose.xyz[2]),
    )
}

/// A transform graph of a robot: one frame per link, per visual and per
/// collision object, with joints that can be moved.
#[derive(Debug, Clone)]
pub struct UrdfTransformManager {
    pub robot_name: String,
    manager: TransformManager,
    joints: HashMap<String, JointInfo>,
    joint_order: Vec<String>,
    visuals: Vec<GeometryObject>,
    collision_objects: Vec<GeometryObject>,
    mesh_path: Option<PathBuf>,
}

impl UrdfTransformManager {
    /// Parse a URDF document.
    ///
    /// `mesh_path` is the directory mesh file names are resolved against;
    /// without it, mesh geometry is kept but cannot be loaded.
    pub fn from_urdf_str(urdf: &str, mesh_path: Option<PathBuf>) -> Result<Self> {
        let robot = urdf_rs::read_from_string(urdf).map_err(|e| Error::Parse(e.to_string()))?;
        Self::from_robot(robot, mesh_path)
    }

    /// Read and parse a URDF file
    pub fn from_urdf_file<P: AsRef<Path>>(path: P, mesh_path: Option<PathBuf>) -> Result<Self> {
        let path = path.as_ref();
        let urdf = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound {
                path: path.display().to_string(),
            },
            _ => Error::Io(e),
        })?;
        Self::from_urdf_str(&urdf, mesh_path)
    }

    fn from_robot(robot: urdf_rs::Robot, mesh_path: Option<PathBuf>) -> Result<Self> {
        let mut this = Self {
            robot_name: robot.name.clone(),
            manager: TransformManager::new(),
            joints: HashMap::new(),
            joint_order: Vec::new(),
            visuals: Vec::new(),
            collision_objects: Vec::new(),
            mesh_path,
        };

        for link in &robot.links {
            this.manager.add_frame(&link.name);
            for (index, visual) in link.visual.iter().enumerate() {
                let frame = format!(
                    "visual:{}/{}",
                    link.name,
                    visual.name.clone().unwrap_or_else(|| index.to_string())
                );
                this.manager
                    .add_transform(&frame, &link.name, transform_from_pose(&visual.origin)?);
                if let Some(shape) = this.shape_from_geometry(&visual.geometry) {
                    this.visuals.push(GeometryObject::new(frame, shape));
                }
            }
            for (index, collision) in link.collision.iter().enumerate() {
                let frame = format!(
                    "collision:{}/{}",
                    link.name,
                    collision.name.clone().unwrap_or_else(|| index.to_string())
                );
                this.manager
                    .add_transform(&frame, &link.name, transform_from_pose(&collision.origin)?);
                if let Some(shape) = this.shape_from_geometry(&collision.geometry) {
                    this.collision_objects.push(GeometryObject::new(frame, shape));
                }
            }
        }

        for joint in &robot.joints {
            let kind = match joint.joint_type {
                urdf_rs::JointType::Revolute => JointKind::Revolute,
                urdf_rs::JointType::Continuous => JointKind::Continuous,
                urdf_rs::JointType::Prismatic => JointKind::Prismatic,
                urdf_rs::JointType::Fixed => JointKind::Fixed,
                ref other => {
                    return Err(Error::UnsupportedFeature(format!(
                        "joint '{}' has unsupported type {:?}",
                        joint.name, other
                    )))
                }
            };
            let info = JointInfo {
                name: joint.name.clone(),
                parent: joint.parent.link.clone(),
                child: joint.child.link.clone(),
                kind,
                origin: transform_from_pose(&joint.origin)?,
                axis: Vector3::new(joint.axis.xyz[0], joint.axis.xyz[1], joint.axis.xyz[2]),
                limits: joint_limits(&joint.name, kind, &joint.limit),
            };
            this.manager.add_transform(&info.child, &info.parent, info.origin);
            this.joint_order.push(info.name.clone());
            this.joints.insert(info.name.clone(), info);
        }

        tracing::debug!(
            robot = %this.robot_name,
            frames = this.manager.nodes().len(),
            joints = this.joints.len(),
            visuals = this.visuals.len(),
            collision_objects = this.collision_objects.len(),
            "loaded URDF"
        );
        Ok(this)
    }

    fn shape_from_geometry(&self, geometry: &urdf_rs::Geometry) -> Option<Shape> {
        match geometry {
            urdf_rs::Geometry::Box { size } => Some(Shape::Box {
                size: Vector3::new(size[0], size[1], size[2]),
            }),
            urdf_rs::Geometry::Sphere { radius } => Some(Shape::Sphere { radius: *radius }),
            urdf_rs::Geometry::Cylinder { radius, length } => Some(Shape::Cylinder {
                radius: *radius,
                length: *length,
            }),
            urdf_rs::Geometry::Mesh { filename, scale } => {
                let mut shape = MeshShape::new(filename.clone());
                if let Some(scale) = scale {
                    shape = shape.with_scale(Vector3::new(scale[0], scale[1], scale[2]));
                }
                if let Some(mesh_path) = &self.mesh_path {
                    shape = shape.with_mesh_path(mesh_path.clone());
                }
                Some(Shape::Mesh(shape))
            }
            #[allow(unreachable_patterns)]
            other => {
                tracing::warn!(?other, "skipping unsupported URDF geometry");
                None
            }
        }
    }

    /// Move a joint to a value (radians for revolute joints, meters for prismatic joints)
    pub fn set_joint(&mut self, name: &str, value: f64) -> Result<()> {
        let joint = self.joints.get(name).ok_or_else(|| {
            Error::PreconditionViolation(format!("unknown joint '{}'", name))
        })?;
        let child2parent = joint.child_to_parent(value)?;
        let (child, parent) = (joint.child.clone(), joint.parent.clone());
        self.manager.add_transform(&child, &parent, child2parent);
        Ok(())
    }

    /// Joints in document order
    pub fn joints(&self) -> impl Iterator<Item = &JointInfo> {
        self.joint_order.iter().filter_map(|name| self.joints.get(name))
    }

    pub fn joint(&self, name: &str) -> Option<&JointInfo> {
        self.joints.get(name)
    }

    /// The underlying frame graph
    pub fn manager(&self) -> &TransformManager {
        &self.manager
    }
}

impl TransformGraph for UrdfTransformManager {
    fn get_transform(&self, from: &str, to: &str) -> Result<RigidTransform> {
        self.manager.get_transform(from, to)
    }

    fn nodes(&self) -> Vec<String> {
        self.manager.nodes()
    }

    fn visuals(&self) -> Option<&[GeometryObject]> {
        Some(&self.visuals)
    }

    fn collision_objects(&self) -> Option<&[GeometryObject]> {
        Some(&self.collision_objects)
    }
}
