//! Ordered sequences of poses

use crate::error::Result;
use crate::transform::RigidTransform;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// An ordered sequence of rigid transforms describing a trajectory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseSequence {
    pub poses: Vec<RigidTransform>,
}

impl PoseSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self { poses: Vec::new() }
    }

    /// Create a sequence from transforms
    pub fn from_transforms(poses: Vec<RigidTransform>) -> Self {
        Self { poses }
    }

    /// Create a sequence from rows of `[x, y, z, qw, qx, qy, qz]`
    pub fn from_positions_quaternions(rows: &[[f64; 7]]) -> Result<Self> {
        let poses = rows
            .iter()
            .map(|row| {
                RigidTransform::from_position_quaternion(
                    Vector3::new(row[0], row[1], row[2]),
                    [row[3], row[4], row[5], row[6]],
                )
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { poses })
    }

    /// Number of poses
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn push(&mut self, pose: RigidTransform) {
        self.poses.push(pose);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RigidTransform> {
        self.poses.iter()
    }

    /// Translation components in sequence order
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.poses
            .iter()
            .map(|pose| Point3::from(pose.translation()))
            .collect()
    }
}

impl Index<usize> for PoseSequence {
    type Output = RigidTransform;

    fn index(&self, index: usize) -> &Self::Output {
        &self.poses[index]
    }
}

impl From<Vec<RigidTransform>> for PoseSequence {
    fn from(poses: Vec<RigidTransform>) -> Self {
        Self::from_transforms(poses)
    }
}

impl FromIterator<RigidTransform> for PoseSequence {
    fn from_iter<I: IntoIterator<Item = RigidTransform>>(iter: I) -> Self {
        Self {
            poses: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PoseSequence {
    type Item = &'a RigidTransform;
    type IntoIter = std::slice::Iter<'a, RigidTransform>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses.iter()
    }
}
