//! Rigid body transformations and rotation matrices

use crate::error::{Error, Result};
use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, Quaternion, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Maximum deviation from orthonormality accepted for a rotation block
pub const ROTATION_TOLERANCE: f64 = 1e-6;

/// Principal axis of a coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Index of the axis (0, 1 or 2)
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along the axis
    pub fn unit(self) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }
}

/// Active rotation matrix about a principal axis (right-hand rule)
pub fn active_matrix_from_angle(axis: Axis, angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    match axis {
        Axis::X => Matrix3::new(
            1.0, 0.0, 0.0, //
            0.0, c, -s, //
            0.0, s, c,
        ),
        Axis::Y => Matrix3::new(
            c, 0.0, s, //
            0.0, 1.0, 0.0, //
            -s, 0.0, c,
        ),
        Axis::Z => Matrix3::new(
            c, -s, 0.0, //
            s, c, 0.0, //
            0.0, 0.0, 1.0,
        ),
    }
}

/// Concatenate two rotations: `a * b` applies `b` first, then `a`
pub fn compose_rotations(a: &Matrix3<f64>, b: &Matrix3<f64>) -> Matrix3<f64> {
    a * b
}

/// Check that a matrix is a proper rotation (orthonormal, determinant +1)
pub fn check_rotation(rotation: &Matrix3<f64>) -> Result<()> {
    if rotation.iter().any(|v| !v.is_finite()) {
        return Err(Error::InvalidRotation(
            "rotation matrix contains non-finite values".to_string(),
        ));
    }

    let deviation = (rotation.transpose() * rotation - Matrix3::identity()).amax();
    if deviation > ROTATION_TOLERANCE {
        return Err(Error::InvalidRotation(format!(
            "R^T R deviates from identity by {:.3e}",
            deviation
        )));
    }

    let det = rotation.determinant();
    if (det - 1.0).abs() > ROTATION_TOLERANCE {
        return Err(Error::InvalidRotation(format!(
            "determinant is {:.6}, expected 1",
            det
        )));
    }

    Ok(())
}

/// A rigid transformation stored as a 4x4 homogeneous matrix.
///
/// The rotation block is always orthonormal with determinant +1 and the
/// bottom row is `[0, 0, 0, 1]`. Values are immutable; composing or
/// inverting produces a new transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Matrix4<f64>", into = "Matrix4<f64>")]
pub struct RigidTransform {
    matrix: Matrix4<f64>,
}

impl RigidTransform {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a pure translation
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Assemble a transform from a rotation matrix and a translation.
    ///
    /// Fails with [`Error::InvalidRotation`] if `rotation` is not a proper
    /// rotation within [`ROTATION_TOLERANCE`].
    pub fn from_parts(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Result<Self> {
        check_rotation(&rotation)?;
        if translation.iter().any(|v| !v.is_finite()) {
            return Err(Error::PreconditionViolation(
                "translation contains non-finite values".to_string(),
            ));
        }
        Ok(Self::from_parts_unchecked(&rotation, &translation))
    }

    /// Validate and wrap a homogeneous 4x4 matrix
    pub fn from_matrix(matrix: Matrix4<f64>) -> Result<Self> {
        let bottom = matrix.fixed_view::<1, 4>(3, 0);
        let expected = [0.0, 0.0, 0.0, 1.0];
        if bottom
            .iter()
            .zip(expected.iter())
            .any(|(v, e)| (v - e).abs() > ROTATION_TOLERANCE)
        {
            return Err(Error::PreconditionViolation(
                "bottom row of a rigid transform must be [0, 0, 0, 1]".to_string(),
            ));
        }
        let rotation = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let translation = matrix.fixed_view::<3, 1>(0, 3).into_owned();
        Self::from_parts(rotation, translation)
    }

    /// Create a transform from a position and a quaternion `(w, x, y, z)`.
    ///
    /// The quaternion is normalized; a zero quaternion is rejected.
    pub fn from_position_quaternion(position: Vector3<f64>, quaternion: [f64; 4]) -> Result<Self> {
        let [w, x, y, z] = quaternion;
        let q = Quaternion::new(w, x, y, z);
        if !(q.norm() > f64::EPSILON) {
            return Err(Error::PreconditionViolation(format!(
                "quaternion {:?} cannot be normalized",
                quaternion
            )));
        }
        let rotation = UnitQuaternion::from_quaternion(q).to_rotation_matrix();
        Self::from_parts(rotation.into_inner(), position)
    }

    fn from_parts_unchecked(rotation: &Matrix3<f64>, translation: &Vector3<f64>) -> Self {
        let mut matrix = Matrix4::identity();
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(rotation);
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);
        Self { matrix }
    }

    /// Rotation block
    pub fn rotation(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// Translation block
    pub fn translation(&self) -> Vector3<f64> {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// The homogeneous matrix
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        self.matrix
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation() * point.coords + self.translation())
    }

    /// Apply the rotation part to a vector
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.rotation() * vector
    }

    /// Compose with another transform: the result applies `other` first
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Inverse transform, computed in closed form (R^T, -R^T p)
    pub fn inverse(&self) -> Self {
        let rotation_t = self.rotation().transpose();
        let translation = -(rotation_t * self.translation());
        Self::from_parts_unchecked(&rotation_t, &translation)
    }

    /// Element-wise comparison with a tolerance
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.matrix - other.matrix).amax() <= epsilon
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for RigidTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

impl From<Isometry3<f64>> for RigidTransform {
    fn from(isometry: Isometry3<f64>) -> Self {
        Self {
            matrix: isometry.to_homogeneous(),
        }
    }
}

impl TryFrom<Matrix4<f64>> for RigidTransform {
    type Error = Error;

    fn try_from(matrix: Matrix4<f64>) -> Result<Self> {
        Self::from_matrix(matrix)
    }
}

impl From<RigidTransform> for Matrix4<f64> {
    fn from(transform: RigidTransform) -> Self {
        transform.matrix
    }
}
