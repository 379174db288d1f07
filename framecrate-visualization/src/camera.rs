//! Camera placement from azimuth and elevation angles
//!
//! The camera extrinsic is a world-to-camera transform. Orbiting keeps the
//! distance between the camera and the world origin and places the camera on
//! a sphere around it.

use framecrate_core::{
    active_matrix_from_angle, compose_rotations, Axis, Error, Matrix3, Point3, Result,
    RigidTransform, Vector3,
};
use serde::{Deserialize, Serialize};

/// Distances below this cannot define an orbit
pub const MIN_CAMERA_DISTANCE: f64 = 1e-9;

/// World-to-camera rotation of the neutral view.
///
/// The camera looks along world -X, its image down axis is world -Z and its
/// image right axis is world +Y.
pub fn reference_world_to_camera() -> Matrix3<f64> {
    Matrix3::new(
        0.0, 1.0, 0.0, //
        0.0, 0.0, -1.0, //
        -1.0, 0.0, 0.0,
    )
}

/// Camera-to-world rotation for the given view angles in degrees
pub fn orbit_rotation(azimuth_deg: f64, elevation_deg: f64) -> Matrix3<f64> {
    let r_az = active_matrix_from_angle(Axis::Z, azimuth_deg.to_radians());
    let r_el = active_matrix_from_angle(Axis::Y, (-elevation_deg).to_radians());
    compose_rotations(
        &compose_rotations(&r_az, &r_el),
        &reference_world_to_camera().transpose(),
    )
}

/// Camera position in world coordinates
pub fn camera_center(extrinsic: &RigidTransform) -> Point3<f64> {
    Point3::from(-(extrinsic.rotation().transpose() * extrinsic.translation()))
}

/// What to do when the current camera sits at the orbit center
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum DegenerateCameraPolicy {
    /// Report [`Error::DegenerateCamera`]
    #[default]
    Fail,
    /// Orbit at this distance instead
    Clamp(f64),
}

/// View angles in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewInit {
    pub azimuth: f64,
    pub elevation: f64,
}

impl Default for ViewInit {
    fn default() -> Self {
        Self {
            azimuth: -60.0,
            elevation: 30.0,
        }
    }
}

impl ViewInit {
    pub fn new(azimuth: f64, elevation: f64) -> Self {
        Self { azimuth, elevation }
    }
}

/// Computes camera extrinsics for orbit requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraController {
    pub degenerate_policy: DegenerateCameraPolicy,
}

impl CameraController {
    pub fn new(degenerate_policy: DegenerateCameraPolicy) -> Self {
        Self { degenerate_policy }
    }

    /// New world-to-camera transform looking at the origin from the given
    /// angles, at the distance of `current`.
    ///
    /// The angles are absolute: the result does not depend on the rotation
    /// of `current`, only on its distance.
    pub fn orbit(
        &self,
        current: &RigidTransform,
        azimuth_deg: f64,
        elevation_deg: f64,
    ) -> Result<RigidTransform> {
        let distance = self.orbit_distance(current.translation().norm())?;
        let camera_to_world = orbit_rotation(azimuth_deg, elevation_deg);
        RigidTransform::from_parts(camera_to_world.transpose(), Vector3::new(0.0, 0.0, distance))
    }

    fn orbit_distance(&self, distance: f64) -> Result<f64> {
        if distance.is_finite() && distance >= MIN_CAMERA_DISTANCE {
            return Ok(distance);
        }
        match self.degenerate_policy {
            DegenerateCameraPolicy::Fail => Err(Error::DegenerateCamera { distance }),
            DegenerateCameraPolicy::Clamp(min_distance) => {
                if !(min_distance.is_finite() && min_distance >= MIN_CAMERA_DISTANCE) {
                    return Err(Error::PreconditionViolation(format!(
                        "clamp distance must be at least {}, got {}",
                        MIN_CAMERA_DISTANCE, min_distance
                    )));
                }
                let clamped = if distance.is_finite() {
                    distance.max(min_distance)
                } else {
                    min_distance
                };
                tracing::warn!(distance, clamped, "degenerate camera distance, clamping");
                Ok(clamped)
            }
        }
    }
}

/// [`CameraController::orbit`] with the default policy
pub fn orbit(current: &RigidTransform, azimuth_deg: f64, elevation_deg: f64) -> Result<RigidTransform> {
    CameraController::default().orbit(current, azimuth_deg, elevation_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn at_distance(d: f64) -> RigidTransform {
        RigidTransform::from_translation(Vector3::new(0.0, 0.0, d))
    }

    #[test]
    fn test_neutral_view() {
        let extrinsic = orbit(&at_distance(4.0), 0.0, 0.0).unwrap();
        assert_relative_eq!(extrinsic.rotation(), reference_world_to_camera(), epsilon = 1e-12);
        assert_relative_eq!(
            camera_center(&extrinsic),
            Point3::new(4.0, 0.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_elevation_raises_camera() {
        let extrinsic = orbit(&at_distance(2.0), 0.0, 90.0).unwrap();
        assert_relative_eq!(
            camera_center(&extrinsic),
            Point3::new(0.0, 0.0, 2.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_azimuth_turns_around_z() {
        let extrinsic = orbit(&at_distance(3.0), 90.0, 0.0).unwrap();
        assert_relative_eq!(
            camera_center(&extrinsic),
            Point3::new(0.0, 3.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_degenerate_policies() {
        let origin = RigidTransform::identity();
        assert!(matches!(
            orbit(&origin, 10.0, 10.0),
            Err(Error::DegenerateCamera { distance }) if distance == 0.0
        ));

        let clamped = CameraController::new(DegenerateCameraPolicy::Clamp(0.5))
            .orbit(&origin, 10.0, 10.0)
            .unwrap();
        assert_relative_eq!(clamped.translation().norm(), 0.5);

        let invalid = CameraController::new(DegenerateCameraPolicy::Clamp(0.0));
        assert!(matches!(
            invalid.orbit(&origin, 0.0, 0.0),
            Err(Error::PreconditionViolation(_))
        ));
    }
}
