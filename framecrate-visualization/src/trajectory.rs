//! Trajectory geometry: a polyline through pose positions plus key frames

use crate::figure::Figure;
use crate::frame::build_frame;
use crate::renderer::Renderer;
use framecrate_core::{
    to_f32, Error, Geometry, LineSet, Point3, PoseSequence, Result, Rgb, RigidTransform, BLACK,
};
use serde::{Deserialize, Serialize};

/// Options for trajectory geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryOptions {
    /// Number of coordinate frames drawn along the path
    pub n_frames: usize,
    /// Size of each key frame
    pub scale: f64,
    /// Color of the path
    pub color: Rgb,
    /// Draw arrows along the path. Not supported; enabling it is an error.
    pub show_direction: bool,
}

impl Default for TrajectoryOptions {
    fn default() -> Self {
        Self {
            n_frames: 10,
            scale: 1.0,
            color: BLACK,
            show_direction: false,
        }
    }
}

impl TrajectoryOptions {
    pub fn with_n_frames(mut self, n_frames: usize) -> Self {
        self.n_frames = n_frames;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_show_direction(mut self, show_direction: bool) -> Self {
        self.show_direction = show_direction;
        self
    }
}

/// Path and key frames of a trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryGeometry {
    pub line_set: LineSet,
    pub key_frames: Vec<Geometry>,
}

impl TrajectoryGeometry {
    /// The path first, then the key frames in order
    pub fn into_geometries(self) -> Vec<Geometry> {
        std::iter::once(Geometry::LineSet(self.line_set))
            .chain(self.key_frames)
            .collect()
    }
}

/// Indices of the poses that get a key frame.
///
/// Evenly spaced over `0..n_poses`, rounded to the nearest pose. Duplicates
/// are kept, so the result always has `n_frames` entries.
pub fn key_frame_indices(n_poses: usize, n_frames: usize) -> Vec<usize> {
    if n_poses == 0 || n_frames == 0 {
        return Vec::new();
    }
    if n_frames == 1 {
        return vec![0];
    }
    let last = (n_poses - 1) as f64;
    let steps = (n_frames - 1) as f64;
    (0..n_frames)
        .map(|i| ((i as f64 * last / steps).round() as usize).min(n_poses - 1))
        .collect()
}

/// Build the polyline and key frames for a pose sequence
pub fn build_trajectory(
    poses: &[RigidTransform],
    n_frames: usize,
    scale: f64,
    color: Rgb,
    show_direction: bool,
) -> Result<TrajectoryGeometry> {
    if show_direction {
        return Err(Error::UnsupportedFeature(
            "direction arrows along trajectories are not supported".to_string(),
        ));
    }
    if poses.len() < 2 {
        return Err(Error::PreconditionViolation(format!(
            "a trajectory needs at least 2 poses, got {}",
            poses.len()
        )));
    }
    if n_frames == 0 {
        return Err(Error::PreconditionViolation(
            "a trajectory needs at least 1 key frame".to_string(),
        ));
    }
    if !(scale.is_finite() && scale > 0.0) {
        return Err(Error::PreconditionViolation(format!(
            "trajectory scale must be positive, got {}",
            scale
        )));
    }

    let points = poses
        .iter()
        .map(|pose| to_f32(&Point3::from(pose.translation())))
        .collect();
    let line_set = LineSet::polyline(points, color);

    let key_frames = key_frame_indices(poses.len(), n_frames)
        .into_iter()
        .map(|index| build_frame(&poses[index], scale, None))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        poses = poses.len(),
        segments = line_set.line_count(),
        key_frames = key_frames.len(),
        "built trajectory"
    );
    Ok(TrajectoryGeometry {
        line_set,
        key_frames,
    })
}

/// A pose sequence drawn as a trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    poses: PoseSequence,
    options: TrajectoryOptions,
}

impl Trajectory {
    pub fn new(poses: impl Into<PoseSequence>, options: TrajectoryOptions) -> Self {
        Self {
            poses: poses.into(),
            options,
        }
    }

    pub fn poses(&self) -> &PoseSequence {
        &self.poses
    }

    pub fn options(&self) -> &TrajectoryOptions {
        &self.options
    }

    pub fn build(&self) -> Result<TrajectoryGeometry> {
        build_trajectory(
            &self.poses.poses,
            self.options.n_frames,
            self.options.scale,
            self.options.color,
            self.options.show_direction,
        )
    }

    /// Trajectories are rebuilt rather than updated in place
    pub fn set_data(&mut self, _poses: PoseSequence) -> Result<()> {
        Err(Error::UnsupportedFeature(
            "updating a trajectory in place is not supported, build a new one".to_string(),
        ))
    }

    /// Build the trajectory and add it to a figure
    pub fn add_trajectory<R: Renderer>(&self, figure: &mut Figure<R>) -> Result<()> {
        figure.add_geometries(self.build()?.into_geometries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framecrate_core::{Vector3, RED};

    fn straight_line(n: usize) -> Vec<RigidTransform> {
        (0..n)
            .map(|i| RigidTransform::from_translation(Vector3::new(i as f64, 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn test_key_frame_indices() {
        assert_eq!(key_frame_indices(11, 3), vec![0, 5, 10]);
        assert_eq!(key_frame_indices(5, 1), vec![0]);
        assert_eq!(key_frame_indices(2, 4), vec![0, 0, 1, 1]);
        assert_eq!(key_frame_indices(4, 2), vec![0, 3]);
        let indices = key_frame_indices(100, 10);
        assert_eq!(indices.len(), 10);
        assert_eq!(indices[0], 0);
        assert_eq!(indices[9], 99);
        assert!(indices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_segments_and_colors() {
        let geometry = build_trajectory(&straight_line(6), 3, 0.1, RED, false).unwrap();
        assert_eq!(geometry.line_set.line_count(), 5);
        assert!(geometry.line_set.colors.iter().all(|c| *c == RED));
        assert_eq!(geometry.key_frames.len(), 3);
        assert_eq!(geometry.clone().into_geometries().len(), 4);
    }

    #[test]
    fn test_preconditions() {
        let poses = straight_line(3);
        assert!(matches!(
            build_trajectory(&poses[..1], 1, 1.0, BLACK, false),
            Err(Error::PreconditionViolation(_))
        ));
        assert!(matches!(
            build_trajectory(&poses, 0, 1.0, BLACK, false),
            Err(Error::PreconditionViolation(_))
        ));
        assert!(matches!(
            build_trajectory(&poses, 2, -1.0, BLACK, false),
            Err(Error::PreconditionViolation(_))
        ));
        // Unsupported direction arrows win over other problems
        assert!(matches!(
            build_trajectory(&poses[..1], 0, 0.0, BLACK, true),
            Err(Error::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: TrajectoryOptions = serde_json::from_str(r#"{"n_frames": 4}"#).unwrap();
        assert_eq!(options, TrajectoryOptions::default().with_n_frames(4));
    }
}
