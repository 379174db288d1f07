//! Figures: one renderer surface plus camera control

use crate::camera::{CameraController, DegenerateCameraPolicy, ViewInit};
use crate::frame::Frame;
use crate::renderer::{HeadlessRenderer, Renderer, SurfaceHandle};
use crate::trajectory::{Trajectory, TrajectoryOptions};
use framecrate_core::{Geometry, Matrix3, PoseSequence, Result, RigidTransform, Vector3};
use serde::{Deserialize, Serialize};

/// Settings applied when a figure is created
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Line width for line sets, if the renderer default should be replaced
    pub line_width: Option<f32>,
    /// Initial view angles, if the renderer's camera should be moved
    pub view: Option<ViewInit>,
    pub degenerate_policy: DegenerateCameraPolicy,
}

impl FigureConfig {
    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = Some(line_width);
        self
    }

    pub fn with_view(mut self, view: ViewInit) -> Self {
        self.view = Some(view);
        self
    }

    pub fn with_degenerate_policy(mut self, policy: DegenerateCameraPolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }
}

/// A drawing surface of a renderer.
///
/// The renderer's camera extrinsic is the only camera state; `view_init`
/// reads it, computes a new one and writes it back.
#[derive(Debug)]
pub struct Figure<R: Renderer> {
    renderer: R,
    handle: SurfaceHandle,
    camera: CameraController,
}

impl<R: Renderer> Figure<R> {
    /// Open a surface on `renderer` with default settings
    pub fn new(renderer: R) -> Result<Self> {
        Self::with_config(renderer, FigureConfig::default())
    }

    pub fn with_config(mut renderer: R, config: FigureConfig) -> Result<Self> {
        let handle = renderer.create_surface()?;
        let mut figure = Self {
            renderer,
            handle,
            camera: CameraController::new(config.degenerate_policy),
        };
        if let Err(err) = figure.apply_config(&config) {
            if let Err(cleanup) = figure.renderer.destroy(handle) {
                tracing::warn!(%cleanup, "failed to destroy surface of a rejected figure");
            }
            return Err(err);
        }
        Ok(figure)
    }

    fn apply_config(&mut self, config: &FigureConfig) -> Result<()> {
        if let Some(width) = config.line_width {
            self.set_line_width(width)?;
        }
        if let Some(view) = config.view {
            self.view_init(view.azimuth, view.elevation)?;
        }
        Ok(())
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> Result<()> {
        self.renderer.add_geometry(self.handle, geometry)
    }

    pub fn add_geometries(&mut self, geometries: impl IntoIterator<Item = Geometry>) -> Result<()> {
        for geometry in geometries {
            self.add_geometry(geometry)?;
        }
        Ok(())
    }

    pub fn set_line_width(&mut self, line_width: f32) -> Result<()> {
        self.renderer.set_line_width(self.handle, line_width)
    }

    /// Look at the origin from the given azimuth and elevation (degrees),
    /// keeping the current camera distance.
    pub fn view_init(&mut self, azimuth: f64, elevation: f64) -> Result<()> {
        let current = self.renderer.camera_extrinsic(self.handle)?;
        let extrinsic = self.camera.orbit(&current, azimuth, elevation)?;
        tracing::debug!(azimuth, elevation, "moving camera");
        self.renderer.set_camera_extrinsic(self.handle, extrinsic)
    }

    /// [`Figure::view_init`] with the default angles
    pub fn view_init_default(&mut self) -> Result<()> {
        let view = ViewInit::default();
        self.view_init(view.azimuth, view.elevation)
    }

    pub fn camera_extrinsic(&self) -> Result<RigidTransform> {
        self.renderer.camera_extrinsic(self.handle)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn handle(&self) -> SurfaceHandle {
        self.handle
    }

    /// Run the renderer's event loop, then close the surface.
    ///
    /// Gives the renderer back so it can be reused or inspected.
    pub fn show(mut self) -> Result<R> {
        self.renderer.run_event_loop(self.handle)?;
        self.renderer.destroy(self.handle)?;
        Ok(self.renderer)
    }
}

/// A figure on a new headless renderer
pub fn figure() -> Result<Figure<HeadlessRenderer>> {
    Figure::new(HeadlessRenderer::new())
}

/// Draw the basis given by `rotation` and `position`, with axes of length `size`
pub fn plot_basis<R: Renderer>(
    figure: &mut Figure<R>,
    rotation: &Matrix3<f64>,
    position: &Vector3<f64>,
    size: f64,
) -> Result<()> {
    let a2b = RigidTransform::from_parts(*rotation, *position)?;
    Frame::new(a2b, size)?.add_frame(figure)
}

/// Draw a trajectory given as rows of `[x, y, z, qw, qx, qy, qz]`
pub fn plot_trajectory<R: Renderer>(
    figure: &mut Figure<R>,
    positions_quaternions: &[[f64; 7]],
    options: TrajectoryOptions,
) -> Result<()> {
    let poses = PoseSequence::from_positions_quaternions(positions_quaternions)?;
    Trajectory::new(poses, options).add_trajectory(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::HeadlessRendererConfig;
    use approx::assert_relative_eq;
    use framecrate_core::Error;

    #[test]
    fn test_view_init_keeps_distance() {
        let mut fig = figure().unwrap();
        fig.view_init(30.0, 45.0).unwrap();
        let extrinsic = fig.camera_extrinsic().unwrap();
        assert_relative_eq!(extrinsic.translation().norm(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_config_applied() {
        let config = FigureConfig::default()
            .with_line_width(3.0)
            .with_view(ViewInit::default());
        let fig = Figure::with_config(HeadlessRenderer::new(), config).unwrap();
        let surface = fig.renderer().surface(fig.handle()).unwrap();
        assert_eq!(surface.line_width, 3.0);
        assert_ne!(
            surface.camera_extrinsic,
            RigidTransform::from_translation(Vector3::new(0.0, 0.0, 10.0))
        );
    }

    #[test]
    fn test_degenerate_camera_surfaces_error() {
        let renderer = HeadlessRenderer::with_config(
            HeadlessRendererConfig::default().with_initial_extrinsic(RigidTransform::identity()),
        );
        let mut fig = Figure::new(renderer).unwrap();
        assert!(matches!(
            fig.view_init(0.0, 0.0),
            Err(Error::DegenerateCamera { .. })
        ));
        // The stored extrinsic is untouched
        assert_eq!(fig.camera_extrinsic().unwrap(), RigidTransform::identity());
    }

    #[test]
    fn test_rejected_config_closes_surface() {
        let mut renderer = HeadlessRenderer::with_config(
            HeadlessRendererConfig::default().with_initial_extrinsic(RigidTransform::identity()),
        );
        let config = FigureConfig::default().with_view(ViewInit::default());
        assert!(matches!(
            Figure::with_config(&mut renderer, config),
            Err(Error::DegenerateCamera { .. })
        ));

        let closed = renderer.closed_surfaces();
        assert_eq!(closed.len(), 1);
        assert!(renderer.surface(closed[0].0).is_none());

        let bad_width = FigureConfig::default().with_line_width(-1.0);
        assert!(Figure::with_config(&mut renderer, bad_width).is_err());
        assert_eq!(renderer.closed_surfaces().len(), 2);
    }

    #[test]
    fn test_plot_helpers() {
        let mut fig = figure().unwrap();
        plot_basis(&mut fig, &Matrix3::identity(), &Vector3::new(1.0, 0.0, 0.0), 0.5).unwrap();
        let rows = [
            [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            [2.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        ];
        plot_trajectory(&mut fig, &rows, TrajectoryOptions::default().with_n_frames(2)).unwrap();

        let handle = fig.handle();
        let renderer = fig.show().unwrap();
        let (closed, surface) = &renderer.closed_surfaces()[0];
        assert_eq!(*closed, handle);
        // basis + path + two key frames
        assert_eq!(surface.geometries.len(), 4);
        assert_eq!(surface.event_loop_runs, 1);
    }

    #[test]
    fn test_plot_trajectory_rejects_direction() {
        let mut fig = figure().unwrap();
        let rows = [[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]; 2];
        let options = TrajectoryOptions::default().with_show_direction(true);
        assert!(matches!(
            plot_trajectory(&mut fig, &rows, options),
            Err(Error::UnsupportedFeature(_))
        ));
    }
}
