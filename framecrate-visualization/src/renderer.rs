//! Rendering capability and an in-memory renderer

use framecrate_core::{Error, Geometry, Result, RigidTransform, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifies a drawing surface owned by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A renderer that displays geometry on surfaces seen through a pinhole
/// camera.
///
/// Camera extrinsics are world-to-camera transforms. Every operation on a
/// handle the renderer does not know fails with [`Error::Visualization`].
pub trait Renderer {
    fn create_surface(&mut self) -> Result<SurfaceHandle>;

    fn add_geometry(&mut self, handle: SurfaceHandle, geometry: Geometry) -> Result<()>;

    fn camera_extrinsic(&self, handle: SurfaceHandle) -> Result<RigidTransform>;

    fn set_camera_extrinsic(&mut self, handle: SurfaceHandle, extrinsic: RigidTransform)
        -> Result<()>;

    fn set_line_width(&mut self, handle: SurfaceHandle, width: f32) -> Result<()>;

    /// Block until the user closes the surface
    fn run_event_loop(&mut self, handle: SurfaceHandle) -> Result<()>;

    fn destroy(&mut self, handle: SurfaceHandle) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn create_surface(&mut self) -> Result<SurfaceHandle> {
        (**self).create_surface()
    }

    fn add_geometry(&mut self, handle: SurfaceHandle, geometry: Geometry) -> Result<()> {
        (**self).add_geometry(handle, geometry)
    }

    fn camera_extrinsic(&self, handle: SurfaceHandle) -> Result<RigidTransform> {
        (**self).camera_extrinsic(handle)
    }

    fn set_camera_extrinsic(
        &mut self,
        handle: SurfaceHandle,
        extrinsic: RigidTransform,
    ) -> Result<()> {
        (**self).set_camera_extrinsic(handle, extrinsic)
    }

    fn set_line_width(&mut self, handle: SurfaceHandle, width: f32) -> Result<()> {
        (**self).set_line_width(handle, width)
    }

    fn run_event_loop(&mut self, handle: SurfaceHandle) -> Result<()> {
        (**self).run_event_loop(handle)
    }

    fn destroy(&mut self, handle: SurfaceHandle) -> Result<()> {
        (**self).destroy(handle)
    }
}

/// Settings of the in-memory renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessRendererConfig {
    /// Camera extrinsic of new surfaces
    pub initial_extrinsic: RigidTransform,
    /// Line width of new surfaces
    pub line_width: f32,
}

impl Default for HeadlessRendererConfig {
    fn default() -> Self {
        Self {
            initial_extrinsic: RigidTransform::from_translation(Vector3::new(0.0, 0.0, 10.0)),
            line_width: 1.0,
        }
    }
}

impl HeadlessRendererConfig {
    pub fn with_initial_extrinsic(mut self, extrinsic: RigidTransform) -> Self {
        self.initial_extrinsic = extrinsic;
        self
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }
}

/// State recorded for one surface
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub geometries: Vec<Geometry>,
    pub camera_extrinsic: RigidTransform,
    pub line_width: f32,
    /// How many times the event loop ran on this surface
    pub event_loop_runs: usize,
}

/// Renderer without a window.
///
/// Geometry and camera state are recorded per surface, and the event loop
/// returns immediately. Destroyed surfaces are kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    config: HeadlessRendererConfig,
    next_id: u64,
    surfaces: HashMap<SurfaceHandle, Surface>,
    closed: Vec<(SurfaceHandle, Surface)>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HeadlessRendererConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &HeadlessRendererConfig {
        &self.config
    }

    /// A live surface
    pub fn surface(&self, handle: SurfaceHandle) -> Option<&Surface> {
        self.surfaces.get(&handle)
    }

    /// Surfaces that were destroyed, oldest first
    pub fn closed_surfaces(&self) -> &[(SurfaceHandle, Surface)] {
        &self.closed
    }

    fn surface_mut(&mut self, handle: SurfaceHandle) -> Result<&mut Surface> {
        self.surfaces
            .get_mut(&handle)
            .ok_or_else(|| unknown_surface(handle))
    }
}

fn unknown_surface(handle: SurfaceHandle) -> Error {
    Error::Visualization(format!("unknown surface {}", handle.0))
}

impl Renderer for HeadlessRenderer {
    fn create_surface(&mut self) -> Result<SurfaceHandle> {
        let handle = SurfaceHandle(self.next_id);
        self.next_id += 1;
        self.surfaces.insert(
            handle,
            Surface {
                geometries: Vec::new(),
                camera_extrinsic: self.config.initial_extrinsic,
                line_width: self.config.line_width,
                event_loop_runs: 0,
            },
        );
        tracing::debug!(surface = handle.0, "created headless surface");
        Ok(handle)
    }

    fn add_geometry(&mut self, handle: SurfaceHandle, geometry: Geometry) -> Result<()> {
        self.surface_mut(handle)?.geometries.push(geometry);
        Ok(())
    }

    fn camera_extrinsic(&self, handle: SurfaceHandle) -> Result<RigidTransform> {
        self.surface(handle)
            .map(|surface| surface.camera_extrinsic)
            .ok_or_else(|| unknown_surface(handle))
    }

    fn set_camera_extrinsic(
        &mut self,
        handle: SurfaceHandle,
        extrinsic: RigidTransform,
    ) -> Result<()> {
        self.surface_mut(handle)?.camera_extrinsic = extrinsic;
        Ok(())
    }

    fn set_line_width(&mut self, handle: SurfaceHandle, width: f32) -> Result<()> {
        if !(width.is_finite() && width > 0.0) {
            return Err(Error::PreconditionViolation(format!(
                "line width must be positive, got {}",
                width
            )));
        }
        self.surface_mut(handle)?.line_width = width;
        Ok(())
    }

    fn run_event_loop(&mut self, handle: SurfaceHandle) -> Result<()> {
        let surface = self.surface_mut(handle)?;
        surface.event_loop_runs += 1;
        tracing::debug!(
            surface = handle.0,
            geometries = surface.geometries.len(),
            "headless event loop finished"
        );
        Ok(())
    }

    fn destroy(&mut self, handle: SurfaceHandle) -> Result<()> {
        let surface = self
            .surfaces
            .remove(&handle)
            .ok_or_else(|| unknown_surface(handle))?;
        self.closed.push((handle, surface));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framecrate_core::{LineSet, Point3f, BLACK};

    #[test]
    fn test_surface_bookkeeping() {
        let mut renderer = HeadlessRenderer::new();
        let first = renderer.create_surface().unwrap();
        let second = renderer.create_surface().unwrap();
        assert_ne!(first, second);

        let lines = LineSet::polyline(vec![Point3f::origin(), Point3f::new(1.0, 0.0, 0.0)], BLACK);
        renderer.add_geometry(first, lines.into()).unwrap();
        assert_eq!(renderer.surface(first).unwrap().geometries.len(), 1);
        assert!(renderer.surface(second).unwrap().geometries.is_empty());

        assert_eq!(
            renderer.camera_extrinsic(first).unwrap().translation(),
            Vector3::new(0.0, 0.0, 10.0)
        );

        renderer.run_event_loop(first).unwrap();
        renderer.destroy(first).unwrap();
        assert!(renderer.surface(first).is_none());
        assert_eq!(renderer.closed_surfaces()[0].1.event_loop_runs, 1);
    }

    #[test]
    fn test_unknown_handle() {
        let mut renderer = HeadlessRenderer::new();
        let handle = renderer.create_surface().unwrap();
        renderer.destroy(handle).unwrap();
        assert!(matches!(
            renderer.camera_extrinsic(handle),
            Err(Error::Visualization(_))
        ));
        assert!(matches!(renderer.destroy(handle), Err(Error::Visualization(_))));
        assert!(matches!(
            renderer.set_line_width(handle, 2.0),
            Err(Error::Visualization(_))
        ));
    }

    #[test]
    fn test_config() {
        let config = HeadlessRendererConfig::default()
            .with_initial_extrinsic(RigidTransform::from_translation(Vector3::new(0.0, 0.0, 3.0)))
            .with_line_width(2.5);
        let mut renderer = HeadlessRenderer::with_config(config);
        let handle = renderer.create_surface().unwrap();
        let surface = renderer.surface(handle).unwrap();
        assert_eq!(surface.line_width, 2.5);
        assert_eq!(surface.camera_extrinsic.translation().z, 3.0);
    }

    #[test]
    fn test_config_from_json_rejects_scaled_extrinsic() {
        let config: HeadlessRendererConfig = serde_json::from_str(
            r#"{"initial_extrinsic": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,5,1]}"#,
        )
        .unwrap();
        assert_eq!(config.initial_extrinsic.translation().z, 5.0);
        assert_eq!(config.line_width, 1.0);

        let scaled = serde_json::from_str::<HeadlessRendererConfig>(
            r#"{"initial_extrinsic": [2,0,0,0, 0,2,0,0, 0,0,2,0, 0,0,0,1]}"#,
        );
        assert!(scaled.is_err());
    }
}
