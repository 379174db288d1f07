//! Coordinate frame geometry

use crate::figure::Figure;
use crate::primitives::create_coordinate_frame;
use crate::renderer::Renderer;
use framecrate_core::{Error, Geometry, Result, RigidTransform};

/// Axis triad of length `size` placed at `a2b`.
///
/// The triad is drawn in frame A and mapped into frame B, so the tip of
/// axis `i` lands at `a2b * (size * e_i)`. Labels are accepted but not
/// rendered.
pub fn build_frame(a2b: &RigidTransform, size: f64, label: Option<&str>) -> Result<Geometry> {
    check_size(size)?;
    if let Some(label) = label {
        tracing::warn!(label, "frame labels are not supported and will not be drawn");
    }

    let mut mesh = create_coordinate_frame(size as f32);
    mesh.apply_transform(a2b);
    Ok(Geometry::Mesh(mesh))
}

fn check_size(size: f64) -> Result<()> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(Error::PreconditionViolation(format!(
            "frame size must be positive, got {}",
            size
        )))
    }
}

/// A coordinate frame that can be added to a figure
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    a2b: RigidTransform,
    size: f64,
    label: Option<String>,
}

impl Frame {
    pub fn new(a2b: RigidTransform, size: f64) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            a2b,
            size,
            label: None,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn pose(&self) -> &RigidTransform {
        &self.a2b
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Geometry of the frame in the target frame
    pub fn build(&self) -> Result<Geometry> {
        build_frame(&self.a2b, self.size, self.label.as_deref())
    }

    /// Frames are rebuilt rather than updated in place
    pub fn set_data(&mut self, _a2b: RigidTransform, _label: Option<&str>) -> Result<()> {
        Err(Error::UnsupportedFeature(
            "updating a frame in place is not supported, build a new one".to_string(),
        ))
    }

    /// Build the frame and add it to a figure
    pub fn add_frame<R: Renderer>(&self, figure: &mut Figure<R>) -> Result<()> {
        figure.add_geometry(self.build()?)
    }
}
