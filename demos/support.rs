//! Shared setup for the demo binaries

use anyhow::Context;
use framecrate_core::Geometry;
use framecrate_visualization::{FigureConfig, Surface};
use std::path::Path;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install a formatting subscriber. `RUST_LOG` overrides the level.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")
}

/// Figure settings from a JSON file, or the defaults
pub fn load_figure_config(path: Option<&Path>) -> anyhow::Result<FigureConfig> {
    let Some(path) = path else {
        return Ok(FigureConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

/// Log what ended up on a surface
pub fn summarize(surface: &Surface) {
    let (mut meshes, mut line_sets, mut triangles, mut segments) = (0, 0, 0, 0);
    for geometry in &surface.geometries {
        match geometry {
            Geometry::Mesh(mesh) => {
                meshes += 1;
                triangles += mesh.face_count();
            }
            Geometry::LineSet(lines) => {
                line_sets += 1;
                segments += lines.line_count();
            }
        }
    }
    let eye = framecrate_visualization::camera_center(&surface.camera_extrinsic);
    info!(
        meshes,
        triangles,
        line_sets,
        segments,
        line_width = surface.line_width,
        camera = ?[eye.x, eye.y, eye.z],
        "scene"
    );
}
