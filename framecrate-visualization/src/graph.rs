//! Projection of transform graphs into drawable geometry

use crate::figure::Figure;
use crate::frame::build_frame;
use crate::renderer::Renderer;
use crate::shapes::ShowShape;
use framecrate_core::{Geometry, GeometryObject, MeshLoader, Result, Rgb, TransformGraph};
use serde::{Deserialize, Serialize};

/// What parts of a transform graph to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphProjectionOptions {
    /// Draw one coordinate frame per graph node
    pub frames: bool,
    pub visuals: bool,
    pub collision_objects: bool,
    /// Only draw frames for these nodes
    pub whitelist: Option<Vec<String>>,
    pub frame_size: f64,
    /// Paint all shapes with this color
    pub color: Option<Rgb>,
}

impl Default for GraphProjectionOptions {
    fn default() -> Self {
        Self {
            frames: false,
            visuals: false,
            collision_objects: false,
            whitelist: None,
            frame_size: 1.0,
            color: None,
        }
    }
}

impl GraphProjectionOptions {
    pub fn with_frames(mut self, frames: bool) -> Self {
        self.frames = frames;
        self
    }

    pub fn with_visuals(mut self, visuals: bool) -> Self {
        self.visuals = visuals;
        self
    }

    pub fn with_collision_objects(mut self, collision_objects: bool) -> Self {
        self.collision_objects = collision_objects;
        self
    }

    pub fn with_whitelist<I, S>(mut self, whitelist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = Some(whitelist.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_frame_size(mut self, frame_size: f64) -> Self {
        self.frame_size = frame_size;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    fn allows(&self, node: &str) -> bool {
        self.whitelist
            .as_ref()
            .map_or(true, |names| names.iter().any(|name| name == node))
    }
}

/// Geometry of a transform graph expressed in `reference_frame`.
///
/// Collision objects come first, then visuals, then frames in node order.
pub fn project_graph<G, L>(
    graph: &G,
    reference_frame: &str,
    options: &GraphProjectionOptions,
    loader: &L,
) -> Result<Vec<Geometry>>
where
    G: TransformGraph + ?Sized,
    L: MeshLoader + ?Sized,
{
    let mut geometries = Vec::new();

    if options.collision_objects {
        match graph.collision_objects() {
            Some(objects) => project_objects(
                objects,
                graph,
                reference_frame,
                options.color,
                loader,
                &mut geometries,
            )?,
            None => tracing::warn!("graph has no collision objects, skipping"),
        }
    }
    if options.visuals {
        match graph.visuals() {
            Some(objects) => project_objects(
                objects,
                graph,
                reference_frame,
                options.color,
                loader,
                &mut geometries,
            )?,
            None => tracing::warn!("graph has no visuals, skipping"),
        }
    }
    if options.frames {
        for node in graph.nodes() {
            if !options.allows(&node) {
                continue;
            }
            let node2reference = graph.get_transform(&node, reference_frame)?;
            geometries.push(build_frame(&node2reference, options.frame_size, None)?);
        }
    }

    tracing::debug!(
        reference_frame,
        geometries = geometries.len(),
        "projected transform graph"
    );
    Ok(geometries)
}

fn project_objects<G, L>(
    objects: &[GeometryObject],
    graph: &G,
    reference_frame: &str,
    color: Option<Rgb>,
    loader: &L,
    geometries: &mut Vec<Geometry>,
) -> Result<()>
where
    G: TransformGraph + ?Sized,
    L: MeshLoader + ?Sized,
{
    for object in objects {
        let rendered = object.render(&object.frame, graph, reference_frame, color, loader)?;
        geometries.extend(rendered);
    }
    Ok(())
}

/// Project a transform graph and add the geometry to a figure
pub fn show_transform_graph<R, G, L>(
    figure: &mut Figure<R>,
    graph: &G,
    reference_frame: &str,
    options: &GraphProjectionOptions,
    loader: &L,
) -> Result<()>
where
    R: Renderer,
    G: TransformGraph + ?Sized,
    L: MeshLoader + ?Sized,
{
    let geometries = project_graph(graph, reference_frame, options, loader)?;
    figure.add_geometries(geometries)
}
