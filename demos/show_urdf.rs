//! Show the frames and meshes of a URDF robot
//!
//! Example:
//!
//! ```text
//! show_urdf robot.urdf --mesh-path ./meshes --frame base_link --visuals --frames \
//!     --joint shoulder=0.5 --joint elbow=-1.0
//! ```

mod support;

use anyhow::{bail, Context};
use clap::Parser;
use framecrate_core::TransformGraph;
use framecrate_io::FileMeshLoader;
use framecrate_kinematics::UrdfTransformManager;
use framecrate_visualization::{
    show_transform_graph, Figure, GraphProjectionOptions, HeadlessRenderer,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "show_urdf")]
#[command(about = "Show the frames and meshes of a URDF robot", long_about = None)]
struct Args {
    /// URDF file
    urdf: PathBuf,

    /// Directory mesh file names are resolved against
    #[arg(short, long)]
    mesh_path: Option<PathBuf>,

    /// Reference frame (defaults to the first link)
    #[arg(long)]
    frame: Option<String>,

    /// Draw visual meshes
    #[arg(long)]
    visuals: bool,

    /// Draw collision meshes
    #[arg(long)]
    collision: bool,

    /// Draw a coordinate frame per graph node
    #[arg(long)]
    frames: bool,

    /// Only draw frames for these nodes
    #[arg(short, long)]
    whitelist: Vec<String>,

    /// Axis length of drawn frames
    #[arg(short, long, default_value = "0.1")]
    size: f64,

    /// Joint value as NAME=VALUE, repeatable
    #[arg(short, long)]
    joint: Vec<String>,

    /// Figure settings (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_joint(assignment: &str) -> anyhow::Result<(&str, f64)> {
    let Some((name, value)) = assignment.split_once('=') else {
        bail!("joint value '{}' is not NAME=VALUE", assignment);
    };
    let value = value
        .trim()
        .parse()
        .with_context(|| format!("invalid value for joint '{}'", name))?;
    Ok((name.trim(), value))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    support::init_logging(args.verbose)?;

    let mut tm = UrdfTransformManager::from_urdf_file(&args.urdf, args.mesh_path.clone())
        .with_context(|| format!("failed to load {}", args.urdf.display()))?;
    for assignment in &args.joint {
        let (name, value) = parse_joint(assignment)?;
        tm.set_joint(name, value)?;
    }

    let reference = match &args.frame {
        Some(frame) => frame.clone(),
        None => tm
            .nodes()
            .into_iter()
            .find(|node| !node.contains(':'))
            .context("robot has no links")?,
    };
    info!(robot = %tm.robot_name, reference = %reference, "projecting robot");

    let mut options = GraphProjectionOptions::default()
        .with_visuals(args.visuals)
        .with_collision_objects(args.collision)
        .with_frames(args.frames)
        .with_frame_size(args.size);
    if !args.whitelist.is_empty() {
        options = options.with_whitelist(args.whitelist.iter().cloned());
    }

    let config = support::load_figure_config(args.config.as_deref())?;
    let mut fig = Figure::with_config(HeadlessRenderer::new(), config)?;
    show_transform_graph(&mut fig, &tm, &reference, &options, &FileMeshLoader)?;
    if config.view.is_none() {
        fig.view_init_default()?;
    }

    if let Some(surface) = fig.renderer().surface(fig.handle()) {
        support::summarize(surface);
    }
    fig.show()?;
    Ok(())
}
