//! Plot coordinate frames rotated about each principal axis

mod support;

use clap::Parser;
use framecrate_core::{active_matrix_from_angle, Axis, Matrix3, RigidTransform, Vector3};
use framecrate_visualization::{plot_basis, Figure, Frame, HeadlessRenderer};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plot_basis")]
#[command(about = "Plot coordinate frames rotated about each axis", long_about = None)]
struct Args {
    /// Rotation angle in degrees
    #[arg(short, long, default_value = "45")]
    angle: f64,

    /// Axis length
    #[arg(short, long, default_value = "1.0")]
    size: f64,

    /// Camera azimuth in degrees
    #[arg(long, default_value = "-60")]
    azimuth: f64,

    /// Camera elevation in degrees
    #[arg(long, default_value = "30")]
    elevation: f64,

    /// Figure settings (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    support::init_logging(args.verbose)?;

    let config = support::load_figure_config(args.config.as_deref())?;
    let mut fig = Figure::with_config(HeadlessRenderer::new(), config)?;

    // Reference frame at the origin, one rotated frame per axis beside it
    plot_basis(&mut fig, &Matrix3::identity(), &Vector3::zeros(), args.size)?;
    for (i, axis) in [Axis::X, Axis::Y, Axis::Z].into_iter().enumerate() {
        let rotation = active_matrix_from_angle(axis, args.angle.to_radians());
        let offset = 2.0 * args.size * (i + 1) as f64;
        plot_basis(&mut fig, &rotation, &Vector3::new(offset, 0.0, 0.0), args.size)?;
    }

    // Labels are accepted but not drawn
    let labeled = RigidTransform::from_translation(Vector3::new(0.0, 2.0 * args.size, 0.0));
    Frame::new(labeled, 0.5 * args.size)?
        .with_label("labeled")
        .add_frame(&mut fig)?;

    if config.view.is_none() {
        fig.view_init(args.azimuth, args.elevation)?;
    }

    if let Some(surface) = fig.renderer().surface(fig.handle()) {
        support::summarize(surface);
    }
    fig.show()?;
    Ok(())
}
