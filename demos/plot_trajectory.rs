//! Plot a helical trajectory with key frames
//!
//! Poses are generated as `[x, y, z, qw, qx, qy, qz]` rows, the layout
//! accepted by `plot_trajectory`.

mod support;

use anyhow::Context;
use clap::Parser;
use framecrate_core::BLACK;
use framecrate_visualization::{plot_trajectory, Figure, HeadlessRenderer, TrajectoryOptions};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "plot_trajectory")]
#[command(about = "Plot a helical trajectory with key frames", long_about = None)]
struct Args {
    /// Number of poses along the helix
    #[arg(short, long, default_value = "200")]
    poses: usize,

    /// Number of key frames
    #[arg(short, long, default_value = "10")]
    frames: usize,

    /// Size of the key frames
    #[arg(short, long, default_value = "0.3")]
    scale: f64,

    /// Figure settings (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn helix(n: usize) -> Vec<[f64; 7]> {
    (0..n)
        .map(|i| {
            let t = 4.0 * std::f64::consts::PI * i as f64 / n.max(2).saturating_sub(1) as f64;
            // Yaw follows the tangent of the circle
            let yaw = t + std::f64::consts::FRAC_PI_2;
            [
                t.cos(),
                t.sin(),
                0.1 * t,
                (yaw / 2.0).cos(),
                0.0,
                0.0,
                (yaw / 2.0).sin(),
            ]
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    support::init_logging(args.verbose)?;

    let config = support::load_figure_config(args.config.as_deref())?;
    let mut fig = Figure::with_config(HeadlessRenderer::new(), config)?;

    let options = TrajectoryOptions::default()
        .with_n_frames(args.frames)
        .with_scale(args.scale)
        .with_color(BLACK);
    plot_trajectory(&mut fig, &helix(args.poses), options)
        .context("failed to build trajectory")?;
    if config.view.is_none() {
        fig.view_init_default()?;
    }

    let surface = fig
        .renderer()
        .surface(fig.handle())
        .context("figure surface disappeared")?;
    support::summarize(surface);

    fig.show()?;
    info!("done");
    Ok(())
}
