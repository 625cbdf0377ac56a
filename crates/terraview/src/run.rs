//! Tracing setup and renderer hand-off.

use anyhow::Result;
use renderer::{Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(args: Args) -> Result<()> {
    initialise_tracing();

    let config =
        RendererConfig::new(args.size.width, args.size.height).with_target_fps(args.fps);
    tracing::info!(
        width = config.width,
        height = config.height,
        fps = ?config.target_fps,
        "launching terraview"
    );

    Renderer::new(config).run()
}
