//! Windowed terrain preview renderer.
//!
//! The crate owns the full path from a [`RendererConfig`] to frames on
//! screen:
//!
//! ```text
//! RendererConfig -> window + event loop -> GpuState bootstrap
//!                      |                        |
//!                 frame pacing        compute pass (height field)
//!                      |                        |
//!                 redraw request  ->  render pass (terrain grid)
//! ```
//!
//! Every frame refreshes the procedural height texture with a compute
//! dispatch, then draws the displaced grid with depth testing into the
//! window surface. The camera is fixed; the surface is created once and
//! never reconfigured.

mod gpu;
mod shaders;
mod types;
mod window;

pub use types::RendererConfig;

use anyhow::Result;

/// Owns a renderer configuration and runs the windowed loop to completion.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the window, bootstraps the GPU state, and blocks until the
    /// window closes or a fatal GPU error stops the loop.
    pub fn run(self) -> Result<()> {
        tracing::info!(
            width = self.config.width,
            height = self.config.height,
            fps_cap = ?self.config.target_fps,
            "starting renderer"
        );
        window::run_window(self.config)
    }
}
