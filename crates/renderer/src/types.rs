//! Public configuration types and workload constants.

/// Vertices per grid edge; the mesh covers the unit square with
/// `GRID_SIZE * GRID_SIZE` vertices.
pub const GRID_SIZE: u32 = 160;

/// Edge length of the procedural height texture in texels.
pub const TEXTURE_SIZE: u32 = 320;

/// Square tile edge covered by one compute workgroup.
pub const WORKGROUP_TILE: u32 = 32;

/// Depth buffer format used by the terrain pass.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// Immutable configuration passed to the renderer at start-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    /// Surface width in physical pixels.
    pub width: u32,
    /// Surface height in physical pixels.
    pub height: u32,
    /// Optional frames-per-second cap; `None` renders as fast as the
    /// surface presents.
    pub target_fps: Option<f32>,
}

impl RendererConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            target_fps: None,
        }
    }

    pub fn with_target_fps(mut self, target_fps: Option<f32>) -> Self {
        self.target_fps = target_fps.filter(|fps| *fps > 0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_fps_cap_is_discarded() {
        let config = RendererConfig::new(640, 480).with_target_fps(Some(0.0));
        assert_eq!(config.target_fps, None);

        let config = RendererConfig::new(640, 480).with_target_fps(Some(-30.0));
        assert_eq!(config.target_fps, None);

        let config = RendererConfig::new(640, 480).with_target_fps(Some(60.0));
        assert_eq!(config.target_fps, Some(60.0));
    }
}
