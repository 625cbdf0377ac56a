//! Capability negotiation against the adapter's supported limits.

use winit::dpi::PhysicalSize;

use crate::types::{GRID_SIZE, TEXTURE_SIZE, WORKGROUP_TILE};

use super::uniforms::TerrainUniforms;

/// Computes the minimal limits sufficient for the terrain workload.
///
/// Every ceiling is the smallest value this renderer can run with: one
/// vertex buffer with one attribute, two bind groups, one uniform buffer,
/// one sampled texture, one sampler, and one storage texture per stage,
/// plus a 32x32 compute tile. The `min_*_offset_alignment` fields are
/// minimum limits and are forwarded verbatim from the adapter; tightening
/// them would reject otherwise-capable hardware.
pub(crate) fn required_limits(
    supported: &wgpu::Limits,
    surface_size: PhysicalSize<u32>,
) -> wgpu::Limits {
    let vertex_buffer_bytes =
        u64::from(GRID_SIZE) * u64::from(GRID_SIZE) * 3 * std::mem::size_of::<f32>() as u64;
    let texture_dimension = surface_size
        .width
        .max(surface_size.height)
        .max(TEXTURE_SIZE);

    wgpu::Limits {
        max_vertex_attributes: 1,
        max_vertex_buffers: 1,
        max_buffer_size: vertex_buffer_bytes,
        max_vertex_buffer_array_stride: 3 * std::mem::size_of::<f32>() as u32,
        max_bind_groups: 2,
        max_uniform_buffers_per_shader_stage: 1,
        max_uniform_buffer_binding_size: std::mem::size_of::<TerrainUniforms>() as u32,
        max_texture_dimension_1d: texture_dimension,
        max_texture_dimension_2d: texture_dimension,
        max_texture_array_layers: 1,
        max_sampled_textures_per_shader_stage: 1,
        max_samplers_per_shader_stage: 1,
        max_storage_textures_per_shader_stage: 1,
        min_uniform_buffer_offset_alignment: supported.min_uniform_buffer_offset_alignment,
        min_storage_buffer_offset_alignment: supported.min_storage_buffer_offset_alignment,
        max_compute_workgroup_size_x: WORKGROUP_TILE,
        max_compute_workgroup_size_y: WORKGROUP_TILE,
        max_compute_workgroup_size_z: 1,
        max_compute_invocations_per_workgroup: WORKGROUP_TILE * WORKGROUP_TILE,
        ..wgpu::Limits::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::geometry::grid_mesh;

    fn supported_with_alignments(uniform: u32, storage: u32) -> wgpu::Limits {
        wgpu::Limits {
            min_uniform_buffer_offset_alignment: uniform,
            min_storage_buffer_offset_alignment: storage,
            ..wgpu::Limits::default()
        }
    }

    #[test]
    fn alignment_fields_are_forwarded_verbatim() {
        let supported = supported_with_alignments(4096, 512);
        let requested = required_limits(&supported, PhysicalSize::new(800, 600));

        assert_eq!(requested.min_uniform_buffer_offset_alignment, 4096);
        assert_eq!(requested.min_storage_buffer_offset_alignment, 512);
    }

    #[test]
    fn buffer_ceiling_covers_the_grid_uploads() {
        let requested = required_limits(&wgpu::Limits::default(), PhysicalSize::new(800, 600));
        let (positions, indices) = grid_mesh(GRID_SIZE);

        assert!(requested.max_buffer_size >= (positions.len() * 4) as u64);
        assert!(requested.max_buffer_size >= (indices.len() * 2) as u64);
        assert!(requested.max_buffer_size >= std::mem::size_of::<TerrainUniforms>() as u64);
    }

    #[test]
    fn texture_ceiling_covers_surface_and_height_map() {
        let requested = required_limits(&wgpu::Limits::default(), PhysicalSize::new(2560, 1440));
        assert!(requested.max_texture_dimension_2d >= 2560);
        assert!(requested.max_texture_dimension_2d >= TEXTURE_SIZE);

        // A surface smaller than the height texture must not shrink the
        // ceiling below the texture resolution.
        let small = required_limits(&wgpu::Limits::default(), PhysicalSize::new(100, 100));
        assert!(small.max_texture_dimension_2d >= TEXTURE_SIZE);
    }

    #[test]
    fn workgroup_bounds_match_the_compute_tile() {
        let requested = required_limits(&wgpu::Limits::default(), PhysicalSize::new(800, 600));
        assert_eq!(requested.max_compute_workgroup_size_x, WORKGROUP_TILE);
        assert_eq!(requested.max_compute_workgroup_size_y, WORKGROUP_TILE);
        assert_eq!(requested.max_compute_workgroup_size_z, 1);
        assert_eq!(
            requested.max_compute_invocations_per_workgroup,
            WORKGROUP_TILE * WORKGROUP_TILE
        );
    }
}
