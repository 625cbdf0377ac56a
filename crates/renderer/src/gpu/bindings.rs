//! Bind-group wiring between concrete resources and pipeline layouts.
//!
//! Both groups are created once at bootstrap; no resource they reference is
//! ever replaced, so they are never rebuilt.

use super::texture::HeightFieldTexture;

/// Binds the uniform buffer, height texture view, and sampler for the
/// terrain pass.
pub(crate) fn render_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniform_buffer: &wgpu::Buffer,
    height: &HeightFieldTexture,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("terrain bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&height.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&height.sampler),
            },
        ],
    })
}

/// Binds the height texture view as the compute pass's storage target.
pub(crate) fn compute_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    height: &HeightFieldTexture,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("height compute bind group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::TextureView(&height.view),
        }],
    })
}
