//! Per-surface GPU state and the per-frame tick.

use anyhow::{Context as AnyhowContext, Result};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::dpi::PhysicalSize;

use crate::types::{TEXTURE_SIZE, WORKGROUP_TILE};

use super::bindings;
use super::context::GpuContext;
use super::geometry::GridBuffers;
use super::pipeline::{ComputePipelineBundle, RenderPipelineBundle};
use super::plan;
use super::texture::{DepthTarget, HeightFieldTexture};
use super::uniforms::TerrainUniforms;

/// Everything a frame needs, built once at bootstrap.
///
/// Field order doubles as teardown order: bind groups drop before the
/// pipelines and layouts they were created from, and every resource drops
/// before the owning `GpuContext`.
pub(crate) struct GpuState {
    render_bind_group: wgpu::BindGroup,
    compute_bind_group: wgpu::BindGroup,
    render: RenderPipelineBundle,
    compute: ComputePipelineBundle,
    geometry: GridBuffers,
    uniform_buffer: wgpu::Buffer,
    uniforms: TerrainUniforms,
    _height: HeightFieldTexture,
    depth: DepthTarget,
    context: GpuContext,
    frame_count: u64,
}

impl GpuState {
    pub(crate) fn new<T>(target: &T, size: PhysicalSize<u32>) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        debug_assert!(plan::dependencies_precede_steps());

        let context = GpuContext::new(target, size).context("GPU context bootstrap failed")?;

        let render = RenderPipelineBundle::new(&context.device, context.surface_format)
            .context("failed to build terrain render pipeline")?;
        let compute = ComputePipelineBundle::new(&context.device)
            .context("failed to build height compute pipeline")?;

        let geometry = GridBuffers::new(&context.device, &context.queue);

        let uniforms = TerrainUniforms::for_surface(context.size);
        let uniform_buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("terrain uniforms"),
            size: std::mem::size_of::<TerrainUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        context
            .queue
            .write_buffer(&uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let height = HeightFieldTexture::new(&context.device, &context.queue);
        let depth = DepthTarget::new(&context.device, context.size.width, context.size.height);

        let render_bind_group = bindings::render_bind_group(
            &context.device,
            &render.bind_layout,
            &uniform_buffer,
            &height,
        );
        let compute_bind_group =
            bindings::compute_bind_group(&context.device, &compute.bind_layout, &height);

        Ok(Self {
            render_bind_group,
            compute_bind_group,
            render,
            compute,
            geometry,
            uniform_buffer,
            uniforms,
            _height: height,
            depth,
            context,
            frame_count: 0,
        })
    }

    /// Runs one frame: refresh the height field on the compute queue, then
    /// draw the terrain into the acquired surface texture.
    ///
    /// The surface texture is acquired before anything is submitted, so a
    /// failed acquisition leaves both queues untouched for this tick. Both
    /// submissions go to the same queue and the compute one is first; the
    /// render pass reads the texture the compute pass wrote without any
    /// explicit fence.
    pub(crate) fn render(&mut self) -> std::result::Result<(), wgpu::SurfaceError> {
        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.uniforms = TerrainUniforms::for_surface(self.context.size);
        self.context
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));

        let mut compute_encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("height compute encoder"),
                });
        {
            let mut pass = compute_encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("height compute pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.compute.pipeline);
            pass.set_bind_group(0, &self.compute_bind_group, &[]);
            let groups = TEXTURE_SIZE.div_ceil(WORKGROUP_TILE);
            pass.dispatch_workgroups(groups, groups, 1);
        }
        self.context.queue.submit(Some(compute_encoder.finish()));

        let mut render_encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("terrain render encoder"),
                });
        {
            let mut pass = render_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("terrain render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.05,
                            g: 0.05,
                            b: 0.05,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.render.pipeline);
            pass.set_bind_group(0, &self.render_bind_group, &[]);
            pass.set_vertex_buffer(0, self.geometry.vertex.slice(..));
            pass.set_index_buffer(self.geometry.index.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.geometry.index_count, 0, 0..1);
        }
        self.context.queue.submit(Some(render_encoder.finish()));

        frame.present();
        self.frame_count += 1;
        tracing::trace!(frame = self.frame_count, "presented frame");
        Ok(())
    }
}
