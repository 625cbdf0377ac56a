//! Embedded WGSL shader modules.
//!
//! Shader acquisition is deliberately fallible at the API seam: the builders
//! treat a failed module as a fatal bootstrap error, so both loaders return
//! `Result` even though the embedded sources are expected to compile.

use anyhow::Result;

/// Compiles the terrain render shader (`vs_main` / `fs_main`).
pub(crate) fn load_terrain_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule> {
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("terrain shader"),
        source: wgpu::ShaderSource::Wgsl(TERRAIN_SHADER_WGSL.into()),
    }))
}

/// Compiles the height-field compute kernel (`cs_main`).
pub(crate) fn load_compute_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule> {
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("height compute shader"),
        source: wgpu::ShaderSource::Wgsl(COMPUTE_SHADER_WGSL.into()),
    }))
}

/// Terrain pass: the vertex stage displaces the flat grid by the sampled
/// height, the fragment stage tints by elevation. The uniform block layout
/// must match `TerrainUniforms` in `gpu/uniforms.rs`.
const TERRAIN_SHADER_WGSL: &str = r"
struct TerrainUniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    eye_pos: vec3<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: TerrainUniforms;
@group(0) @binding(1) var height_map: texture_2d<f32>;
@group(0) @binding(2) var height_sampler: sampler;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) height: f32,
};

@vertex
fn vs_main(@location(0) grid_pos: vec2<f32>) -> VertexOutput {
    let height = textureSampleLevel(height_map, height_sampler, grid_pos, 0.0).r;
    let world = uniforms.model * vec4<f32>(grid_pos, height * 0.4, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.projection * uniforms.view * world;
    out.uv = grid_pos;
    out.height = height;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let valley = vec3<f32>(0.13, 0.33, 0.17);
    let summit = vec3<f32>(0.85, 0.84, 0.80);
    let color = mix(valley, summit, in.height);
    return vec4<f32>(color, 0.95);
}
";

/// Compute pass: overwrites the whole height texture each frame with a
/// ridged sinusoid field. Dispatched over resolution/32 x resolution/32
/// workgroups; out-of-range invocations on the edge tiles bail out.
const COMPUTE_SHADER_WGSL: &str = r"
@group(0) @binding(0) var height_out: texture_storage_2d<rgba8unorm, write>;

@compute @workgroup_size(32, 32, 1)
fn cs_main(@builtin(global_invocation_id) gid: vec3<u32>) {
    let dims = textureDimensions(height_out);
    if (gid.x >= dims.x || gid.y >= dims.y) {
        return;
    }

    let uv = vec2<f32>(f32(gid.x), f32(gid.y)) / vec2<f32>(f32(dims.x), f32(dims.y));
    let ridge = 0.25 * sin(uv.x * 18.0) * cos(uv.y * 18.0);
    let swell = 0.25 * sin((uv.x + uv.y) * 9.0);
    let height = clamp(0.5 + ridge + swell, 0.0, 1.0);

    textureStore(height_out, vec2<i32>(gid.xy), vec4<f32>(height, 0.0, 0.0, 0.0));
}
";
