//! GPU orchestration for the terrain preview.
//!
//! The module split mirrors the bootstrap dependency chain:
//! - `limits` negotiates the minimal device limits for this workload.
//! - `context` owns wgpu instance/adapter/device/surface wiring.
//! - `pipeline` builds the immutable render and compute pipeline bundles.
//! - `geometry` generates the tessellated grid and uploads its buffers.
//! - `texture` owns the seeded height texture, its sampler, and the depth
//!   target.
//! - `uniforms` holds the per-frame transform record and the fixed camera.
//! - `bindings` wires concrete resources into the two bind groups.
//! - `plan` spells out the bootstrap ordering as checkable data.
//! - `state` glues everything together and drives one frame per call.

mod bindings;
mod context;
mod geometry;
mod limits;
mod pipeline;
mod plan;
mod state;
mod texture;
mod uniforms;

pub(crate) use state::GpuState;
