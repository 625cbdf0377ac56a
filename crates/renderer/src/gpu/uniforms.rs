//! Per-frame transform uniforms and the fixed demo camera.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use winit::dpi::PhysicalSize;

const EYE: Vec3 = Vec3::new(2.0, 2.0, 2.0);
const FOV_Y_DEGREES: f32 = 45.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

/// Transform record uploaded to the uniform buffer every frame.
///
/// The field order and 16-byte alignment must match the `TerrainUniforms`
/// block declared in the WGSL terrain shader.
#[repr(C, align(16))]
#[derive(Clone, Copy, PartialEq)]
pub(crate) struct TerrainUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub eye_pos: [f32; 3],
    _padding: f32,
}

unsafe impl Zeroable for TerrainUniforms {}
unsafe impl Pod for TerrainUniforms {}

impl TerrainUniforms {
    /// Recomputes the transform record for the given surface size.
    ///
    /// The camera is fixed; only the projection depends on the surface
    /// aspect ratio, so identical sizes yield bit-identical records. The
    /// model transform maps the unit grid onto `[-1, 1]^2` in the ground
    /// plane with +Z up.
    pub(crate) fn for_surface(size: PhysicalSize<u32>) -> Self {
        let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;
        let projection =
            Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, NEAR_PLANE, FAR_PLANE);
        let view = Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Z);
        let model = Mat4::from_translation(Vec3::new(-1.0, -1.0, 0.0))
            * Mat4::from_scale(Vec3::new(2.0, 2.0, 1.0));

        Self {
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            eye_pos: EYE.to_array(),
            _padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, size_of};

    #[test]
    fn uniforms_follow_shader_block_layout() {
        let uniforms = TerrainUniforms::for_surface(PhysicalSize::new(1024, 768));
        let base = &uniforms as *const _ as usize;

        assert_eq!(align_of::<TerrainUniforms>(), 16);
        assert_eq!(size_of::<TerrainUniforms>(), 208);
        assert_eq!((&uniforms.model as *const _ as usize) - base, 0);
        assert_eq!((&uniforms.view as *const _ as usize) - base, 64);
        assert_eq!((&uniforms.projection as *const _ as usize) - base, 128);
        assert_eq!((&uniforms.eye_pos as *const _ as usize) - base, 192);
    }

    #[test]
    fn update_is_idempotent_for_a_fixed_surface() {
        let size = PhysicalSize::new(1024, 768);
        let first = TerrainUniforms::for_surface(size);
        let second = TerrainUniforms::for_surface(size);
        assert_eq!(bytemuck::bytes_of(&first), bytemuck::bytes_of(&second));
    }

    #[test]
    fn aspect_ratio_only_affects_the_projection() {
        let wide = TerrainUniforms::for_surface(PhysicalSize::new(1920, 1080));
        let tall = TerrainUniforms::for_surface(PhysicalSize::new(1080, 1920));

        assert_eq!(wide.model, tall.model);
        assert_eq!(wide.view, tall.view);
        assert_eq!(wide.eye_pos, tall.eye_pos);
        assert_ne!(wide.projection, tall.projection);
    }

    #[test]
    fn degenerate_surface_does_not_produce_nan() {
        let uniforms = TerrainUniforms::for_surface(PhysicalSize::new(0, 0));
        assert!(uniforms.projection.iter().flatten().all(|v| v.is_finite()));
    }
}
