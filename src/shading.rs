//! Fragment stage: atlas color modulated by a point light.
//!
//! The interpolated normal is used as-is. Terrain normals are integer axis
//! vectors, so faces get unit normals, but nothing here renormalizes them.

use glam::{Vec3, Vec4};

use crate::globals::Globals;
use crate::texture::TextureSampler;
use crate::vertex::TransformedVertex;

/// Constant light added regardless of surface orientation.
pub const AMBIENT_STRENGTH: f32 = 0.36;

/// Clamped Lambert term for a point light at `light_position`.
pub fn diffuse_intensity(normal: Vec3, local_position: Vec3, light_position: Vec3) -> f32 {
    let light_dir = (light_position - local_position).normalize();
    normal.dot(light_dir).max(0.0)
}

/// Computes the final color of one fragment.
///
/// With lighting disabled the sampled color is returned untouched. Alpha is
/// never affected by lighting.
pub fn shade_fragment<S>(fragment: &TransformedVertex, sampler: &S, globals: &Globals) -> Vec4
where
    S: TextureSampler + ?Sized,
{
    let base = sampler.sample(fragment.uv);
    if !globals.lighting_enabled {
        return base;
    }

    let ambient = AMBIENT_STRENGTH * Vec3::ONE;
    let diffuse = diffuse_intensity(
        fragment.normal.as_vec3(),
        fragment.local_position,
        globals.light_position,
    ) * Vec3::ONE;
    let rgb = (diffuse + ambient) * base.truncate();
    rgb.extend(base.w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec3, Vec2};

    const BASE: Vec4 = Vec4::new(0.8, 0.5, 0.25, 0.6);

    fn constant(_uv: Vec2) -> Vec4 {
        BASE
    }

    fn fragment(normal: IVec3, local_position: Vec3) -> TransformedVertex {
        TransformedVertex {
            clip_position: Vec4::ZERO,
            uv: Vec2::new(0.5, 0.5),
            normal,
            local_position,
        }
    }

    fn lit(light_position: Vec3) -> Globals {
        Globals {
            light_position,
            lighting_enabled: true,
            ..Globals::default()
        }
    }

    #[test]
    fn disabled_lighting_passes_sample_through() {
        let mut globals = lit(Vec3::new(0.0, 10.0, 0.0));
        globals.lighting_enabled = false;
        for normal in [IVec3::Y, IVec3::NEG_Y, IVec3::new(4, -7, 2), IVec3::ZERO] {
            let color = shade_fragment(&fragment(normal, Vec3::new(3.0, 1.0, -2.0)), &constant, &globals);
            assert_eq!(color, BASE);
        }
    }

    #[test]
    fn light_straight_above_gives_full_diffuse() {
        let color = shade_fragment(
            &fragment(IVec3::Y, Vec3::ZERO),
            &constant,
            &lit(Vec3::new(0.0, 10.0, 0.0)),
        );
        let expected = (1.0 + AMBIENT_STRENGTH) * BASE.truncate();
        assert!((color.truncate() - expected).abs().max_element() < 1e-6);
        assert_eq!(color.w, BASE.w);
    }

    #[test]
    fn back_facing_surface_gets_only_ambient() {
        let color = shade_fragment(
            &fragment(IVec3::NEG_Y, Vec3::ZERO),
            &constant,
            &lit(Vec3::new(0.0, 10.0, 0.0)),
        );
        assert_eq!(color.truncate(), AMBIENT_STRENGTH * BASE.truncate());
        assert_eq!(color.w, BASE.w);
    }

    #[test]
    fn diffuse_never_goes_negative() {
        let light = Vec3::new(2.0, -5.0, 1.0);
        for normal in [Vec3::Y, Vec3::new(0.0, 3.0, 0.0), Vec3::new(-1.0, 2.0, 0.0)] {
            assert_eq!(diffuse_intensity(normal, Vec3::ZERO, light), 0.0);
        }
    }

    #[test]
    fn light_direction_depends_on_fragment_position() {
        let light = Vec3::new(0.0, 1.0, 0.0);
        let below = diffuse_intensity(Vec3::Y, Vec3::ZERO, light);
        let beside = diffuse_intensity(Vec3::Y, Vec3::new(1.0, 0.0, 0.0), light);
        assert_eq!(below, 1.0);
        assert!((beside - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn unnormalized_normal_scales_diffuse() {
        let light = Vec3::new(0.0, 10.0, 0.0);
        let unit = diffuse_intensity(Vec3::Y, Vec3::ZERO, light);
        let long = diffuse_intensity(Vec3::new(0.0, 2.0, 0.0), Vec3::ZERO, light);
        assert_eq!(long, 2.0 * unit);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let frag = fragment(IVec3::new(1, 1, 0), Vec3::new(0.3, 0.7, -1.1));
        let globals = lit(Vec3::new(5.0, 9.0, -2.0));
        let first = shade_fragment(&frag, &constant, &globals);
        for _ in 0..8 {
            let again = shade_fragment(&frag, &constant, &globals);
            assert_eq!(first.to_array().map(f32::to_bits), again.to_array().map(f32::to_bits));
        }
    }
}
