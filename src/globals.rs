use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Per-draw uniform state shared read-only by both shading stages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Globals {
    pub view: Mat4,
    pub projection: Mat4,
    pub light_position: Vec3,
    pub lighting_enabled: bool,
}

impl Globals {
    pub fn new(view: Mat4, projection: Mat4, light_position: Vec3, lighting_enabled: bool) -> Self {
        Self {
            view,
            projection,
            light_position,
            lighting_enabled,
        }
    }

    /// Combined `projection * view` transform.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Packs the globals into the layout bound at slot 0.
    pub fn to_uniform(&self) -> GlobalUniform {
        GlobalUniform {
            view: self.view.to_cols_array_2d(),
            projection: self.projection.to_cols_array_2d(),
            light_position: self.light_position.to_array(),
            lighting_enabled: u32::from(self.lighting_enabled),
        }
    }
}

impl Default for Globals {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO, true)
    }
}

impl From<&GlobalUniform> for Globals {
    fn from(uniform: &GlobalUniform) -> Self {
        Self {
            view: Mat4::from_cols_array_2d(&uniform.view),
            projection: Mat4::from_cols_array_2d(&uniform.projection),
            light_position: Vec3::from_array(uniform.light_position),
            lighting_enabled: uniform.lighting_enabled != 0,
        }
    }
}

/// Byte layout of the uniform block.
///
/// The flag occupies the padding slot after the `vec3<f32>` light position,
/// which keeps the block at 144 bytes under WGSL uniform alignment.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GlobalUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub light_position: [f32; 3],
    pub lighting_enabled: u32,
}
