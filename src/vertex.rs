use bytemuck::{Pod, Zeroable};
use glam::{IVec3, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::atlas::atlas_uv;
use crate::globals::Globals;

/// Terrain vertex as written by the mesher.
///
/// Vertices arrive in quads of four; the vertex index inside the buffer picks
/// the tile corner, so it is not stored here.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub tile_id: u32,
    pub normal: [i32; 3],
}

impl TerrainVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Uint32, 2 => Sint32x3];

    pub fn new(position: Vec3, tile_id: u32, normal: IVec3) -> Self {
        Self {
            position: position.to_array(),
            tile_id,
            normal: normal.to_array(),
        }
    }

    /// Vertex buffer layout matching the shader's `@location`s.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Output of the vertex stage and, after interpolation, input of the
/// fragment stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformedVertex {
    pub clip_position: Vec4,
    pub uv: Vec2,
    pub normal: IVec3,
    pub local_position: Vec3,
}

/// Projects one vertex and resolves its atlas coordinate.
///
/// `index` is the vertex's position in the quad stream; only `index % 4`
/// matters.
pub fn transform_vertex(index: u32, vertex: &TerrainVertex, globals: &Globals) -> TransformedVertex {
    let local_position = Vec3::from_array(vertex.position);
    TransformedVertex {
        clip_position: globals.projection * globals.view * local_position.extend(1.0),
        uv: atlas_uv(index, vertex.tile_id),
        normal: IVec3::from_array(vertex.normal),
        local_position,
    }
}
