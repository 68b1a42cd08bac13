//! Host-side batch execution of the shading stages.
//!
//! Each element is independent, so the batches are plain parallel maps. The
//! slice position of a vertex doubles as its vertex index, matching what the
//! GPU reports through `@builtin(vertex_index)` for an indexed quad stream.

use glam::{Vec3, Vec4};
use log::debug;
use rayon::prelude::*;

use crate::globals::Globals;
use crate::shading::shade_fragment;
use crate::texture::TextureSampler;
use crate::vertex::{transform_vertex, TerrainVertex, TransformedVertex};

/// Index pattern for one quad: two triangles sharing the 0-2 diagonal.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Runs the vertex stage over a quad stream.
pub fn transform_vertices(vertices: &[TerrainVertex], globals: &Globals) -> Vec<TransformedVertex> {
    debug!("transforming {} vertices", vertices.len());
    vertices
        .par_iter()
        .enumerate()
        .map(|(index, vertex)| transform_vertex(index as u32, vertex, globals))
        .collect()
}

/// Runs the fragment stage over already interpolated fragments.
pub fn shade_fragments<S>(
    fragments: &[TransformedVertex],
    sampler: &S,
    globals: &Globals,
) -> Vec<Vec4>
where
    S: TextureSampler + Sync + ?Sized,
{
    debug!("shading {} fragments", fragments.len());
    fragments
        .par_iter()
        .map(|fragment| shade_fragment(fragment, sampler, globals))
        .collect()
}

/// Interpolates a triangle's vertex outputs at barycentric `weights`.
///
/// Float attributes are blended linearly. The integer normal cannot be
/// blended and is taken from the first (provoking) vertex, the same way a
/// flat-interpolated varying behaves on the GPU.
pub fn interpolate(triangle: &[TransformedVertex; 3], weights: Vec3) -> TransformedVertex {
    let [a, b, c] = triangle;
    TransformedVertex {
        clip_position: a.clip_position * weights.x
            + b.clip_position * weights.y
            + c.clip_position * weights.z,
        uv: a.uv * weights.x + b.uv * weights.y + c.uv * weights.z,
        normal: a.normal,
        local_position: a.local_position * weights.x
            + b.local_position * weights.y
            + c.local_position * weights.z,
    }
}

/// Builds the index buffer for `vertex_count` quad vertices.
///
/// Trailing vertices that do not form a full quad are ignored.
pub fn quad_indices(vertex_count: usize) -> Vec<u32> {
    (0..vertex_count / 4)
        .flat_map(|quad| {
            let base = (quad * 4) as u32;
            QUAD_INDICES.map(|offset| base + offset)
        })
        .collect()
}

/// Splits an indexed quad stream into triangles of transformed vertices.
pub fn triangles(transformed: &[TransformedVertex]) -> Vec<[TransformedVertex; 3]> {
    quad_indices(transformed.len())
        .chunks_exact(3)
        .map(|tri| [tri[0], tri[1], tri[2]].map(|index| transformed[index as usize]))
        .collect()
}
