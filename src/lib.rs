//! Shading core of the Explora terrain renderer.
//!
//! Two pure stages turn mesher output into pixels: the vertex stage projects
//! terrain vertices and resolves their atlas coordinates, the fragment stage
//! modulates the sampled atlas color with an ambient + diffuse point light.
//! Both are mirrored by the WGSL in [`render::SHADER`] and can also run on the
//! host through the parallel batches in [`pipeline`].

pub mod atlas;
pub mod config;
pub mod globals;
pub mod pipeline;
pub mod render;
pub mod shading;
pub mod texture;
pub mod vertex;

pub use atlas::{atlas_uv, TileRect, ATLAS_SIZE, TILES_PER_ROW, TILE_COUNT, TILE_HEIGHT, TILE_WIDTH};
pub use config::{CameraConfig, ConfigError, ShadeConfig};
pub use globals::{GlobalUniform, Globals};
pub use pipeline::{interpolate, quad_indices, shade_fragments, transform_vertices, triangles};
pub use shading::{shade_fragment, AMBIENT_STRENGTH};
pub use texture::{AtlasTexture, TextureError, TextureSampler};
pub use vertex::{transform_vertex, TerrainVertex, TransformedVertex};
