//! Fixed tiling contract of the block atlas and the corner UV lookup.
//!
//! The atlas builder packs 16x16 tiles into a 512x512 texture, row by row,
//! starting at the top-left. Every quad emitted by the mesher is four vertices
//! in a fixed winding, so the vertex index modulo 4 tells which tile corner a
//! vertex sits on.

use glam::{UVec2, Vec2};

/// Width and height of the square atlas texture, in texels.
pub const ATLAS_SIZE: u32 = 512;
pub const TILE_WIDTH: u32 = 16;
pub const TILE_HEIGHT: u32 = 16;
/// Tiles per atlas row (and per column).
pub const TILES_PER_ROW: u32 = ATLAS_SIZE / TILE_WIDTH;
/// Number of addressable tiles; larger ids wrap around.
pub const TILE_COUNT: u32 = TILES_PER_ROW * TILES_PER_ROW;

/// Tile-space offsets for corners 0..=3: bottom-left, bottom-right,
/// top-right, top-left.
const CORNER_OFFSETS: [UVec2; 4] = [
    UVec2::new(0, 1),
    UVec2::new(1, 1),
    UVec2::new(1, 0),
    UVec2::new(0, 0),
];

/// Returns the texel position of the top-left corner of `tile_id`.
pub fn tile_origin(tile_id: u32) -> UVec2 {
    let tile = tile_id % TILE_COUNT;
    let col = tile % TILES_PER_ROW;
    let row = tile / TILES_PER_ROW;
    UVec2::new(col * TILE_WIDTH, row * TILE_HEIGHT)
}

/// Maps a corner selector and tile id to a normalized atlas coordinate.
///
/// Only `corner % 4` is significant, so the running vertex index of a quad
/// stream can be passed directly.
pub fn atlas_uv(corner: u32, tile_id: u32) -> Vec2 {
    let offset = CORNER_OFFSETS[(corner % 4) as usize];
    let texel = tile_origin(tile_id) + offset * UVec2::new(TILE_WIDTH, TILE_HEIGHT);
    texel.as_vec2() / ATLAS_SIZE as f32
}

/// Normalized rectangle covered by one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl TileRect {
    pub fn of(tile_id: u32) -> Self {
        let min = tile_origin(tile_id).as_vec2() / ATLAS_SIZE as f32;
        let size = Vec2::new(TILE_WIDTH as f32, TILE_HEIGHT as f32) / ATLAS_SIZE as f32;
        Self {
            min,
            max: min + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains(&self, uv: Vec2) -> bool {
        uv.cmpge(self.min).all() && uv.cmple(self.max).all()
    }
}
