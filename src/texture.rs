use glam::{Vec2, Vec4};
use thiserror::Error;

use crate::atlas::{tile_origin, ATLAS_SIZE, TILE_COUNT, TILE_HEIGHT, TILE_WIDTH};

/// Texture lookup used by the fragment stage.
///
/// The filtering and wrap policy belong to the implementor.
pub trait TextureSampler {
    fn sample(&self, uv: Vec2) -> Vec4;
}

impl<F> TextureSampler for F
where
    F: Fn(Vec2) -> Vec4,
{
    fn sample(&self, uv: Vec2) -> Vec4 {
        self(uv)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("atlas data is {actual} bytes, expected {expected} (512x512 RGBA8)")]
    SizeMismatch { expected: usize, actual: usize },
}

/// CPU copy of the block atlas, sampled with nearest filtering and
/// clamp-to-edge addressing.
#[derive(Debug, Clone)]
pub struct AtlasTexture {
    texels: Vec<[u8; 4]>,
}

impl AtlasTexture {
    const TEXELS: usize = (ATLAS_SIZE * ATLAS_SIZE) as usize;

    /// Wraps tightly packed, row-major RGBA8 data.
    pub fn from_rgba8(data: &[u8]) -> Result<Self, TextureError> {
        let expected = Self::TEXELS * 4;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let texels = data
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect();
        Ok(Self { texels })
    }

    /// Fills every tile with a single color chosen by `color_of(tile_id)`.
    pub fn from_tile_colors(mut color_of: impl FnMut(u32) -> [u8; 4]) -> Self {
        let mut texels = vec![[0; 4]; Self::TEXELS];
        for tile in 0..TILE_COUNT {
            let color = color_of(tile);
            let origin = tile_origin(tile);
            for y in origin.y..origin.y + TILE_HEIGHT {
                let row = (y * ATLAS_SIZE) as usize;
                let start = row + origin.x as usize;
                texels[start..start + TILE_WIDTH as usize].fill(color);
            }
        }
        Self { texels }
    }

    pub fn solid(color: [u8; 4]) -> Self {
        Self {
            texels: vec![color; Self::TEXELS],
        }
    }

    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(ATLAS_SIZE - 1);
        let y = y.min(ATLAS_SIZE - 1);
        self.texels[(y * ATLAS_SIZE + x) as usize]
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }
}

impl TextureSampler for AtlasTexture {
    fn sample(&self, uv: Vec2) -> Vec4 {
        // NaN saturates to 0 through the float-to-int cast.
        let texel = (uv * ATLAS_SIZE as f32).floor();
        let x = texel.x.clamp(0.0, (ATLAS_SIZE - 1) as f32) as u32;
        let y = texel.y.clamp(0.0, (ATLAS_SIZE - 1) as f32) as u32;
        let [r, g, b, a] = self.texel(x, y);
        Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
    }
}
