use std::env;
use std::fs;

use anyhow::{anyhow, Context, Result};
use glam::{IVec3, Vec3};
use log::info;

use explora_shading::{
    atlas_uv, interpolate, shade_fragments, transform_vertices, triangles, AtlasTexture,
    ShadeConfig, TerrainVertex,
};

const USAGE: &str =
    "Usage: explora-shade uv <tile_id> | explora-shade shade <tile_id> [--config <file.xml>] [--no-lighting]";

const CORNER_NAMES: [&str; 4] = ["bottom-left", "bottom-right", "top-right", "top-left"];

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    match CliOptions::parse()? {
        CliOptions::Uv { tile_id } => {
            print_uvs(tile_id);
            Ok(())
        }
        CliOptions::Shade {
            tile_id,
            config,
            no_lighting,
        } => {
            let mut config = match config {
                Some(path) => {
                    let xml = fs::read_to_string(&path)
                        .with_context(|| format!("unable to read {path}"))?;
                    ShadeConfig::from_xml(&xml)
                        .with_context(|| format!("failed to parse shading config {path}"))?
                }
                None => ShadeConfig::default(),
            };
            if no_lighting {
                config.lighting_enabled = false;
            }
            shade_quad(tile_id, &config);
            Ok(())
        }
    }
}

fn print_uvs(tile_id: u32) {
    println!("tile {tile_id}");
    for (corner, name) in CORNER_NAMES.iter().enumerate() {
        let uv = atlas_uv(corner as u32, tile_id);
        println!(" corner {corner} ({name}): ({:.5}, {:.5})", uv.x, uv.y);
    }
}

/// Shades an upward facing unit quad at the origin textured with `tile_id`.
fn shade_quad(tile_id: u32, config: &ShadeConfig) {
    info!(
        "shading tile {tile_id} with lighting {}",
        if config.lighting_enabled { "on" } else { "off" }
    );
    let globals = config.globals();
    let atlas = AtlasTexture::from_tile_colors(demo_tile_color);
    let quad = [
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 0.0),
    ]
    .map(|position| TerrainVertex::new(position, tile_id, IVec3::Y));

    let transformed = transform_vertices(&quad, &globals);
    for (index, vertex) in transformed.iter().enumerate() {
        let clip = vertex.clip_position;
        println!(
            "vertex {index} uv=({:.5}, {:.5}) clip=({:.3}, {:.3}, {:.3}, {:.3})",
            vertex.uv.x, vertex.uv.y, clip.x, clip.y, clip.z, clip.w
        );
    }

    // Corner UVs sit on tile edges, so sample at triangle centroids instead.
    let fragments: Vec<_> = triangles(&transformed)
        .iter()
        .map(|tri| interpolate(tri, Vec3::splat(1.0 / 3.0)))
        .collect();
    for (index, color) in shade_fragments(&fragments, &atlas, &globals)
        .iter()
        .enumerate()
    {
        println!(
            "fragment {index} rgba=({:.3}, {:.3}, {:.3}, {:.3})",
            color.x, color.y, color.z, color.w
        );
    }
}

fn demo_tile_color(tile_id: u32) -> [u8; 4] {
    [
        (tile_id * 37 % 256) as u8,
        (tile_id * 91 % 256) as u8,
        (tile_id * 53 % 256) as u8,
        255,
    ]
}

enum CliOptions {
    Uv {
        tile_id: u32,
    },
    Shade {
        tile_id: u32,
        config: Option<String>,
        no_lighting: bool,
    },
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let command = args.next().ok_or_else(|| anyhow!(USAGE))?;
        let tile = args.next().ok_or_else(|| anyhow!(USAGE))?;
        let tile_id = tile
            .parse::<u32>()
            .map_err(|err| anyhow!("invalid tile id {tile:?}: {err}"))?;

        match command.as_str() {
            "uv" => {
                if let Some(extra) = args.next() {
                    return Err(anyhow!("Unexpected argument: {extra}. {USAGE}"));
                }
                Ok(Self::Uv { tile_id })
            }
            "shade" => {
                let mut config = None;
                let mut no_lighting = false;
                while let Some(arg) = args.next() {
                    match arg.as_str() {
                        "--no-lighting" => no_lighting = true,
                        "--config" => {
                            let path = args
                                .next()
                                .ok_or_else(|| anyhow!("--config expects a file path"))?;
                            config = Some(path);
                        }
                        other => {
                            return Err(anyhow!(
                                "Unknown argument: {other}. Expected --config or --no-lighting"
                            ));
                        }
                    }
                }
                Ok(Self::Shade {
                    tile_id,
                    config,
                    no_lighting,
                })
            }
            other => Err(anyhow!("Unknown command: {other}. {USAGE}")),
        }
    }
}
