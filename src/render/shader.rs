/// WGSL for the terrain pipeline. Mirrors `atlas`, `vertex` and `shading`.
pub const SHADER: &str = r#"
const ATLAS_SIZE: f32 = 512.0;
const TILE_SIZE: u32 = 16u;
const TILES_PER_ROW: u32 = 32u;
const TILE_COUNT: u32 = 1024u;
const AMBIENT_STRENGTH: f32 = 0.36;

struct Globals {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    light_position: vec3<f32>,
    lighting_enabled: u32,
}

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(0) @binding(1)
var atlas_texture: texture_2d<f32>;

@group(0) @binding(2)
var atlas_sampler: sampler;

struct VertexInput {
    @builtin(vertex_index) index: u32,
    @location(0) position: vec3<f32>,
    @location(1) tile_id: u32,
    @location(2) normal: vec3<i32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) @interpolate(flat) normal: vec3<i32>,
    @location(2) local_position: vec3<f32>,
}

fn atlas_uv(corner: u32, tile_id: u32) -> vec2<f32> {
    // bottom-left, bottom-right, top-right, top-left
    var corners = array<vec2<u32>, 4>(
        vec2<u32>(0u, 1u),
        vec2<u32>(1u, 1u),
        vec2<u32>(1u, 0u),
        vec2<u32>(0u, 0u),
    );
    let tile = tile_id % TILE_COUNT;
    let origin = vec2<u32>(tile % TILES_PER_ROW, tile / TILES_PER_ROW) * TILE_SIZE;
    let texel = origin + corners[corner % 4u] * TILE_SIZE;
    return vec2<f32>(texel) / ATLAS_SIZE;
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = globals.proj * globals.view * vec4<f32>(input.position, 1.0);
    out.uv = atlas_uv(input.index, input.tile_id);
    out.normal = input.normal;
    out.local_position = input.position;
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let base = textureSample(atlas_texture, atlas_sampler, input.uv);
    if globals.lighting_enabled == 0u {
        return base;
    }
    let ambient = AMBIENT_STRENGTH * vec3<f32>(1.0);
    let light_dir = normalize(globals.light_position - input.local_position);
    let diffuse = max(dot(vec3<f32>(input.normal), light_dir), 0.0) * vec3<f32>(1.0);
    return vec4<f32>((diffuse + ambient) * base.rgb, base.a);
}
"#;
