//! GPU-facing contract of the terrain shader: WGSL source, uniform block and
//! binding layout. Creating devices, pipelines and bind groups is left to the
//! host renderer.

mod shader;

pub use shader::SHADER;

pub use crate::globals::GlobalUniform;
pub use crate::vertex::TerrainVertex;

pub const VERTEX_ENTRY_POINT: &str = "vs_main";
pub const FRAGMENT_ENTRY_POINT: &str = "fs_main";

pub const GLOBALS_BINDING: u32 = 0;
pub const ATLAS_TEXTURE_BINDING: u32 = 1;
pub const ATLAS_SAMPLER_BINDING: u32 = 2;

/// Layout entries for the single bind group used by the shader.
pub fn bind_group_layout_entries() -> [wgpu::BindGroupLayoutEntry; 3] {
    [
        wgpu::BindGroupLayoutEntry {
            binding: GLOBALS_BINDING,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(
                    std::mem::size_of::<GlobalUniform>() as u64,
                ),
            },
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: ATLAS_TEXTURE_BINDING,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: ATLAS_SAMPLER_BINDING,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        },
    ]
}

/// Shader module descriptor for the terrain WGSL.
pub fn shader_module_descriptor() -> wgpu::ShaderModuleDescriptor<'static> {
    wgpu::ShaderModuleDescriptor {
        label: Some("terrain-shader"),
        source: wgpu::ShaderSource::Wgsl(SHADER.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_and_validate() -> naga::Module {
        let module = naga::front::wgsl::parse_str(SHADER).expect("terrain WGSL parses");
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator.validate(&module).expect("terrain WGSL validates");
        module
    }

    #[test]
    fn shader_exposes_both_entry_points() {
        let module = parse_and_validate();
        let stages: Vec<_> = module
            .entry_points
            .iter()
            .map(|ep| (ep.name.as_str(), ep.stage))
            .collect();
        assert!(stages.contains(&(VERTEX_ENTRY_POINT, naga::ShaderStage::Vertex)));
        assert!(stages.contains(&(FRAGMENT_ENTRY_POINT, naga::ShaderStage::Fragment)));
    }

    #[test]
    fn shader_globals_match_uniform_size() {
        let module = parse_and_validate();
        let span = module
            .types
            .iter()
            .find_map(|(_, ty)| match (&ty.name, &ty.inner) {
                (Some(name), naga::TypeInner::Struct { span, .. }) if name == "Globals" => {
                    Some(*span)
                }
                _ => None,
            })
            .expect("Globals struct present");
        assert_eq!(span as usize, std::mem::size_of::<GlobalUniform>());
    }

    #[test]
    fn module_descriptor_carries_wgsl() {
        let descriptor = shader_module_descriptor();
        assert_eq!(descriptor.label, Some("terrain-shader"));
        assert!(matches!(
            descriptor.source,
            wgpu::ShaderSource::Wgsl(ref src) if src.contains("fn vs_main")
        ));
    }

    #[test]
    fn bindings_are_fixed_slots() {
        let entries = bind_group_layout_entries();
        let slots: Vec<_> = entries.iter().map(|e| e.binding).collect();
        assert_eq!(slots, vec![0, 1, 2]);
        assert!(matches!(
            entries[0].ty,
            wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                min_binding_size: Some(size),
                ..
            } if size.get() == 144
        ));
        assert!(matches!(entries[2].ty, wgpu::BindingType::Sampler(_)));
    }
}
