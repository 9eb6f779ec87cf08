use crate::render::depth::DepthState;
use crate::render::shader::{FRAGMENT_ENTRY_POINT, VERTEX_ENTRY_POINT};
use crate::render::vertex::Vertex;

pub struct RenderPipeline {
    pub gpu_pipeline: wgpu::RenderPipeline,
}

impl RenderPipeline {
    pub fn from_config(
        config: RenderPipelineConfiguration,
        name: String,
        device: &wgpu::Device,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        vertex_shader_module: &wgpu::ShaderModule,
        fragment_shader_module: &wgpu::ShaderModule,
    ) -> Self {
        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{name}_RENDER_PIPELINE_LAYOUT")),
                bind_group_layouts,
                push_constant_ranges: &[],
            });

        let gpu_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{name}_RENDER_PIPELINE")),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: vertex_shader_module,
                entry_point: VERTEX_ENTRY_POINT,
                buffers: &[Vertex::buffer_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: fragment_shader_module,
                entry_point: FRAGMENT_ENTRY_POINT,
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.color_format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent::REPLACE,
                        alpha: wgpu::BlendComponent::REPLACE,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: config.to_primitive_state(),
            depth_stencil: Some(config.depth_state.to_depth_stencil_state()),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Self { gpu_pipeline }
    }
}

/// Everything that forces a distinct pipeline object.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RenderPipelineConfiguration {
    pub topology: wgpu::PrimitiveTopology,
    pub strip_index_format: Option<wgpu::IndexFormat>,
    pub has_base_color_texture: bool,
    pub color_format: wgpu::TextureFormat,
    pub depth_state: DepthState,
}

impl RenderPipelineConfiguration {
    pub fn for_submesh(
        topology: wgpu::PrimitiveTopology,
        index_format: wgpu::IndexFormat,
        has_base_color_texture: bool,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            topology,
            strip_index_format: match topology.is_strip() {
                true => Some(index_format),
                false => None,
            },
            has_base_color_texture,
            color_format,
            depth_state: DepthState::default(),
        }
    }

    /// The mesh is not closed, so both faces are rasterized.
    pub fn to_primitive_state(&self) -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology: self.topology,
            strip_index_format: self.strip_index_format,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::gltf::geometry::IndexData;

    #[test]
    fn list_topologies_have_no_strip_index_format() {
        let config = RenderPipelineConfiguration::for_submesh(
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::IndexFormat::Uint32,
            true,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        );

        assert_eq!(config.strip_index_format, None);
        assert_eq!(config.to_primitive_state().cull_mode, None);
    }

    #[test]
    fn strip_topologies_carry_their_index_format() {
        let config = RenderPipelineConfiguration::for_submesh(
            wgpu::PrimitiveTopology::TriangleStrip,
            wgpu::IndexFormat::Uint16,
            false,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        );

        assert_eq!(config.strip_index_format, Some(wgpu::IndexFormat::Uint16));
        assert_eq!(
            config.to_primitive_state().strip_index_format,
            Some(wgpu::IndexFormat::Uint16)
        );
    }

    #[test]
    fn generated_strip_indices_never_hit_the_restart_value() {
        let indices = IndexData::sequential(u16::MAX as usize + 1);
        let config = RenderPipelineConfiguration::for_submesh(
            wgpu::PrimitiveTopology::TriangleStrip,
            indices.format(),
            false,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        );

        assert_eq!(config.strip_index_format, Some(wgpu::IndexFormat::Uint32));
        assert_eq!(indices.max(), Some(u16::MAX as u32));
    }

    #[test]
    fn submeshes_with_the_same_topology_share_a_configuration() {
        let list = |index_format| {
            RenderPipelineConfiguration::for_submesh(
                wgpu::PrimitiveTopology::TriangleList,
                index_format,
                true,
                wgpu::TextureFormat::Rgba8UnormSrgb,
            )
        };

        assert_eq!(
            list(wgpu::IndexFormat::Uint16),
            list(wgpu::IndexFormat::Uint32)
        );
        assert_eq!(list(wgpu::IndexFormat::Uint16).depth_state, DepthState::default());
    }
}
