use anyhow::Result;

use crate::render::pipeline::RenderPipelineConfiguration;
use crate::render::vertex::{Vertex, VertexSemantic};

pub const VERTEX_TEMPLATE_NAME: &str = "teapot/teapot.vert";
pub const FRAGMENT_TEMPLATE_NAME: &str = "teapot/teapot.frag";

pub const VERTEX_ENTRY_POINT: &str = "vertex_main";
pub const FRAGMENT_ENTRY_POINT: &str = "fragment_main";

pub struct ShaderModulePackage {
    pub vertex_shader_module: wgpu::ShaderModule,
    pub fragment_shader_module: wgpu::ShaderModule,
}

impl ShaderModulePackage {
    pub fn from_templates(
        vertex_template_name: &str,
        fragment_template_name: &str,
        name: &str,
        device: &wgpu::Device,
        tera: &tera::Tera,
        shader_template_config: &ShaderTemplateConfiguration,
    ) -> Result<Self> {
        let (vertex_shader_source, fragment_shader_source) = ShaderModulePackage::render_sources(
            vertex_template_name,
            fragment_template_name,
            tera,
            shader_template_config,
        )?;

        log::debug!(
            "Creating shader module package {name} from config: {:?}",
            shader_template_config
        );

        Ok(ShaderModulePackage {
            vertex_shader_module: device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{}_VERTEX_SHADER_MODULE", name)),
                source: wgpu::ShaderSource::Wgsl(vertex_shader_source.into()),
            }),
            fragment_shader_module: device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{}_FRAGMENT_SHADER_MODULE", name)),
                source: wgpu::ShaderSource::Wgsl(fragment_shader_source.into()),
            }),
        })
    }

    pub fn render_sources(
        vertex_template_name: &str,
        fragment_template_name: &str,
        tera: &tera::Tera,
        shader_template_config: &ShaderTemplateConfiguration,
    ) -> Result<(String, String)> {
        let shader_template_context = tera::Context::from_serialize(shader_template_config)?;

        Ok((
            ShaderModulePackage::render_shader(vertex_template_name, tera, &shader_template_context)?,
            ShaderModulePackage::render_shader(
                fragment_template_name,
                tera,
                &shader_template_context,
            )?,
        ))
    }

    fn render_shader(
        template_name: &str,
        tera: &tera::Tera,
        template_context: &tera::Context,
    ) -> Result<String> {
        match tera.render(template_name, template_context) {
            Ok(shader_source) => Ok(shader_source),
            Err(error) => Err(error.into()),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub struct ShaderTemplateConfiguration {
    pub has_base_color_texture: bool,
    pub position_location: u32,
    pub normal_location: u32,
    pub tex_coord_location: u32,
}

impl ShaderTemplateConfiguration {
    pub fn from_render_pipeline_config(config: &RenderPipelineConfiguration) -> Self {
        Self {
            has_base_color_texture: config.has_base_color_texture,
            position_location: Vertex::shader_location(VertexSemantic::Position),
            normal_location: Vertex::shader_location(VertexSemantic::Normal),
            tex_coord_location: Vertex::shader_location(VertexSemantic::TexCoord),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shader_tera() -> tera::Tera {
        tera::Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/**/*")).unwrap()
    }

    fn template_config(has_base_color_texture: bool) -> ShaderTemplateConfiguration {
        ShaderTemplateConfiguration::from_render_pipeline_config(
            &RenderPipelineConfiguration::for_submesh(
                wgpu::PrimitiveTopology::TriangleList,
                wgpu::IndexFormat::Uint16,
                has_base_color_texture,
                wgpu::TextureFormat::Bgra8UnormSrgb,
            ),
        )
    }

    #[test]
    fn templates_expose_the_stage_entry_points() {
        let (vertex_source, fragment_source) = ShaderModulePackage::render_sources(
            VERTEX_TEMPLATE_NAME,
            FRAGMENT_TEMPLATE_NAME,
            &shader_tera(),
            &template_config(true),
        )
        .unwrap();

        assert!(vertex_source.contains(&format!("fn {VERTEX_ENTRY_POINT}(")));
        assert!(fragment_source.contains(&format!("fn {FRAGMENT_ENTRY_POINT}(")));
    }

    #[test]
    fn vertex_inputs_follow_the_vertex_layout() {
        let (vertex_source, _) = ShaderModulePackage::render_sources(
            VERTEX_TEMPLATE_NAME,
            FRAGMENT_TEMPLATE_NAME,
            &shader_tera(),
            &template_config(true),
        )
        .unwrap();

        assert!(vertex_source.contains("@location(0) position: vec3<f32>"));
        assert!(vertex_source.contains("@location(1) normal: vec3<f32>"));
        assert!(vertex_source.contains("@location(2) tex_coord: vec2<f32>"));
        assert!(vertex_source.contains("normal_matrix: mat3x3<f32>"));
    }

    #[test]
    fn untextured_variant_declares_no_texture_bindings() {
        let (_, textured) = ShaderModulePackage::render_sources(
            VERTEX_TEMPLATE_NAME,
            FRAGMENT_TEMPLATE_NAME,
            &shader_tera(),
            &template_config(true),
        )
        .unwrap();
        let (_, untextured) = ShaderModulePackage::render_sources(
            VERTEX_TEMPLATE_NAME,
            FRAGMENT_TEMPLATE_NAME,
            &shader_tera(),
            &template_config(false),
        )
        .unwrap();

        assert!(textured.contains("@group(1) @binding(0)"));
        assert!(textured.contains("textureSample("));
        assert!(!untextured.contains("@group(1)"));
        assert!(!untextured.contains("textureSample("));
    }
}
