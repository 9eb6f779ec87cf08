use std::collections::HashMap;

use anyhow::Result;

use crate::render::binding::TextureBinding;
use crate::render::buffer::{IndexBuffer, VertexBuffer};
use crate::render::mesh::{Mesh, Submesh};
use crate::render::pipeline::{RenderPipeline, RenderPipelineConfiguration};
use crate::render::shader::{
    ShaderModulePackage, ShaderTemplateConfiguration, FRAGMENT_TEMPLATE_NAME,
    VERTEX_TEMPLATE_NAME,
};
use crate::render::state::RenderSystemState;
use crate::render::storage::RenderSystemSceneStorage;
use crate::resource::gltf::geometry::{GeometryAsset, MeshGeometry};
use crate::resource::texture::TextureAsset;

pub struct SceneLoader<'a> {
    state: &'a RenderSystemState,
    storage: RenderSystemSceneStorage,
}

impl<'a> SceneLoader<'a> {
    pub fn load(
        state: &'a RenderSystemState,
        geometry: &GeometryAsset,
        base_color_texture: Option<&TextureAsset>,
    ) -> Result<RenderSystemSceneStorage> {
        let base_color_binding = base_color_texture.map(|texture_asset| {
            log::debug!("Loading base color texture");
            TextureBinding::from_asset(texture_asset, &state.device, &state.queue)
        });

        let mut scene_loader = Self {
            state,
            storage: RenderSystemSceneStorage {
                meshes: vec![],
                base_color_binding,
                render_pipeline_registry: HashMap::new(),
                shader_module_package_registry: HashMap::new(),
            },
        };

        for mesh_geometry in geometry.meshes.iter() {
            let mesh = scene_loader.load_mesh(mesh_geometry)?;
            scene_loader.storage.meshes.push(mesh);
        }

        scene_loader.state.queue.submit([]);

        log::info!(
            "Scene ready: {} meshes, {} render pipelines",
            scene_loader.storage.meshes.len(),
            scene_loader.storage.render_pipeline_registry.len()
        );

        Ok(scene_loader.storage)
    }

    fn load_mesh(&mut self, mesh_geometry: &MeshGeometry) -> Result<Mesh> {
        log::debug!("Loading mesh: {}", mesh_geometry.name);

        let label_prefix = mesh_geometry.name.to_uppercase();

        let vertex_buffer = VertexBuffer::from_vertices(
            &self.state.device,
            &format!("{label_prefix}_VERTEX_BUFFER"),
            &mesh_geometry.vertices,
        );

        let mut submeshes = Vec::with_capacity(mesh_geometry.submeshes.len());
        for (submesh_index, submesh_geometry) in mesh_geometry.submeshes.iter().enumerate() {
            let render_pipeline_config = RenderPipelineConfiguration::for_submesh(
                submesh_geometry.topology,
                submesh_geometry.indices.format(),
                self.storage.base_color_binding.is_some(),
                self.state.surface_config.format,
            );

            let index_buffer = IndexBuffer::from_index_data(
                &self.state.device,
                &format!("{label_prefix}_SUBMESH_{submesh_index}_INDEX_BUFFER"),
                &submesh_geometry.indices,
            );

            submeshes.push(Submesh {
                index_buffer,
                base_vertex: submesh_geometry.base_vertex,
                render_pipeline: self.get_render_pipeline(&render_pipeline_config)?,
            });
        }

        let mesh = Mesh {
            name: mesh_geometry.name.clone(),
            vertex_buffer,
            submeshes,
        };

        log::debug!(
            "Uploaded mesh {}: {} vertices, {} submeshes",
            mesh.name,
            mesh.vertex_buffer.count,
            mesh.submeshes.len()
        );

        Ok(mesh)
    }

    fn get_render_pipeline(
        &mut self,
        render_pipeline_config: &RenderPipelineConfiguration,
    ) -> Result<std::rc::Rc<RenderPipeline>> {
        if let Some(render_pipeline) = self
            .storage
            .render_pipeline_registry
            .get(render_pipeline_config)
        {
            return Ok(render_pipeline.clone());
        }

        let shader_template_config =
            ShaderTemplateConfiguration::from_render_pipeline_config(render_pipeline_config);

        let shader_module_package = self.get_shader_module_package(&shader_template_config)?;

        log::debug!(
            "Creating render pipeline for config: {:?}",
            render_pipeline_config
        );

        let bind_group_layouts = match &self.storage.base_color_binding {
            Some(base_color_binding) => vec![
                &self.state.frame_uniform_binding.bind_group_layout,
                &base_color_binding.bind_group_layout,
            ],
            None => vec![&self.state.frame_uniform_binding.bind_group_layout],
        };

        let render_pipeline = std::rc::Rc::new(RenderPipeline::from_config(
            *render_pipeline_config,
            format!(
                "RENDER_PIPELINE_{}",
                self.storage.render_pipeline_registry.len()
            ),
            &self.state.device,
            &bind_group_layouts,
            &shader_module_package.vertex_shader_module,
            &shader_module_package.fragment_shader_module,
        ));
        self.storage
            .render_pipeline_registry
            .insert(*render_pipeline_config, render_pipeline.clone());

        Ok(render_pipeline)
    }

    fn get_shader_module_package(
        &mut self,
        shader_template_config: &ShaderTemplateConfiguration,
    ) -> Result<std::rc::Rc<ShaderModulePackage>> {
        if let Some(shader_module_package) = self
            .storage
            .shader_module_package_registry
            .get(shader_template_config)
        {
            return Ok(shader_module_package.clone());
        }

        let module_name_prefix = format!(
            "SHADER_MODULE_PACKAGE_{}",
            self.storage.shader_module_package_registry.len()
        );

        let shader_module_package = std::rc::Rc::new(ShaderModulePackage::from_templates(
            VERTEX_TEMPLATE_NAME,
            FRAGMENT_TEMPLATE_NAME,
            &module_name_prefix,
            &self.state.device,
            &self.state.tera,
            shader_template_config,
        )?);

        self.storage
            .shader_module_package_registry
            .insert(*shader_template_config, shader_module_package.clone());

        Ok(shader_module_package)
    }
}
