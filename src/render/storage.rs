use std::collections::HashMap;

use crate::render::binding::TextureBinding;
use crate::render::mesh::Mesh;
use crate::render::pipeline::{RenderPipeline, RenderPipelineConfiguration};
use crate::render::shader::{ShaderModulePackage, ShaderTemplateConfiguration};

/// GPU resources built once at startup and only read while drawing.
pub struct RenderSystemSceneStorage {
    pub meshes: Vec<Mesh>,
    pub base_color_binding: Option<TextureBinding>,
    pub render_pipeline_registry: HashMap<RenderPipelineConfiguration, std::rc::Rc<RenderPipeline>>,
    pub shader_module_package_registry:
        HashMap<ShaderTemplateConfiguration, std::rc::Rc<ShaderModulePackage>>,
}
