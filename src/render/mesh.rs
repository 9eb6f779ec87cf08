use crate::render::buffer::{IndexBuffer, VertexBuffer};
use crate::render::pipeline::RenderPipeline;

/// One vertex buffer shared by all of its submeshes.
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: VertexBuffer,
    pub submeshes: Vec<Submesh>,
}

pub struct Submesh {
    pub index_buffer: IndexBuffer,
    pub base_vertex: i32,
    pub render_pipeline: std::rc::Rc<RenderPipeline>,
}

impl Submesh {
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.set_index_buffer(self.index_buffer.gpu_buffer.slice(..), self.index_buffer.type_);
        render_pass.draw_indexed(0..self.index_buffer.count, self.base_vertex, 0..1);
    }
}
