use wgpu::util::DeviceExt;

use crate::render::vertex::Vertex;
use crate::resource::gltf::geometry::IndexData;

pub struct VertexBuffer {
    pub gpu_buffer: wgpu::Buffer,
    pub count: usize,
}

impl VertexBuffer {
    pub fn from_vertices(device: &wgpu::Device, label: &str, vertices: &[Vertex]) -> Self {
        Self {
            gpu_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            count: vertices.len(),
        }
    }
}

pub struct IndexBuffer {
    pub gpu_buffer: wgpu::Buffer,
    pub type_: wgpu::IndexFormat,
    pub count: u32,
}

impl IndexBuffer {
    pub fn from_index_data(device: &wgpu::Device, label: &str, indices: &IndexData) -> Self {
        Self {
            gpu_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: indices.as_bytes(),
                usage: wgpu::BufferUsages::INDEX,
            }),
            type_: indices.format(),
            count: indices.len() as u32,
        }
    }
}
