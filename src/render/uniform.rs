use crate::data::transform::FrameTransforms;

/// Per-frame bundle read by the vertex stage.
///
/// Matches `FrameUniforms` in the shader templates: two `mat4x4<f32>` and a
/// `mat3x3<f32>`, whose columns are padded to 16 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub model_matrix: [[f32; 4]; 4],
    pub view_projection_matrix: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 3],
}

impl From<&FrameTransforms> for FrameUniforms {
    fn from(value: &FrameTransforms) -> Self {
        let normal_matrix: [[f32; 3]; 3] = value.normal_matrix.into();

        Self {
            model_matrix: value.model_matrix.into(),
            view_projection_matrix: value.view_projection_matrix.into(),
            normal_matrix: normal_matrix.map(|[x, y, z]| [x, y, z, 0.0]),
        }
    }
}

pub struct FrameUniformBinding {
    gpu_uniform_buffer: wgpu::Buffer,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub gpu_bind_group: wgpu::BindGroup,
}

impl FrameUniformBinding {
    pub fn from_device(device: &wgpu::Device) -> Self {
        let gpu_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("FRAME_UNIFORM_BUFFER"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("FRAME_UNIFORM_BIND_GROUP_LAYOUT"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<FrameUniforms>() as u64
                    ),
                },
                count: None,
            }],
        });

        let gpu_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("FRAME_UNIFORM_BIND_GROUP"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: gpu_uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            gpu_uniform_buffer,
            bind_group_layout,
            gpu_bind_group,
        }
    }

    /// Staged on the queue, so it lands before any command buffer submitted afterwards.
    pub fn write(&self, queue: &wgpu::Queue, frame_uniforms: &FrameUniforms) {
        queue.write_buffer(
            &self.gpu_uniform_buffer,
            0,
            bytemuck::cast_slice(std::slice::from_ref(frame_uniforms)),
        );
    }
}
