//! The one description of the interleaved vertex format.
//!
//! Geometry buffers are written as slices of [`Vertex`] and the pipeline's
//! vertex input, as well as the shader input locations, are derived from
//! [`VERTEX_ATTRIBUTES`]. Offsets come from the struct itself, so the two
//! sides cannot drift apart.

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VertexSemantic {
    Position,
    Normal,
    TexCoord,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexAttributeDescriptor {
    pub semantic: VertexSemantic,
    pub format: wgpu::VertexFormat,
    pub offset: wgpu::BufferAddress,
    pub shader_location: wgpu::ShaderLocation,
}

impl VertexAttributeDescriptor {
    const fn to_wgpu(self) -> wgpu::VertexAttribute {
        wgpu::VertexAttribute {
            format: self.format,
            offset: self.offset,
            shader_location: self.shader_location,
        }
    }
}

pub const VERTEX_BUFFER_SLOT: u32 = 0;

pub const VERTEX_STRIDE: wgpu::BufferAddress = std::mem::size_of::<Vertex>() as wgpu::BufferAddress;

pub const VERTEX_ATTRIBUTES: [VertexAttributeDescriptor; 3] = [
    VertexAttributeDescriptor {
        semantic: VertexSemantic::Position,
        format: wgpu::VertexFormat::Float32x3,
        offset: std::mem::offset_of!(Vertex, position) as wgpu::BufferAddress,
        shader_location: 0,
    },
    VertexAttributeDescriptor {
        semantic: VertexSemantic::Normal,
        format: wgpu::VertexFormat::Float32x3,
        offset: std::mem::offset_of!(Vertex, normal) as wgpu::BufferAddress,
        shader_location: 1,
    },
    VertexAttributeDescriptor {
        semantic: VertexSemantic::TexCoord,
        format: wgpu::VertexFormat::Float32x2,
        offset: std::mem::offset_of!(Vertex, tex_coord) as wgpu::BufferAddress,
        shader_location: 2,
    },
];

const WGPU_VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
    VERTEX_ATTRIBUTES[0].to_wgpu(),
    VERTEX_ATTRIBUTES[1].to_wgpu(),
    VERTEX_ATTRIBUTES[2].to_wgpu(),
];

impl Vertex {
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: VERTEX_STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &WGPU_VERTEX_ATTRIBUTES,
        }
    }

    pub fn shader_location(semantic: VertexSemantic) -> wgpu::ShaderLocation {
        VERTEX_ATTRIBUTES
            .iter()
            .find(|attribute| attribute.semantic == semantic)
            .map(|attribute| attribute.shader_location)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_interleaved_position_normal_tex_coord() {
        assert_eq!(VERTEX_STRIDE, 8 * std::mem::size_of::<f32>() as u64);

        let offsets: Vec<u64> = VERTEX_ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24]);

        let formats: Vec<wgpu::VertexFormat> = VERTEX_ATTRIBUTES.iter().map(|a| a.format).collect();
        assert_eq!(
            formats,
            vec![
                wgpu::VertexFormat::Float32x3,
                wgpu::VertexFormat::Float32x3,
                wgpu::VertexFormat::Float32x2,
            ]
        );
    }

    #[test]
    fn attributes_fit_inside_the_stride_without_overlap() {
        let mut end = 0;
        for attribute in VERTEX_ATTRIBUTES {
            assert!(attribute.offset >= end);
            end = attribute.offset + attribute.format.size();
        }
        assert_eq!(end, VERTEX_STRIDE);
    }

    #[test]
    fn buffer_layout_mirrors_the_descriptor_table() {
        let layout = Vertex::buffer_layout();

        assert_eq!(layout.array_stride, VERTEX_STRIDE);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        for (attribute, descriptor) in layout.attributes.iter().zip(VERTEX_ATTRIBUTES) {
            assert_eq!(attribute.offset, descriptor.offset);
            assert_eq!(attribute.format, descriptor.format);
            assert_eq!(attribute.shader_location, descriptor.shader_location);
        }
    }

    #[test]
    fn vertex_bytes_land_at_the_declared_offsets() {
        let vertex = Vertex {
            position: [1.0, 2.0, 3.0],
            normal: [4.0, 5.0, 6.0],
            tex_coord: [7.0, 8.0],
        };
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&vertex));

        let normal_start = VERTEX_ATTRIBUTES[1].offset as usize / std::mem::size_of::<f32>();
        let tex_coord_start = VERTEX_ATTRIBUTES[2].offset as usize / std::mem::size_of::<f32>();
        assert_eq!(&floats[normal_start..normal_start + 3], &[4.0, 5.0, 6.0]);
        assert_eq!(&floats[tex_coord_start..tex_coord_start + 2], &[7.0, 8.0]);
    }

    #[test]
    fn shader_locations_are_distinct() {
        let position = Vertex::shader_location(VertexSemantic::Position);
        let normal = Vertex::shader_location(VertexSemantic::Normal);
        let tex_coord = Vertex::shader_location(VertexSemantic::TexCoord);

        assert_ne!(position, normal);
        assert_ne!(normal, tex_coord);
        assert_ne!(position, tex_coord);
    }
}
