use anyhow::Result;

use crate::error::Error;
use crate::render::vertex::Vertex;
use crate::resource::gltf::asset::GltfAsset;
use crate::resource::gltf::loader::GltfLoader;

/// Every mesh of a model file, flattened to interleaved vertices and indexed submeshes.
pub struct GeometryAsset {
    pub meshes: Vec<MeshGeometry>,
}

pub struct MeshGeometry {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub submeshes: Vec<SubmeshGeometry>,
}

#[derive(Debug)]
pub struct SubmeshGeometry {
    pub topology: wgpu::PrimitiveTopology,
    pub indices: IndexData,
    /// Index of this submesh's first vertex inside the shared vertex list.
    pub base_vertex: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum IndexData {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexData {
    pub fn format(&self) -> wgpu::IndexFormat {
        match self {
            IndexData::U16(_) => wgpu::IndexFormat::Uint16,
            IndexData::U32(_) => wgpu::IndexFormat::Uint32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IndexData::U16(indices) => indices.len(),
            IndexData::U32(indices) => indices.len(),
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexData::U16(indices) => bytemuck::cast_slice(indices),
            IndexData::U32(indices) => bytemuck::cast_slice(indices),
        }
    }

    pub fn max(&self) -> Option<u32> {
        match self {
            IndexData::U16(indices) => indices.iter().max().map(|index| *index as u32),
            IndexData::U32(indices) => indices.iter().max().copied(),
        }
    }

    /// `0..vertex_count`, in the narrowest format that can hold it. A `u16` list never
    /// contains 0xFFFF, which is the primitive restart value for `Uint16` strips.
    pub fn sequential(vertex_count: usize) -> Self {
        match vertex_count <= u16::MAX as usize {
            true => IndexData::U16((0..vertex_count).map(|index| index as u16).collect()),
            false => IndexData::U32((0..vertex_count).map(|index| index as u32).collect()),
        }
    }
}

impl From<gltf::mesh::util::ReadIndices<'_>> for IndexData {
    fn from(value: gltf::mesh::util::ReadIndices<'_>) -> Self {
        match value {
            gltf::mesh::util::ReadIndices::U8(indices) => {
                IndexData::U16(indices.map(|index| index as u16).collect())
            }
            gltf::mesh::util::ReadIndices::U16(indices) => IndexData::U16(indices.collect()),
            gltf::mesh::util::ReadIndices::U32(indices) => IndexData::U32(indices.collect()),
        }
    }
}

pub fn topology_from_mode(mode: gltf::mesh::Mode) -> Result<wgpu::PrimitiveTopology> {
    match mode {
        gltf::mesh::Mode::Points => Ok(wgpu::PrimitiveTopology::PointList),
        gltf::mesh::Mode::Lines => Ok(wgpu::PrimitiveTopology::LineList),
        gltf::mesh::Mode::LineStrip => Ok(wgpu::PrimitiveTopology::LineStrip),
        gltf::mesh::Mode::Triangles => Ok(wgpu::PrimitiveTopology::TriangleList),
        gltf::mesh::Mode::TriangleStrip => Ok(wgpu::PrimitiveTopology::TriangleStrip),
        gltf::mesh::Mode::LineLoop | gltf::mesh::Mode::TriangleFan => Err(Error::asset(format!(
            "The given primitive uses an unsupported topology: {mode:?}"
        ))
        .into()),
    }
}

pub struct MeshGeometryBuilder {
    name: String,
    vertices: Vec<Vertex>,
    submeshes: Vec<SubmeshGeometry>,
}

impl MeshGeometryBuilder {
    pub fn new(name: String) -> Self {
        Self {
            name,
            vertices: vec![],
            submeshes: vec![],
        }
    }

    pub fn add_submesh(
        &mut self,
        topology: wgpu::PrimitiveTopology,
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        tex_coords: Option<Vec<[f32; 2]>>,
        indices: Option<IndexData>,
    ) -> Result<()> {
        let vertex_count = positions.len();

        if normals.len() != vertex_count {
            return Err(Error::asset(format!(
                "Submesh {} of mesh {} has {} normals for {vertex_count} positions",
                self.submeshes.len(),
                self.name,
                normals.len()
            ))
            .into());
        }

        let tex_coords = match tex_coords {
            Some(tex_coords) if tex_coords.len() == vertex_count => tex_coords,
            Some(tex_coords) => {
                return Err(Error::asset(format!(
                    "Submesh {} of mesh {} has {} texture coordinates for {vertex_count} positions",
                    self.submeshes.len(),
                    self.name,
                    tex_coords.len()
                ))
                .into())
            }
            None => {
                log::warn!(
                    "Submesh {} of mesh {} has no texture coordinates, using (0, 0)",
                    self.submeshes.len(),
                    self.name
                );
                vec![[0.0, 0.0]; vertex_count]
            }
        };

        let indices = indices.unwrap_or_else(|| IndexData::sequential(vertex_count));

        if let Some(max_index) = indices.max() {
            if max_index as usize >= vertex_count {
                return Err(Error::asset(format!(
                    "Submesh {} of mesh {} references vertex {max_index} but only has {vertex_count}",
                    self.submeshes.len(),
                    self.name
                ))
                .into());
            }
        }

        let base_vertex = i32::try_from(self.vertices.len()).map_err(|_| {
            Error::asset(format!("Mesh {} has too many vertices", self.name))
        })?;

        self.vertices.extend(
            positions
                .into_iter()
                .zip(normals)
                .zip(tex_coords)
                .map(|((position, normal), tex_coord)| Vertex {
                    position,
                    normal,
                    tex_coord,
                }),
        );

        self.submeshes.push(SubmeshGeometry {
            topology,
            indices,
            base_vertex,
        });

        Ok(())
    }

    pub fn finish(self) -> MeshGeometry {
        MeshGeometry {
            name: self.name,
            vertices: self.vertices,
            submeshes: self.submeshes,
        }
    }
}

impl GeometryAsset {
    pub fn load(asset: &impl GltfAsset, gltf_loader: &mut impl GltfLoader) -> Result<Self> {
        for buffer in asset.gltf().buffers() {
            gltf_loader.load_buffer(buffer.index())?;
        }
        let gltf_loader = &*gltf_loader;

        let mut meshes = vec![];
        for mesh in asset.gltf().meshes() {
            let mesh_name = format!("{}_{}", mesh.name().unwrap_or("<UNNAMED>"), mesh.index());
            log::debug!("Loading glTF mesh: {mesh_name}");

            let mut builder = MeshGeometryBuilder::new(mesh_name);

            for primitive in mesh.primitives() {
                let topology = topology_from_mode(primitive.mode())?;
                let reader =
                    primitive.reader(|buffer| gltf_loader.buffer_data(buffer.index()));

                let positions: Vec<[f32; 3]> = match reader.read_positions() {
                    Some(positions) => positions.collect(),
                    None => {
                        return Err(Error::asset(format!(
                            "Primitive {} of mesh {} has no position attribute.",
                            primitive.index(),
                            mesh.index()
                        ))
                        .into())
                    }
                };

                let normals: Vec<[f32; 3]> = match reader.read_normals() {
                    Some(normals) => normals.collect(),
                    None => {
                        return Err(Error::asset(format!(
                            "Primitive {} of mesh {} has no normal attribute.",
                            primitive.index(),
                            mesh.index()
                        ))
                        .into())
                    }
                };

                let tex_coords = reader
                    .read_tex_coords(0)
                    .map(|tex_coords| tex_coords.into_f32().collect());

                let indices = reader.read_indices().map(IndexData::from);

                builder.add_submesh(topology, positions, normals, tex_coords, indices)?;
            }

            let mesh_geometry = builder.finish();
            log::info!(
                "Loaded mesh {} with {} vertices in {} submeshes",
                mesh_geometry.name,
                mesh_geometry.vertices.len(),
                mesh_geometry.submeshes.len()
            );
            meshes.push(mesh_geometry);
        }

        if meshes.iter().all(|mesh| mesh.submeshes.is_empty()) {
            return Err(Error::asset(String::from("The given asset contains no geometry.")).into());
        }

        Ok(Self { meshes })
    }
}
