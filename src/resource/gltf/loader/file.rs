use std::collections::HashMap;

use anyhow::Result;

use crate::error::Error;
use crate::resource::gltf::asset::file::FileSystemGltfAsset;
use crate::resource::gltf::asset::GltfAsset;
use crate::resource::gltf::loader::GltfLoader;

pub struct FileSystemGltfLoader<'a> {
    asset: &'a FileSystemGltfAsset,
    buffer_registry: HashMap<usize, Vec<u8>>,
}

impl<'a> FileSystemGltfLoader<'a> {
    pub fn new(asset: &'a FileSystemGltfAsset) -> Self {
        Self {
            asset,
            buffer_registry: HashMap::new(),
        }
    }

    fn read_buffer_source(&self, buffer: &gltf::Buffer) -> Result<Vec<u8>> {
        match buffer.source() {
            gltf::buffer::Source::Uri(uri) => {
                if uri.starts_with("data:") {
                    return Err(Error::asset(String::from(
                        "Loading buffers from data URIs is not supported.",
                    ))
                    .into());
                }

                let buffer_path = self.asset.root.join(uri);
                log::debug!("Reading glTF buffer: {}", buffer_path.display());

                match std::fs::read(&buffer_path) {
                    Ok(data) => Ok(data),
                    Err(error) => Err(Error::asset(format!(
                        "Unable to read the buffer {}: {error}",
                        buffer_path.display()
                    ))
                    .into()),
                }
            }
            gltf::buffer::Source::Bin => match self.asset.blob() {
                Some(blob) => Ok(blob.to_vec()),
                None => Err(Error::asset(String::from(
                    "The asset references a binary chunk but has none.",
                ))
                .into()),
            },
        }
    }
}

impl<'a> GltfLoader for FileSystemGltfLoader<'a> {
    fn load_buffer(&mut self, buffer_id: usize) -> Result<()> {
        if self.buffer_registry.contains_key(&buffer_id) {
            return Ok(());
        }

        let buffer = match self.asset.gltf().buffers().nth(buffer_id) {
            Some(buffer) => buffer,
            None => {
                return Err(
                    Error::asset(format!("The given buffer ID is invalid: {buffer_id}")).into(),
                )
            }
        };

        let data = self.read_buffer_source(&buffer)?;

        if data.len() < buffer.length() {
            return Err(Error::asset(format!(
                "Buffer {buffer_id} holds {} bytes but declares {}",
                data.len(),
                buffer.length()
            ))
            .into());
        }

        self.buffer_registry.insert(buffer_id, data);

        Ok(())
    }

    fn buffer_data(&self, buffer_id: usize) -> Option<&[u8]> {
        self.buffer_registry.get(&buffer_id).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::resource::gltf::fixture;
    use crate::resource::gltf::geometry::{GeometryAsset, IndexData};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("teapot_viewer_{name}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_geometry_from_a_gltf_file_and_its_buffer() {
        let dir = scratch_dir("gltf_loader");
        std::fs::write(dir.join("triangle.bin"), fixture::triangle_buffer()).unwrap();
        std::fs::write(
            dir.join("triangle.gltf"),
            fixture::triangle_gltf_json("triangle.bin"),
        )
        .unwrap();

        let asset = FileSystemGltfAsset::from_path(&dir.join("triangle.gltf")).unwrap();
        let mut gltf_loader = FileSystemGltfLoader::new(&asset);
        let geometry = GeometryAsset::load(&asset, &mut gltf_loader).unwrap();

        assert_eq!(geometry.meshes.len(), 1);
        assert_eq!(geometry.meshes[0].name, "triangle_0");
        assert_eq!(geometry.meshes[0].vertices.len(), 3);
        assert_eq!(geometry.meshes[0].vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(geometry.meshes[0].vertices[2].normal, [0.0, 0.0, 1.0]);
        assert_eq!(
            geometry.meshes[0].submeshes[0].indices,
            IndexData::U16(vec![0, 1, 2])
        );
        assert!(gltf_loader.buffer_data(0).is_some());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn truncated_buffer_is_rejected() {
        let dir = scratch_dir("gltf_truncated");
        std::fs::write(dir.join("triangle.bin"), &fixture::triangle_buffer()[..40]).unwrap();
        std::fs::write(
            dir.join("triangle.gltf"),
            fixture::triangle_gltf_json("triangle.bin"),
        )
        .unwrap();

        let asset = FileSystemGltfAsset::from_path(&dir.join("triangle.gltf")).unwrap();
        let mut gltf_loader = FileSystemGltfLoader::new(&asset);

        assert!(gltf_loader.load_buffer(0).is_err());
        assert!(gltf_loader.buffer_data(0).is_none());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_mesh_file_is_an_asset_error() {
        let result = FileSystemGltfAsset::from_path(&scratch_dir("gltf_missing").join("nope.gltf"));

        let error = result.err().unwrap();
        assert_eq!(
            error.downcast_ref::<Error>().map(Error::kind),
            Some(crate::error::ErrorKind::Asset)
        );
    }
}
