use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::Error;
use crate::resource::gltf::asset::GltfAsset;

pub struct FileSystemGltfAsset {
    gltf: gltf::Gltf,
    pub root: PathBuf,
}

impl FileSystemGltfAsset {
    pub fn from_path(gltf_path: &Path) -> Result<Self> {
        let absolute_path = match gltf_path.canonicalize() {
            Ok(absolute_path) => absolute_path,
            Err(error) => {
                return Err(Error::asset(format!(
                    "Unable to open the mesh file {}: {error}",
                    gltf_path.display()
                ))
                .into())
            }
        };

        if !absolute_path.is_file() {
            return Err(Error::asset(format!(
                "The given path is not a file: {}",
                gltf_path.display()
            ))
            .into());
        }

        let root = match absolute_path.parent() {
            Some(root) => root.to_path_buf(),
            None => {
                return Err(Error::asset(format!(
                    "Unable to find the parent directory of the given path: {}",
                    gltf_path.display()
                ))
                .into())
            }
        };

        log::debug!("Parsing glTF document: {}", absolute_path.display());
        let parsed_gltf = match gltf::Gltf::open(&absolute_path) {
            Ok(parsed_gltf) => parsed_gltf,
            Err(error) => {
                return Err(Error::asset(format!(
                    "Unable to parse the mesh file {}: {error}",
                    gltf_path.display()
                ))
                .into())
            }
        };

        Ok(Self {
            gltf: parsed_gltf,
            root,
        })
    }
}

impl GltfAsset for FileSystemGltfAsset {
    fn gltf(&self) -> &gltf::Gltf {
        &self.gltf
    }
}
