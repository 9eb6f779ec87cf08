pub mod file;

pub trait GltfAsset {
    fn gltf(&self) -> &gltf::Gltf;

    /// Binary chunk of a `.glb` container, if the asset was loaded from one.
    fn blob(&self) -> Option<&[u8]> {
        self.gltf().blob.as_deref()
    }
}
