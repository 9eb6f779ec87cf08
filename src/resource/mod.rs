pub mod gltf;
pub mod texture;
