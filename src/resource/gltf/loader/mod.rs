use anyhow::Result;

pub mod file;

/// Source of the raw bytes behind a glTF document's buffers.
///
/// Buffers are loaded up front, after which reads only borrow.
pub trait GltfLoader {
    fn load_buffer(&mut self, buffer_id: usize) -> Result<()>;
    fn buffer_data(&self, buffer_id: usize) -> Option<&[u8]>;
}
