pub const DEFAULT_MESH_PATH: &str = "resources/teapot/teapot.gltf";
pub const DEFAULT_BASE_COLOR_TEXTURE_PATH: &str = "resources/teapot/teapot_base_color.png";

#[derive(Clone, Debug, PartialEq)]
pub struct Args {
    pub mesh: String,
    /// `None` selects the untextured variant.
    pub base_color_texture: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            mesh: String::from(DEFAULT_MESH_PATH),
            base_color_texture: Some(String::from(DEFAULT_BASE_COLOR_TEXTURE_PATH)),
        }
    }
}
