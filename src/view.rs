use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::args::Args;
use crate::data::transform::TransformConfiguration;
use crate::frame::FrameLoop;
use crate::render::RenderSystem;
use crate::resource::gltf::asset::file::FileSystemGltfAsset;
use crate::resource::gltf::geometry::GeometryAsset;
use crate::resource::gltf::loader::file::FileSystemGltfLoader;
use crate::resource::texture::file::FileSystemTextureLoader;
use crate::resource::texture::TextureAsset;

pub struct ViewSystem {
    pub window: std::sync::Arc<winit::window::Window>,
    pub frame_loop: FrameLoop<RenderSystem>,
}

impl ViewSystem {
    /// Loads the assets, then builds the render system around them.
    pub async fn from_window(window: winit::window::Window, args: &Args) -> Result<Self> {
        let transform_config = TransformConfiguration::default();
        transform_config.validate()?;

        let geometry = ViewSystem::load_geometry(Path::new(&args.mesh))?;

        let base_color_texture = match &args.base_color_texture {
            Some(texture_path) => Some(TextureAsset::load(&FileSystemTextureLoader {
                path: PathBuf::from(texture_path),
            })?),
            None => {
                log::info!("No base color texture given, drawing untextured");
                None
            }
        };

        let window = std::sync::Arc::new(window);

        let render_system = RenderSystem::from_window(
            window.clone(),
            &geometry,
            base_color_texture.as_ref(),
            transform_config,
        )
        .await?;

        Ok(Self {
            window,
            frame_loop: FrameLoop::new(render_system),
        })
    }

    fn load_geometry(mesh_path: &Path) -> Result<GeometryAsset> {
        log::info!("Loading mesh: {}", mesh_path.display());

        let asset = FileSystemGltfAsset::from_path(mesh_path)?;
        let mut gltf_loader = FileSystemGltfLoader::new(&asset);

        GeometryAsset::load(&asset, &mut gltf_loader)
    }
}
