use crate::render::depth::DEPTH_FORMAT;
use crate::resource::texture::TextureAsset;

pub const BASE_COLOR_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

pub struct Texture2DPackage {
    #[allow(dead_code)]
    pub gpu_texture: wgpu::Texture,
    pub gpu_texture_view: wgpu::TextureView,
}

impl Texture2DPackage {
    /// Uploads every level of the asset's mip chain.
    pub fn from_asset(
        texture_asset: &TextureAsset,
        label: &str,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Self {
        let (width, height) = texture_asset.dimensions();
        let levels = texture_asset.levels();

        log::debug!(
            "Uploading texture {label}: {width}x{height} with {} mip levels",
            levels.len()
        );

        let gpu_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: BASE_COLOR_TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip_level, level) in levels.iter().enumerate() {
            let (level_width, level_height) = level.dimensions();

            queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &gpu_texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                level.as_raw(),
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * level_width),
                    rows_per_image: Some(level_height),
                },
                wgpu::Extent3d {
                    width: level_width,
                    height: level_height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let gpu_texture_view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            gpu_texture,
            gpu_texture_view,
        }
    }
}

pub struct DepthTexture2DPackage {
    #[allow(dead_code)]
    pub gpu_texture: wgpu::Texture,
    pub gpu_texture_view: wgpu::TextureView,
}

impl DepthTexture2DPackage {
    /// Sized to the surface; recreated whenever the surface is resized.
    pub fn from_device(device: &wgpu::Device, view_dimensions: winit::dpi::PhysicalSize<u32>) -> Self {
        let gpu_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("DEPTH_TEXTURE"),
            size: wgpu::Extent3d {
                width: view_dimensions.width.max(1),
                height: view_dimensions.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let gpu_texture_view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            gpu_texture,
            gpu_texture_view,
        }
    }
}
