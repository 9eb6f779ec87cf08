use anyhow::Result;

use crate::error::Error;
use crate::render::texture::DepthTexture2DPackage;
use crate::render::uniform::FrameUniformBinding;

pub struct RenderSystemState {
    #[allow(dead_code)]
    pub instance: wgpu::Instance,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    #[allow(dead_code)]
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub frame_uniform_binding: FrameUniformBinding,
    pub depth_texture: DepthTexture2DPackage,
    pub tera: tera::Tera,
    pub view_dimensions: winit::dpi::PhysicalSize<u32>,
}

impl RenderSystemState {
    pub async fn from_window(window: std::sync::Arc<winit::window::Window>) -> Result<Self> {
        let view_dimensions = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Some(adapter) => adapter,
            None => return Err(Error::device(String::from("Failed to retrieve adapter.")).into()),
        };

        let adapter_info = adapter.get_info();
        log::info!(
            "Using adapter: {} ({:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: Some("RENDER_SYSTEM_DEVICE"),
                    ..Default::default()
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);

        let surface_format = match surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
        {
            Some(surface_format) => *surface_format,
            None => {
                return Err(Error::device(String::from(
                    "The surface is not compatible with the selected adapter.",
                ))
                .into())
            }
        };

        log::info!("Using surface format: {surface_format:?}");

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: view_dimensions.width,
            height: view_dimensions.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        if RenderSystemState::has_area(view_dimensions) {
            surface.configure(&device, &surface_config);
        }

        let frame_uniform_binding = FrameUniformBinding::from_device(&device);

        let depth_texture = DepthTexture2DPackage::from_device(&device, view_dimensions);

        let tera = tera::Tera::new("shaders/**/*")?;

        Ok(Self {
            instance,
            surface,
            surface_config,
            adapter,
            device,
            queue,
            frame_uniform_binding,
            depth_texture,
            tera,
            view_dimensions,
        })
    }

    /// A zero-sized surface cannot be configured; it is left as is until it grows again.
    pub fn set_view_dimensions(&mut self, view_dimensions: winit::dpi::PhysicalSize<u32>) {
        self.view_dimensions = view_dimensions;

        if !RenderSystemState::has_area(view_dimensions) {
            return;
        }

        self.surface_config.width = view_dimensions.width;
        self.surface_config.height = view_dimensions.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_texture = DepthTexture2DPackage::from_device(&self.device, view_dimensions);
    }

    pub fn sync_view_dimensions(&mut self) {
        self.set_view_dimensions(self.view_dimensions);
    }

    pub fn is_drawable(&self) -> bool {
        RenderSystemState::has_area(self.view_dimensions)
    }

    fn has_area(view_dimensions: winit::dpi::PhysicalSize<u32>) -> bool {
        view_dimensions.width > 0 && view_dimensions.height > 0
    }
}
