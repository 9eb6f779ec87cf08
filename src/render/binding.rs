use crate::render::sampler::{Sampler, SamplerConfiguration};
use crate::render::texture::Texture2DPackage;
use crate::resource::texture::TextureAsset;

/// Base color texture and its sampler, bound together at group 1.
pub struct TextureBinding {
    #[allow(dead_code)]
    pub texture: Texture2DPackage,
    pub sampler: Sampler,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub gpu_bind_group: wgpu::BindGroup,
}

impl TextureBinding {
    pub fn from_asset(
        texture_asset: &TextureAsset,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Self {
        let texture =
            Texture2DPackage::from_asset(texture_asset, "BASE_COLOR_TEXTURE", device, queue);
        let sampler = Sampler::from_config(
            SamplerConfiguration::TRILINEAR,
            "BASE_COLOR_SAMPLER",
            device,
        );

        log::debug!("Base color sampler: {:?}", sampler.config);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("BASE_COLOR_BIND_GROUP_LAYOUT"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let gpu_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("BASE_COLOR_BIND_GROUP"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.gpu_texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler.gpu_sampler),
                },
            ],
        });

        Self {
            texture,
            sampler,
            bind_group_layout,
            gpu_bind_group,
        }
    }
}
