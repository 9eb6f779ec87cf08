#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SamplerConfiguration {
    pub address_mode: wgpu::AddressMode,
    pub mag_filter: wgpu::FilterMode,
    pub min_filter: wgpu::FilterMode,
    pub mipmap_filter: wgpu::FilterMode,
}

impl SamplerConfiguration {
    /// Bilinear within a level, linear between mip levels.
    pub const TRILINEAR: Self = Self {
        address_mode: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
    };

    pub fn to_descriptor(self, label: &str) -> wgpu::SamplerDescriptor<'_> {
        wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: self.address_mode,
            address_mode_v: self.address_mode,
            address_mode_w: self.address_mode,
            mag_filter: self.mag_filter,
            min_filter: self.min_filter,
            mipmap_filter: self.mipmap_filter,
            ..Default::default()
        }
    }
}

pub struct Sampler {
    pub config: SamplerConfiguration,
    pub gpu_sampler: wgpu::Sampler,
}

impl Sampler {
    pub fn from_config(config: SamplerConfiguration, label: &str, device: &wgpu::Device) -> Self {
        Self {
            config,
            gpu_sampler: device.create_sampler(&config.to_descriptor(label)),
        }
    }
}
