pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Value the depth attachment is reset to at the start of every frame.
pub const DEPTH_CLEAR_VALUE: f32 = 1.0;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DepthState {
    pub format: wgpu::TextureFormat,
    pub compare: wgpu::CompareFunction,
    pub write_enabled: bool,
}

impl Default for DepthState {
    /// Closest fragment wins and is recorded.
    fn default() -> Self {
        Self {
            format: DEPTH_FORMAT,
            compare: wgpu::CompareFunction::Less,
            write_enabled: true,
        }
    }
}

impl DepthState {
    pub fn to_depth_stencil_state(self) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format: self.format,
            depth_write_enabled: self.write_enabled,
            depth_compare: self.compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

/// CPU model of the fixed-function depth test.
#[cfg(test)]
impl DepthState {
    /// Whether a fragment at `incoming` depth survives against the `stored` depth.
    pub fn passes(&self, incoming: f32, stored: f32) -> bool {
        match self.compare {
            wgpu::CompareFunction::Never => false,
            wgpu::CompareFunction::Less => incoming < stored,
            wgpu::CompareFunction::Equal => incoming == stored,
            wgpu::CompareFunction::LessEqual => incoming <= stored,
            wgpu::CompareFunction::Greater => incoming > stored,
            wgpu::CompareFunction::NotEqual => incoming != stored,
            wgpu::CompareFunction::GreaterEqual => incoming >= stored,
            wgpu::CompareFunction::Always => true,
        }
    }

    /// Depth recorded at a pixel after rasterizing `fragments` in order onto a cleared target.
    pub fn resolve(&self, fragments: impl IntoIterator<Item = f32>) -> f32 {
        fragments
            .into_iter()
            .fold(DEPTH_CLEAR_VALUE, |stored, incoming| {
                match self.passes(incoming, stored) && self.write_enabled {
                    true => incoming,
                    false => stored,
                }
            })
    }
}
