use anyhow::Result;

use crate::data::transform::{FrameTransforms, TransformConfiguration};
use crate::error::Error;
use crate::frame::{FrameOutcome, FrameRenderer};
use crate::render::depth::DEPTH_CLEAR_VALUE;
use crate::render::scene::SceneLoader;
use crate::render::state::RenderSystemState;
use crate::render::storage::RenderSystemSceneStorage;
use crate::render::uniform::FrameUniforms;
use crate::render::vertex::VERTEX_BUFFER_SLOT;
use crate::resource::gltf::geometry::GeometryAsset;
use crate::resource::texture::TextureAsset;

mod binding;
mod buffer;
mod depth;
mod mesh;
mod pipeline;
mod sampler;
mod scene;
mod shader;
mod state;
mod storage;
mod texture;
mod uniform;
pub mod vertex;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.2,
    b: 0.3,
    a: 1.0,
};

pub struct RenderSystem {
    state: RenderSystemState,
    storage: RenderSystemSceneStorage,
    transform_config: TransformConfiguration,
}

impl RenderSystem {
    /// Builds every GPU resource the frame loop needs. Any rejection by the device is fatal.
    pub async fn from_window(
        window: std::sync::Arc<winit::window::Window>,
        geometry: &GeometryAsset,
        base_color_texture: Option<&TextureAsset>,
        transform_config: TransformConfiguration,
    ) -> Result<Self> {
        let state = RenderSystemState::from_window(window).await?;

        state.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let storage = SceneLoader::load(&state, geometry, base_color_texture);
        if let Some(error) = state.device.pop_error_scope().await {
            return Err(
                Error::device(format!("The device rejected the render resources: {error}")).into(),
            );
        }
        let storage = storage?;

        Ok(Self {
            state,
            storage,
            transform_config,
        })
    }

    fn acquire_surface_texture(&mut self) -> Result<Option<wgpu::SurfaceTexture>> {
        if !self.state.is_drawable() {
            log::debug!("Skipping frame: surface has no area");
            return Ok(None);
        }

        match self.state.surface.get_current_texture() {
            Ok(output) => Ok(Some(output)),
            Err(wgpu::SurfaceError::Timeout) => {
                log::debug!("Skipping frame: surface timeout");
                Ok(None)
            }
            Err(error @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::debug!("Skipping frame: {error}, reconfiguring surface");
                self.state.sync_view_dimensions();
                Ok(None)
            }
            Err(error @ wgpu::SurfaceError::OutOfMemory) => Err(error.into()),
        }
    }

    fn draw_meshes(&self, render_pass: &mut wgpu::RenderPass) {
        let mut bound_pipeline: Option<&std::rc::Rc<pipeline::RenderPipeline>> = None;

        for mesh in self.storage.meshes.iter() {
            render_pass.set_vertex_buffer(VERTEX_BUFFER_SLOT, mesh.vertex_buffer.gpu_buffer.slice(..));

            for submesh in mesh.submeshes.iter() {
                let needs_pipeline = match bound_pipeline {
                    Some(pipeline) => !std::rc::Rc::ptr_eq(pipeline, &submesh.render_pipeline),
                    None => true,
                };

                if needs_pipeline {
                    render_pass.set_pipeline(&submesh.render_pipeline.gpu_pipeline);
                    bound_pipeline = Some(&submesh.render_pipeline);
                }

                submesh.draw(render_pass);
            }
        }
    }
}

impl FrameRenderer for RenderSystem {
    fn aspect_ratio(&self) -> f32 {
        view_aspect_ratio(self.state.view_dimensions)
    }

    fn set_view_dimensions(&mut self, view_dimensions: winit::dpi::PhysicalSize<u32>) {
        self.state.set_view_dimensions(view_dimensions);
    }

    fn render_frame(&mut self, elapsed_time: f32, aspect_ratio: f32) -> Result<FrameOutcome> {
        let frame_transforms =
            FrameTransforms::compute(&self.transform_config, elapsed_time, aspect_ratio);
        let frame_uniforms = FrameUniforms::from(&frame_transforms);

        let output = match self.acquire_surface_texture()? {
            Some(output) => output,
            None => return Ok(FrameOutcome::Skipped),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.state
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("RENDER_SYSTEM_COMMAND_ENCODER"),
                });

        self.state
            .frame_uniform_binding
            .write(&self.state.queue, &frame_uniforms);

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("RENDER_SYSTEM_RENDER_PASS"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.state.depth_texture.gpu_texture_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DEPTH_CLEAR_VALUE),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, &self.state.frame_uniform_binding.gpu_bind_group, &[]);
            if let Some(base_color_binding) = &self.storage.base_color_binding {
                render_pass.set_bind_group(1, &base_color_binding.gpu_bind_group, &[]);
            }

            self.draw_meshes(&mut render_pass);
        }

        let command_buffer = encoder.finish();

        // The surface may only be presented once the work that draws it is queued.
        self.state.queue.submit(std::iter::once(command_buffer));
        output.present();

        Ok(FrameOutcome::Presented)
    }
}

/// Width over height; a surface without height falls back to square.
pub fn view_aspect_ratio(view_dimensions: winit::dpi::PhysicalSize<u32>) -> f32 {
    match view_dimensions.height {
        0 => 1.0,
        height => view_dimensions.width as f32 / height as f32,
    }
}
