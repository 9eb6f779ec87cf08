use anyhow::Result;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrameOutcome {
    /// Commands were submitted and the surface is scheduled for presentation.
    Presented,
    /// No drawable was available this tick; nothing was recorded.
    Skipped,
}

pub trait FrameRenderer {
    /// Width over height of the live surface, read at draw time.
    fn aspect_ratio(&self) -> f32;

    fn set_view_dimensions(&mut self, view_dimensions: winit::dpi::PhysicalSize<u32>);

    /// Only unrecoverable device failures are returned as errors.
    fn render_frame(&mut self, elapsed_time: f32, aspect_ratio: f32) -> Result<FrameOutcome>;
}

/// Drives one renderer from the host's redraw callback.
///
/// Owns the elapsed time accumulator. It advances by the tick's delta whether
/// or not the frame is actually produced, so a skipped frame does not stall
/// or rewind the animation. The sum is kept as a `Duration` and narrowed to
/// `f32` per frame, so long uptimes do not make the steps uneven.
pub struct FrameLoop<R: FrameRenderer> {
    renderer: R,
    elapsed_time: std::time::Duration,
}

impl<R: FrameRenderer> FrameLoop<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            elapsed_time: std::time::Duration::ZERO,
        }
    }

    pub fn elapsed_time(&self) -> std::time::Duration {
        self.elapsed_time
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn on_surface_resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.renderer.set_view_dimensions(new_size);
    }

    pub fn on_draw(&mut self, delta_time: std::time::Duration) -> Result<FrameOutcome> {
        self.elapsed_time += delta_time;

        let aspect_ratio = self.renderer.aspect_ratio();
        self.renderer
            .render_frame(self.elapsed_time.as_secs_f32(), aspect_ratio)
    }
}
