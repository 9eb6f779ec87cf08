use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::args::Args;
use crate::frame::FrameOutcome;
use crate::view::ViewSystem;

pub struct App {
    event_loop_proxy: EventLoopProxy<UserEvent>,
    args: Args,
    view_system: Option<ViewSystem>,
    initialization_started: bool,
    error: Option<anyhow::Error>,
    last_render_time: Instant,
}

impl App {
    pub fn new(event_loop: &EventLoop<UserEvent>, args: Args) -> Self {
        App {
            event_loop_proxy: event_loop.create_proxy(),
            args,
            view_system: None,
            initialization_started: false,
            error: None,
            last_render_time: Instant::now(),
        }
    }

    pub fn create_event_loop() -> Result<EventLoop<UserEvent>, EventLoopError> {
        EventLoop::<UserEvent>::with_user_event().build()
    }

    /// The failure that stopped the event loop, if any.
    pub fn into_error(self) -> Option<anyhow::Error> {
        self.error
    }

    /// Stores the error for `run` to return; `main` reports it.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        self.error = Some(error);
        event_loop.exit();
    }

    async fn initialize_view_system(
        event_loop_proxy: EventLoopProxy<UserEvent>,
        window: Window,
        args: Args,
    ) {
        let user_event = match ViewSystem::from_window(window, &args).await {
            Ok(view_system) => UserEvent::ViewSystemReady(view_system),
            Err(error) => UserEvent::ViewSystemFailed(error),
        };

        if event_loop_proxy.send_event(user_event).is_err() {
            log::warn!("Event loop closed before the view system was delivered");
        }
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        log::info!("Application resumed");

        if self.initialization_started {
            return;
        }
        self.initialization_started = true;

        let window = match event_loop
            .create_window(Window::default_attributes().with_title("Teapot Viewer"))
        {
            Ok(window) => window,
            Err(error) => return self.fail(event_loop, error.into()),
        };

        let event_loop_proxy = self.event_loop_proxy.clone();
        let args = self.args.clone();
        pollster::block_on(App::initialize_view_system(event_loop_proxy, window, args));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let view_system = match &mut self.view_system {
            Some(view_system) => view_system,
            None => return,
        };

        if view_system.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(new_size) => view_system.frame_loop.on_surface_resize(new_size),
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta_time = now - self.last_render_time;
                self.last_render_time = now;

                match view_system.frame_loop.on_draw(delta_time) {
                    Ok(FrameOutcome::Presented) => {}
                    Ok(FrameOutcome::Skipped) => {
                        log::trace!(
                            "Frame skipped at t = {:.3}s",
                            view_system.frame_loop.elapsed_time().as_secs_f64()
                        );
                    }
                    Err(error) => return self.fail(event_loop, error),
                }

                view_system.window.request_redraw();
            }
            _ => {}
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::ViewSystemReady(view_system) => {
                log::info!("View system created");

                view_system.window.request_redraw();
                self.view_system = Some(view_system);
                self.last_render_time = Instant::now();
            }
            UserEvent::ViewSystemFailed(error) => self.fail(event_loop, error),
        }
    }
}

pub enum UserEvent {
    ViewSystemReady(ViewSystem),
    ViewSystemFailed(anyhow::Error),
}
