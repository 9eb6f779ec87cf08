use anyhow::Result;

use crate::app::App;
use crate::args::Args;

mod app;
pub mod args;
mod data;
mod error;
mod frame;
mod render;
mod resource;
mod view;

/// Opens the window and renders until it is closed.
///
/// Any failure while loading assets or building GPU resources ends the loop
/// before the first frame and is returned here.
pub fn run(args: Args) -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = App::create_event_loop()?;
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Poll);

    let mut app = App::new(&event_loop, args);

    event_loop.run_app(&mut app)?;

    match app.into_error() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
