use anyhow::Result;
use log::{error, info};
use std::sync::Arc;
use winit::{
    dpi::LogicalSize,
    event::Event,
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

mod app;
mod core;
mod demo;
mod engine;

use crate::app::App;
use crate::core::config::DemoConfig;

fn main() -> Result<()> {
    // RUST_LOG overrides the default filter
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting Falling Spheres...");

    let config = DemoConfig::from_env()?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut app = App::new(window, &config)?;

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => {
                if let Err(e) = app.window_event(&event) {
                    error!("Frame failed: {:#}", e);
                    app.shutdown();
                }
                if !app.is_running() {
                    elwt.exit();
                }
            }
            Event::AboutToWait => {
                let control_flow = match app.about_to_wait() {
                    Some(deadline) => ControlFlow::WaitUntil(deadline),
                    None => ControlFlow::Wait,
                };
                elwt.set_control_flow(control_flow);
            }
            Event::LoopExiting => app.shutdown(),
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
