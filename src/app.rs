// Application shell: owns the window-facing pieces and routes winit events
// into the simulation

use anyhow::Result;
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::core::config::DemoConfig;
use crate::demo::sync::run_frame;
use crate::demo::{BodyKind, Simulation};
use crate::engine::frame_loop::{FrameLoop, LoopState};
use crate::engine::input::OrbitControls;
use crate::engine::renderer::{Camera, Renderer};
use crate::engine::viewport::Viewport;

pub struct App {
    window: Arc<Window>,
    renderer: Renderer,
    sim: Simulation,
    camera: Camera,
    controls: OrbitControls,
    viewport: Viewport,
    frame_loop: FrameLoop,
    /// When the spawner was last fed elapsed time
    last_spawn_check: Instant,
}

impl App {
    /// Create the renderer, build the scene and start the frame loop
    pub fn new(window: Arc<Window>, config: &DemoConfig) -> Result<Self> {
        let renderer = pollster::block_on(Renderer::new(window.clone(), config.scene.shadows))?;

        let camera_config = &config.camera;
        let camera = Camera::new(
            camera_config.fov_degrees,
            1.0,
            camera_config.near,
            camera_config.far,
        );
        let controls = OrbitControls::new(
            camera_config.position,
            camera_config.target,
            camera_config.damping_factor,
        );

        let mut sim = Simulation::new(config);
        sim.setup();

        let mut app = Self {
            window,
            renderer,
            sim,
            camera,
            controls,
            viewport: Viewport::new(config.window.max_pixel_ratio),
            frame_loop: FrameLoop::new(),
            last_spawn_check: Instant::now(),
        };

        app.resize();
        app.frame_loop.start();
        app.window.request_redraw();
        Ok(app)
    }

    /// Whether the app still wants events; false once shut down
    pub fn is_running(&self) -> bool {
        self.frame_loop.state() != LoopState::Disposed
    }

    /// Handle one window event
    pub fn window_event(&mut self, event: &WindowEvent) -> Result<()> {
        if self.controls.handle_event(event) {
            return Ok(());
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down...");
                self.shutdown();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self.resize(),
            WindowEvent::Occluded(true) => self.frame_loop.stop(),
            WindowEvent::Occluded(false) => {
                if self.frame_loop.start() {
                    self.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw()?,
            _ => {}
        }
        Ok(())
    }

    /// Feed real elapsed time to the spawner and return when it next fires
    pub fn about_to_wait(&mut self) -> Option<Instant> {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_spawn_check);
        self.last_spawn_check = now;

        if !self.frame_loop.is_running() {
            return None;
        }
        self.sim.advance_spawner(elapsed);
        self.sim.until_next_spawn().map(|wait| now + wait)
    }

    /// Stop frames and spawning for good
    pub fn shutdown(&mut self) {
        if self.is_running() {
            info!(
                "Ran {} frames ({:.1} FPS), {} physics steps, {} spheres",
                self.frame_loop.frame_count(),
                self.frame_loop.fps(),
                self.sim.world().step_count(),
                self.sim.registry().count_of(BodyKind::Sphere)
            );
        }
        self.sim.stop_spawner();
        self.frame_loop.dispose();
    }

    fn resize(&mut self) {
        let scale_factor = self.window.scale_factor();
        let size: LogicalSize<f32> = self.window.inner_size().to_logical(scale_factor);
        self.viewport.apply(
            size.width,
            size.height,
            scale_factor,
            &mut self.camera,
            &mut self.renderer,
        );
        self.controls
            .set_viewport_height(self.window.inner_size().height as f32);
    }

    fn redraw(&mut self) -> Result<()> {
        let Some(timing) = self.frame_loop.begin_frame() else {
            return Ok(());
        };
        if timing.real_delta.as_secs_f32() > 4.0 * self.frame_loop.fixed_timestep() {
            debug!(
                "Frame {} took {:?}; simulation runs slower than real time",
                timing.frame, timing.real_delta
            );
        }

        run_frame(
            &mut self.sim,
            &mut self.controls,
            &mut self.camera,
            &mut self.renderer,
        )?;
        self.window.request_redraw();
        Ok(())
    }
}
