// Engine modules: renderer, physics, input, viewport and frame timing

pub mod frame_loop;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod viewport;
