// Input handling system
//
// Pointer and wheel input drive a damped orbit camera around a target.
//
// ## Usage Example
//
// ```rust
// use engine::input::OrbitControls;
//
// let mut controls = OrbitControls::new(camera.position, camera.target, 0.1);
//
// // In your event loop, forward window events
// controls.handle_event(&window_event);
//
// // Once per frame, before rendering
// controls.update(&mut camera);
// ```

pub mod orbit;

pub use orbit::OrbitControls;
