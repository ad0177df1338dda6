// Orbit controls: drag to rotate around the target, wheel to zoom

use glam::Vec3;
use std::f32::consts::PI;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::core::math::clamp;
use crate::engine::renderer::Camera;

/// Keeps the polar angle away from the poles where look_at degenerates
const POLAR_EPSILON: f32 = 1e-4;

/// Pixels per wheel "line" when the platform reports line deltas
const PIXELS_PER_LINE: f32 = 100.0;

/// Spherical coordinates around the orbit target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    /// Polar angle from +Y
    pub phi: f32,
    /// Azimuth around Y, measured from +Z towards +X
    pub theta: f32,
}

impl Spherical {
    /// Spherical coordinates of an offset vector
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                phi: 0.0,
                theta: 0.0,
            };
        }

        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: clamp(offset.y / radius, -1.0, 1.0).acos(),
        }
    }

    /// Offset vector for these coordinates
    pub fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Damped orbit camera controller
///
/// Input accumulates rotation and zoom deltas; `update` applies a fraction
/// of the pending rotation each frame (the damping factor) and decays the
/// rest, which gives the camera its inertia.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    target: Vec3,
    spherical: Spherical,

    /// Pending rotation
    delta_theta: f32,
    delta_phi: f32,

    /// Pending zoom (multiplies the radius)
    scale: f32,

    damping_factor: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,

    /// Window height in pixels, used to map drags to angles
    viewport_height: f32,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl OrbitControls {
    /// Create controls orbiting `target` from `position`
    pub fn new(position: Vec3, target: Vec3, damping_factor: f32) -> Self {
        Self {
            target,
            spherical: Spherical::from_offset(position - target),
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            damping_factor: clamp(damping_factor, 0.0, 1.0),
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.5,
            max_distance: 80.0,
            viewport_height: 720.0,
            dragging: false,
            last_cursor: None,
        }
    }

    /// Feed a window event; returns true if the event was consumed
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let current = (position.x, position.y);
                let consumed = match (self.dragging, self.last_cursor) {
                    (true, Some((x, y))) => {
                        self.drag((current.0 - x) as f32, (current.1 - y) as f32);
                        true
                    }
                    _ => false,
                };
                self.last_cursor = Some(current);
                consumed
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let pixels = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y * PIXELS_PER_LINE,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                self.wheel(pixels);
                true
            }
            WindowEvent::Resized(size) => {
                self.set_viewport_height(size.height as f32);
                false
            }
            _ => false,
        }
    }

    /// Height in physical pixels that a full-height drag spans; zero is ignored
    pub fn set_viewport_height(&mut self, height: f32) {
        if height > 0.0 {
            self.viewport_height = height;
        }
    }

    /// Rotate by a pointer drag of (dx, dy) pixels
    pub fn drag(&mut self, dx: f32, dy: f32) {
        let per_pixel = 2.0 * PI * self.rotate_speed / self.viewport_height;
        self.delta_theta -= dx * per_pixel;
        self.delta_phi -= dy * per_pixel;
    }

    /// Zoom by a wheel movement; positive values move towards the target
    pub fn wheel(&mut self, pixels: f32) {
        if pixels == 0.0 {
            return;
        }
        let step = 0.95_f32.powf(self.zoom_speed);
        if pixels > 0.0 {
            self.scale *= step;
        } else {
            self.scale /= step;
        }
    }

    /// Apply pending input and write the camera pose
    pub fn update(&mut self, camera: &mut Camera) {
        self.spherical.theta += self.delta_theta * self.damping_factor;
        self.spherical.phi += self.delta_phi * self.damping_factor;
        self.spherical.phi = clamp(self.spherical.phi, POLAR_EPSILON, PI - POLAR_EPSILON);

        self.spherical.radius = clamp(
            self.spherical.radius * self.scale,
            self.min_distance,
            self.max_distance,
        );
        self.scale = 1.0;

        let decay = 1.0 - self.damping_factor;
        self.delta_theta *= decay;
        self.delta_phi *= decay;

        camera.look_at(self.target + self.spherical.to_offset(), self.target);
    }

    /// Current orbit position
    #[cfg(test)]
    pub fn spherical(&self) -> Spherical {
        self.spherical
    }

    /// Rotation still waiting to be applied
    #[cfg(test)]
    pub fn pending_rotation(&self) -> (f32, f32) {
        (self.delta_theta, self.delta_phi)
    }
}
