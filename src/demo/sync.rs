// Per-frame driver: camera, render, step, sync
//
// Rendering happens before the step, so each frame shows the transforms
// produced by the previous tick.

use anyhow::Result;

use super::{DemoError, Simulation, WorldObject};
use crate::core::math::{to_quat, to_vec3};
use crate::engine::input::OrbitControls;
use crate::engine::physics::PhysicsWorld;
use crate::engine::renderer::{Camera, Scene, SceneRenderer};

/// Copy a body's translation and rotation onto its mesh
pub fn copy_transform(
    world: &PhysicsWorld,
    scene: &mut Scene,
    object: &WorldObject,
) -> Result<(), DemoError> {
    let body = world
        .get_rigid_body(object.body)
        .ok_or(DemoError::MissingBody(object.body))?;
    let mesh = scene
        .mesh_mut(object.mesh)
        .ok_or(DemoError::MissingMesh(object.mesh))?;

    mesh.position = to_vec3(body.translation());
    mesh.rotation = to_quat(body.rotation());
    Ok(())
}

/// Run one frame: update the camera, draw, then advance the simulation
pub fn run_frame<R: SceneRenderer + ?Sized>(
    sim: &mut Simulation,
    controls: &mut OrbitControls,
    camera: &mut Camera,
    renderer: &mut R,
) -> Result<()> {
    controls.update(camera);
    renderer.render(sim.scene(), camera)?;
    sim.tick()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DemoConfig;
    use crate::engine::renderer::{MeshHandle, RenderError};
    use glam::Vec3;
    use std::time::Duration;

    /// Records the position of one mesh every time a frame is drawn
    struct RecordingRenderer {
        watched: MeshHandle,
        seen: Vec<Vec3>,
        fail: bool,
    }

    impl SceneRenderer for RecordingRenderer {
        fn render(&mut self, scene: &Scene, _camera: &Camera) -> Result<(), RenderError> {
            if self.fail {
                return Err(RenderError::NoAdapter);
            }
            if let Some(mesh) = scene.mesh(self.watched) {
                self.seen.push(mesh.position);
            }
            Ok(())
        }

        fn set_size(&mut self, _width: u32, _height: u32) {}
    }

    fn fixture() -> (Simulation, OrbitControls, Camera) {
        let config = DemoConfig::default();
        let camera = Camera::new(config.camera.fov_degrees, 1.0, config.camera.near, config.camera.far);
        let controls = OrbitControls::new(
            config.camera.position,
            config.camera.target,
            config.camera.damping_factor,
        );
        (Simulation::new(&config), controls, camera)
    }

    #[test]
    fn test_render_sees_previous_tick() {
        let (mut sim, mut controls, mut camera) = fixture();
        sim.setup();
        let sphere = sim.create_sphere();
        let mut renderer = RecordingRenderer {
            watched: sphere.mesh,
            seen: Vec::new(),
            fail: false,
        };

        let mut after_tick = vec![Vec3::new(0.0, 3.0, 0.0)];
        for _ in 0..30 {
            run_frame(&mut sim, &mut controls, &mut camera, &mut renderer).unwrap();
            let body = sim.world().get_rigid_body(sphere.body).unwrap();
            after_tick.push(to_vec3(body.translation()));
        }

        // Frame k draws what tick k-1 produced
        assert_eq!(renderer.seen.len(), 30);
        assert_eq!(renderer.seen[..], after_tick[..30]);
        assert!(after_tick[30].y < 3.0);
    }

    #[test]
    fn test_frame_steps_exactly_once() {
        let (mut sim, mut controls, mut camera) = fixture();
        sim.setup();
        let floor = *sim.registry().get(0).unwrap();
        let mut renderer = RecordingRenderer {
            watched: floor.mesh,
            seen: Vec::new(),
            fail: false,
        };

        for _ in 0..10 {
            // Long real-time gaps never cause extra steps
            sim.advance_spawner(Duration::from_millis(250));
            run_frame(&mut sim, &mut controls, &mut camera, &mut renderer).unwrap();
        }
        assert_eq!(sim.world().step_count(), 10);
    }

    #[test]
    fn test_render_failure_skips_step() {
        let (mut sim, mut controls, mut camera) = fixture();
        sim.setup();
        let floor = *sim.registry().get(0).unwrap();
        let mut renderer = RecordingRenderer {
            watched: floor.mesh,
            seen: Vec::new(),
            fail: true,
        };

        assert!(run_frame(&mut sim, &mut controls, &mut camera, &mut renderer).is_err());
        assert_eq!(sim.world().step_count(), 0);
    }

    #[test]
    fn test_copy_transform_reports_missing_mesh() {
        let (mut sim, _, _) = fixture();
        let sphere = sim.create_sphere();
        let mut empty = Scene::new();

        let result = copy_transform(sim.world(), &mut empty, &sphere);
        assert_eq!(result, Err(DemoError::MissingMesh(sphere.mesh)));
    }
}
