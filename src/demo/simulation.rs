// Simulation context: the physics world, the scene and the registry tying
// them together

use std::time::Duration;

use log::{debug, info};

use super::forces::ForceApplicator;
use super::spawner::Spawner;
use super::sync::copy_transform;
use super::{BodyRegistry, DemoError};
use crate::core::config::{rgba, DemoConfig, PhysicsConfig, SceneConfig};
use crate::core::math::to_vector;
use crate::engine::physics::{ContactMaterial, PhysicsMaterial, PhysicsWorld};
use crate::engine::renderer::Scene;

/// Per-collider coefficients used when no contact rule matches
const DEFAULT_FRICTION: f32 = 0.3;
const DEFAULT_RESTITUTION: f32 = 0.0;

/// Physics materials shared by every floor and sphere collider
#[derive(Debug, Clone)]
pub(super) struct SceneMaterials {
    pub floor: PhysicsMaterial,
    pub sphere: PhysicsMaterial,
}

/// Everything one running demo owns
pub struct Simulation {
    pub(super) world: PhysicsWorld,
    pub(super) scene: Scene,
    pub(super) registry: BodyRegistry,
    pub(super) materials: SceneMaterials,
    pub(super) scene_config: SceneConfig,
    pub(super) physics_config: PhysicsConfig,
    forces: ForceApplicator,
    spawner: Spawner,
}

impl Simulation {
    /// Create an empty world and scene from a validated configuration.
    ///
    /// Nothing is placed in the scene yet; call `setup` for the full demo.
    pub fn new(config: &DemoConfig) -> Self {
        let physics = &config.physics;
        let mut world = PhysicsWorld::with_gravity(to_vector(physics.gravity));
        world.set_timestep(physics.timestep);
        world.set_allow_sleep(physics.allow_sleep);

        let floor = world.create_material("floor", DEFAULT_FRICTION, DEFAULT_RESTITUTION);
        let sphere = world.create_material("sphere", DEFAULT_FRICTION, DEFAULT_RESTITUTION);
        world.add_contact_material(ContactMaterial::new(
            floor.id,
            sphere.id,
            config.scene.contact_friction,
            config.scene.contact_restitution,
        ));

        info!(
            "Physics world: gravity {:?}, timestep {:.4}s, {} contact rules",
            world.gravity(),
            world.timestep(),
            world.contact_materials().rule_count()
        );

        let mut scene = Scene::new();
        scene.set_clear_color(rgba(config.scene.clear_color));

        Self {
            world,
            scene,
            registry: BodyRegistry::new(),
            materials: SceneMaterials { floor, sphere },
            scene_config: config.scene.clone(),
            physics_config: physics.clone(),
            forces: ForceApplicator::new(config.scene.push_force),
            spawner: Spawner::new(config.spawn.period),
        }
    }

    /// Place the light, floor and marker, then start spawning spheres
    pub fn setup(&mut self) {
        self.create_light();
        self.create_floor();
        self.create_marker_plane();
        self.spawner.start();
        info!(
            "Scene ready: {} meshes, {} bodies",
            self.scene.mesh_count(),
            self.world.body_count()
        );
    }

    /// Advance physics by one fixed step, then push forces and copy every
    /// body transform onto its mesh, in registry order.
    pub fn tick(&mut self) -> Result<(), DemoError> {
        self.world.step();
        for object in self.registry.iter() {
            self.forces.apply(&mut self.world, object)?;
            copy_transform(&self.world, &mut self.scene, object)?;
        }
        Ok(())
    }

    /// Feed elapsed time to the spawner and create one sphere per completed
    /// period. Returns the number of spheres created.
    pub fn advance_spawner(&mut self, elapsed: Duration) -> u64 {
        let count = self.spawner.advance(elapsed);
        for _ in 0..count {
            self.create_sphere();
            debug!("Spawned sphere, {} objects registered", self.registry.len());
        }
        count
    }

    /// Stop spawning; existing spheres keep simulating
    pub fn stop_spawner(&mut self) {
        self.spawner.stop();
    }

    /// Time until the next sphere is due, if spawning
    pub fn until_next_spawn(&self) -> Option<Duration> {
        self.spawner.until_next()
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }
}
