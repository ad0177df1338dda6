use rapier3d::prelude::*;

use super::material::{ContactMaterial, ContactMaterialTable, PhysicsMaterial};

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector
    gravity: Vector<Real>,

    /// Whether resting bodies may be put to sleep
    allow_sleep: bool,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection (sweep and prune)
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Materials and contact rules, consulted as physics hooks
    contact_materials: ContactMaterialTable,

    /// Number of steps taken so far
    step_count: u64,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.82, 0.0])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            allow_sleep: true,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            contact_materials: ContactMaterialTable::new(),
            step_count: 0,
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &self.contact_materials,
            &(),
        );
        self.step_count += 1;
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Replace the accumulated force on a body with `force`, applied at its
    /// center of mass for the next step. Returns false for unknown handles.
    pub fn set_constant_force(&mut self, handle: RigidBodyHandle, force: Vector<Real>) -> bool {
        match self.rigid_body_set.get_mut(handle) {
            Some(body) => {
                body.reset_forces(false);
                body.add_force(force, true);
                true
            }
            None => false,
        }
    }

    /// Register a new physics material
    pub fn create_material(
        &mut self,
        name: &'static str,
        friction: Real,
        restitution: Real,
    ) -> PhysicsMaterial {
        self.contact_materials
            .create_material(name, friction, restitution)
    }

    /// Register a friction/restitution rule between two materials
    pub fn add_contact_material(&mut self, contact: ContactMaterial) {
        self.contact_materials.add_contact_material(contact);
    }

    /// Registered materials and contact rules
    pub fn contact_materials(&self) -> &ContactMaterialTable {
        &self.contact_materials
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    /// Allow or forbid sleeping for bodies created from now on
    pub fn set_allow_sleep(&mut self, allow_sleep: bool) {
        self.allow_sleep = allow_sleep;
    }

    /// Whether newly created bodies may sleep
    pub fn allow_sleep(&self) -> bool {
        self.allow_sleep
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }

    /// Number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Number of steps taken so far
    pub fn step_count(&self) -> u64 {
        self.step_count
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
