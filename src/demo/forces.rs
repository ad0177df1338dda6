// Constant per-kind forces, reapplied every tick

use glam::Vec3;

use super::{BodyKind, DemoError, WorldObject};
use crate::core::math::to_vector;
use crate::engine::physics::PhysicsWorld;

/// Pushes every sphere with the same constant force
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceApplicator {
    sphere_force: Vec3,
}

impl ForceApplicator {
    pub fn new(sphere_force: Vec3) -> Self {
        Self { sphere_force }
    }

    /// Force applied to bodies of the given kind, if any
    pub fn force_for(&self, kind: BodyKind) -> Option<Vec3> {
        match kind {
            BodyKind::Sphere => Some(self.sphere_force),
            BodyKind::Floor => None,
        }
    }

    /// Replace the body's accumulated force with its kind's constant force.
    /// Kinds without a force are left untouched.
    pub fn apply(&self, world: &mut PhysicsWorld, object: &WorldObject) -> Result<(), DemoError> {
        let Some(force) = self.force_for(object.kind) else {
            return Ok(());
        };

        if world.set_constant_force(object.body, to_vector(force)) {
            Ok(())
        } else {
            Err(DemoError::MissingBody(object.body))
        }
    }
}
