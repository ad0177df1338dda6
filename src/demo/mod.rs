// Demo logic: bodies paired with meshes, spawning, forces and the frame driver

mod builder;
pub mod forces;
pub mod registry;
pub mod simulation;
pub mod spawner;
pub mod sync;

pub use registry::{BodyKind, BodyRegistry, WorldObject};
pub use simulation::Simulation;

use crate::engine::physics::RigidBodyHandle;
use crate::engine::renderer::MeshHandle;

/// Errors raised while driving the simulation
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DemoError {
    #[error("Rigid body {0:?} is not in the physics world")]
    MissingBody(RigidBodyHandle),

    #[error("Mesh {0:?} is not in the scene")]
    MissingMesh(MeshHandle),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_error_display() {
        let err = DemoError::MissingBody(RigidBodyHandle::invalid());
        assert!(err.to_string().starts_with("Rigid body"));
    }
}
