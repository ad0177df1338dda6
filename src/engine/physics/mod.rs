// Physics system using rapier3d

pub mod body;
mod material;
mod world;

pub use body::{presets, RigidBodyHandle};
pub use material::{ContactMaterial, PhysicsMaterial};
pub use world::PhysicsWorld;
