// Registry pairing each visual mesh with its physics body

use crate::engine::physics::RigidBodyHandle;
use crate::engine::renderer::MeshHandle;

/// What a registered body is, and therefore which per-kind behaviour applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Static ground box
    Floor,
    /// Spawned dynamic sphere, pushed every tick
    Sphere,
}

/// A mesh and the body that drives it
///
/// Neither handle is owned here: the mesh lives in the scene, the body in the
/// physics world. State flows one way, from body to mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldObject {
    pub mesh: MeshHandle,
    pub body: RigidBodyHandle,
    pub kind: BodyKind,
}

/// Ordered list of world objects; entries are never removed
#[derive(Debug, Default)]
pub struct BodyRegistry {
    objects: Vec<WorldObject>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object; registration order is iteration order
    pub fn register(&mut self, object: WorldObject) {
        self.objects.push(object);
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorldObject> {
        self.objects.iter()
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&WorldObject> {
        self.objects.get(index)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of objects of a given kind
    pub fn count_of(&self, kind: BodyKind) -> usize {
        self.objects.iter().filter(|o| o.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::{Geometry, Mesh, MeshMaterial, Scene};
    use rapier3d::prelude::{RigidBodyBuilder, RigidBodySet};

    #[test]
    fn test_registry_keeps_order_and_counts_kinds() {
        let mut scene = Scene::new();
        let mut bodies = RigidBodySet::new();
        let mut registry = BodyRegistry::new();
        assert!(registry.is_empty());

        for kind in [BodyKind::Floor, BodyKind::Sphere, BodyKind::Sphere] {
            let mesh = scene.add_mesh(Mesh::new(
                Geometry::Sphere { radius: 0.5 },
                MeshMaterial::standard([1.0; 4]),
            ));
            let body = bodies.insert(RigidBodyBuilder::dynamic().build());
            registry.register(WorldObject { mesh, body, kind });
        }

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.count_of(BodyKind::Sphere), 2);
        assert_eq!(registry.count_of(BodyKind::Floor), 1);
        assert_eq!(registry.get(0).map(|o| o.kind), Some(BodyKind::Floor));
        let meshes: Vec<usize> = registry.iter().map(|o| o.mesh.index()).collect();
        assert_eq!(meshes, vec![0, 1, 2]);
    }
}
