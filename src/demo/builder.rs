// Scene construction: the floor, spheres, light and marker

use rapier3d::prelude::{Collider, RigidBody};

use super::{BodyKind, Simulation, WorldObject};
use crate::core::config::rgba;
use crate::core::math::{to_quat, to_vec3, to_vector};
use crate::engine::physics::presets;
use crate::engine::renderer::{DirectionalLight, Geometry, Mesh, MeshHandle, MeshMaterial};

impl Simulation {
    /// White shadow-casting directional light above the origin
    pub fn create_light(&mut self) {
        let config = &self.scene_config;
        let mut light = DirectionalLight::new(config.light_position, rgba(config.light_color));
        light.cast_shadow = config.shadows;
        self.scene.set_light(light);
    }

    /// Static floor box centred on the origin
    pub fn create_floor(&mut self) -> WorldObject {
        let size = self.scene_config.floor_size;
        let mesh = Mesh::new(
            Geometry::Box {
                width: size.x,
                height: size.y,
                depth: size.z,
            },
            MeshMaterial::standard(rgba(self.scene_config.floor_color)),
        )
        .with_receive_shadow(true);

        let body = presets::floor_body(0.0, 0.0, 0.0);
        let collider = presets::floor_collider(size.x, size.y, size.z, &self.materials.floor);
        self.register(mesh, body, collider, BodyKind::Floor)
    }

    /// Dynamic sphere at the spawn point
    pub fn create_sphere(&mut self) -> WorldObject {
        let config = &self.scene_config;
        let radius = config.sphere_radius;
        let mesh = Mesh::new(
            Geometry::Sphere { radius },
            MeshMaterial::standard(rgba(config.sphere_color)),
        )
        .with_cast_shadow(true);

        let physics = &self.physics_config;
        let body = presets::sphere_body(
            to_vector(config.sphere_spawn_point),
            self.world.allow_sleep(),
            physics.linear_damping,
            physics.angular_damping,
        );
        let collider = presets::sphere_collider(radius, config.sphere_mass, &self.materials.sphere);
        self.register(mesh, body, collider, BodyKind::Sphere)
    }

    /// Unlit 1x1 plane at the origin; visual only
    pub fn create_marker_plane(&mut self) -> MeshHandle {
        let mesh = Mesh::new(
            Geometry::Plane {
                width: 1.0,
                height: 1.0,
            },
            MeshMaterial::unlit(rgba(self.scene_config.marker_color)),
        );
        self.scene.add_mesh(mesh)
    }

    fn register(
        &mut self,
        mut mesh: Mesh,
        body: RigidBody,
        collider: Collider,
        kind: BodyKind,
    ) -> WorldObject {
        // Meshes start where their body is, before the first tick
        mesh.position = to_vec3(body.translation());
        mesh.rotation = to_quat(body.rotation());

        let body = self.world.add_rigid_body(body);
        self.world.add_collider(collider, body);
        let mesh = self.scene.add_mesh(mesh);

        let object = WorldObject { mesh, body, kind };
        self.registry.register(object);
        object
    }
}
