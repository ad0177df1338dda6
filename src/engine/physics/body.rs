use super::material::MaterialId;
use rapier3d::prelude::*;

pub use rapier3d::prelude::RigidBodyHandle;

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    can_sleep: bool,
    linear_damping: Real,
    angular_damping: Real,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            can_sleep: true,
            linear_damping: 0.01,
            angular_damping: 0.01,
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            can_sleep: false,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    /// Pick the body type from a mass: zero means fixed, anything else dynamic
    pub fn from_mass(mass: Real) -> Self {
        if mass == 0.0 {
            Self::new_fixed()
        } else {
            Self::new_dynamic()
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real, z: Real) -> Self {
        self.position = Isometry::translation(x, y, z);
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Set linear and angular damping
    pub fn damping(mut self, linear: Real, angular: Real) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .can_sleep(self.can_sleep)
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder3D {
    shape: SharedShape,
    friction: Real,
    restitution: Real,
    density: Option<Real>,
    mass: Option<Real>,
    material: Option<MaterialId>,
}

impl ColliderBuilder3D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            friction: 0.3,
            restitution: 0.0,
            density: Some(1.0),
            mass: None,
            material: None,
        }
    }

    /// Create a box-shaped collider from half extents
    pub fn box_shape(half_x: Real, half_y: Real, half_z: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(half_x, half_y, half_z))
    }

    /// Create a sphere-shaped collider
    pub fn ball(radius: Real) -> Self {
        Self::with_shape(SharedShape::ball(radius))
    }

    /// Set density (mass will be calculated from shape volume)
    pub fn density(mut self, density: Real) -> Self {
        self.density = Some(density);
        self.mass = None;
        self
    }

    /// Set mass directly (overrides density)
    pub fn mass(mut self, mass: Real) -> Self {
        self.mass = Some(mass);
        self.density = None;
        self
    }

    /// Attach a physics material; its contact rules apply to this collider
    pub fn material(mut self, material: &super::PhysicsMaterial) -> Self {
        self.material = Some(material.id);
        self.friction = material.friction;
        self.restitution = material.restitution;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        let mut builder = ColliderBuilder::new(self.shape)
            .friction(self.friction)
            .restitution(self.restitution);

        if let Some(material) = self.material {
            builder = builder
                .user_data(material.to_user_data())
                .active_hooks(ActiveHooks::MODIFY_SOLVER_CONTACTS);
        }

        // Set mass or density
        if let Some(mass) = self.mass {
            builder = builder.mass(mass);
        } else if let Some(density) = self.density {
            builder = builder.density(density);
        }

        builder.build()
    }
}

/// Rigid body and collider configurations used by the scene
pub mod presets {
    use super::*;
    use crate::engine::physics::PhysicsMaterial;

    /// Ground body: mass zero, so it is fixed in place
    pub fn floor_body(x: Real, y: Real, z: Real) -> RigidBody {
        BodyBuilder::from_mass(0.0).position(x, y, z).build()
    }

    /// Ground collider (box shape, massless)
    pub fn floor_collider(width: Real, height: Real, depth: Real, material: &PhysicsMaterial) -> Collider {
        ColliderBuilder3D::box_shape(width / 2.0, height / 2.0, depth / 2.0)
            .material(material)
            .density(0.0)
            .build()
    }

    /// Dynamic sphere body
    pub fn sphere_body(
        position: Vector<Real>,
        can_sleep: bool,
        linear_damping: Real,
        angular_damping: Real,
    ) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(position.x, position.y, position.z)
            .can_sleep(can_sleep)
            .damping(linear_damping, angular_damping)
            .build()
    }

    /// Sphere collider with an explicit mass
    pub fn sphere_collider(radius: Real, mass: Real, material: &PhysicsMaterial) -> Collider {
        ColliderBuilder3D::ball(radius)
            .material(material)
            .mass(mass)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::material::ContactMaterialTable;

    #[test]
    fn test_body_builder_dynamic() {
        let body = BodyBuilder::new_dynamic()
            .position(10.0, 20.0, -3.0)
            .damping(0.5, 0.25)
            .build();

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert_eq!(body.translation().x, 10.0);
        assert_eq!(body.translation().y, 20.0);
        assert_eq!(body.translation().z, -3.0);
        assert_eq!(body.linear_damping(), 0.5);
        assert_eq!(body.angular_damping(), 0.25);
    }

    #[test]
    fn test_zero_mass_is_fixed() {
        assert_eq!(BodyBuilder::from_mass(0.0).build().body_type(), RigidBodyType::Fixed);
        assert_eq!(BodyBuilder::from_mass(1.0).build().body_type(), RigidBodyType::Dynamic);
    }

    #[test]
    fn test_collider_builder_box() {
        let collider = ColliderBuilder3D::box_shape(1.0, 2.0, 3.0).build();

        assert!(!collider.is_sensor());
        assert_eq!(collider.friction(), 0.3);
        assert_eq!(collider.restitution(), 0.0);
        assert_eq!(collider.user_data, 0);
    }

    #[test]
    fn test_material_collider_enables_hooks() {
        let mut table = ContactMaterialTable::new();
        let material = table.create_material("sphere", 0.2, 0.1);
        let collider = presets::sphere_collider(0.5, 1.0, &material);

        assert_eq!(MaterialId::from_user_data(collider.user_data), Some(material.id));
        assert!(collider
            .active_hooks()
            .contains(ActiveHooks::MODIFY_SOLVER_CONTACTS));
        assert_eq!(collider.friction(), 0.2);
        assert_eq!(collider.restitution(), 0.1);
    }

    #[test]
    fn test_floor_preset_is_massless_and_fixed() {
        let mut table = ContactMaterialTable::new();
        let material = table.create_material("floor", 0.3, 0.0);
        let body = presets::floor_body(0.0, 0.0, 0.0);
        let collider = presets::floor_collider(6.0, 1.0, 6.0, &material);

        assert_eq!(body.body_type(), RigidBodyType::Fixed);
        assert_eq!(collider.mass(), 0.0);
    }
}
