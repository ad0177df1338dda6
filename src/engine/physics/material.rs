use rapier3d::prelude::*;
use std::collections::HashMap;

/// Identifier of a physics material
///
/// Stored in the collider's user data so the contact hooks can find the
/// material of both colliders in a pair. Zero is reserved for "no material".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaterialId(u32);

impl MaterialId {
    /// Encode into collider user data
    pub fn to_user_data(self) -> u128 {
        self.0 as u128
    }

    /// Decode from collider user data
    pub fn from_user_data(data: u128) -> Option<Self> {
        match data {
            0 => None,
            id => u32::try_from(id).ok().map(Self),
        }
    }
}

/// Surface properties of a collider when no contact rule matches
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsMaterial {
    pub id: MaterialId,
    pub name: &'static str,
    pub friction: Real,
    pub restitution: Real,
}

/// Friction/restitution rule for contacts between two specific materials
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactMaterial {
    pub first: MaterialId,
    pub second: MaterialId,
    pub friction: Real,
    pub restitution: Real,
}

impl ContactMaterial {
    pub fn new(first: MaterialId, second: MaterialId, friction: Real, restitution: Real) -> Self {
        Self {
            first,
            second,
            friction,
            restitution,
        }
    }

    fn key(&self) -> (MaterialId, MaterialId) {
        pair_key(self.first, self.second)
    }
}

fn pair_key(a: MaterialId, b: MaterialId) -> (MaterialId, MaterialId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Registered materials and contact rules
///
/// Implements rapier's `PhysicsHooks`: colliders built with a material get
/// `ActiveHooks::MODIFY_SOLVER_CONTACTS`, and for every solver contact between
/// two materials with a registered rule the rule's coefficients replace the
/// combined per-collider ones.
#[derive(Debug, Default)]
pub struct ContactMaterialTable {
    materials: Vec<PhysicsMaterial>,
    rules: HashMap<(MaterialId, MaterialId), ContactMaterial>,
}

impl ContactMaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new material and return its id
    pub fn create_material(
        &mut self,
        name: &'static str,
        friction: Real,
        restitution: Real,
    ) -> PhysicsMaterial {
        let id = MaterialId(self.materials.len() as u32 + 1);
        let material = PhysicsMaterial {
            id,
            name,
            friction,
            restitution,
        };
        self.materials.push(material.clone());
        material
    }

    /// Look up a registered material
    #[cfg(test)]
    pub fn material(&self, id: MaterialId) -> Option<&PhysicsMaterial> {
        self.materials.get((id.0 as usize).checked_sub(1)?)
    }

    /// Register (or replace) the rule for a material pair
    pub fn add_contact_material(&mut self, contact: ContactMaterial) {
        if let Some(previous) = self.rules.insert(contact.key(), contact) {
            log::warn!(
                "Contact material between {:?} and {:?} replaced",
                previous.first,
                previous.second
            );
        }
    }

    /// Find the rule for a pair, in either order
    pub fn lookup(&self, a: MaterialId, b: MaterialId) -> Option<&ContactMaterial> {
        self.rules.get(&pair_key(a, b))
    }

    /// Number of registered contact rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    fn rule_for_colliders(&self, c1: &Collider, c2: &Collider) -> Option<&ContactMaterial> {
        let m1 = MaterialId::from_user_data(c1.user_data)?;
        let m2 = MaterialId::from_user_data(c2.user_data)?;
        self.lookup(m1, m2)
    }
}

impl PhysicsHooks for ContactMaterialTable {
    fn modify_solver_contacts(&self, context: &mut ContactModificationContext) {
        let (Some(c1), Some(c2)) = (
            context.colliders.get(context.collider1),
            context.colliders.get(context.collider2),
        ) else {
            return;
        };

        if let Some(rule) = self.rule_for_colliders(c1, c2) {
            for contact in context.solver_contacts.iter_mut() {
                contact.friction = rule.friction;
                contact.restitution = rule.restitution;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_ids_are_distinct_and_non_zero() {
        let mut table = ContactMaterialTable::new();
        let floor = table.create_material("floor", 0.3, 0.0);
        let sphere = table.create_material("sphere", 0.3, 0.0);

        assert_ne!(floor.id, sphere.id);
        assert_ne!(floor.id.to_user_data(), 0);
        assert_eq!(table.material(sphere.id).map(|m| m.name), Some("sphere"));
    }

    #[test]
    fn test_user_data_round_trip() {
        assert_eq!(MaterialId::from_user_data(0), None);
        let id = MaterialId(7);
        assert_eq!(MaterialId::from_user_data(id.to_user_data()), Some(id));
    }

    #[test]
    fn test_lookup_is_order_independent() {
        let mut table = ContactMaterialTable::new();
        let floor = table.create_material("floor", 0.3, 0.0);
        let sphere = table.create_material("sphere", 0.3, 0.0);
        table.add_contact_material(ContactMaterial::new(floor.id, sphere.id, 0.1, 0.5));

        let forward = table.lookup(floor.id, sphere.id).copied();
        let backward = table.lookup(sphere.id, floor.id).copied();
        assert_eq!(forward, backward);
        assert_eq!(forward.map(|c| c.restitution), Some(0.5));
        assert!(table.lookup(floor.id, floor.id).is_none());
    }

    #[test]
    fn test_replacing_rule_keeps_one_entry() {
        let mut table = ContactMaterialTable::new();
        let a = table.create_material("a", 0.3, 0.0);
        let b = table.create_material("b", 0.3, 0.0);
        table.add_contact_material(ContactMaterial::new(a.id, b.id, 0.1, 0.5));
        table.add_contact_material(ContactMaterial::new(b.id, a.id, 0.9, 0.1));

        assert_eq!(table.rule_count(), 1);
        assert_eq!(table.lookup(a.id, b.id).map(|c| c.friction), Some(0.9));
    }
}
