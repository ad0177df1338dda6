// Scene graph: meshes, a directional light and the clear colour
//
// The scene is plain data. It is filled by the demo code and read by the
// renderer; nothing here talks to the GPU.

use glam::{Mat4, Quat, Vec3};

/// Index of a mesh inside a `Scene`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(usize);

impl MeshHandle {
    #[cfg(test)]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Shape of a mesh, in local units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Axis-aligned box with full extents
    Box { width: f32, height: f32, depth: f32 },
    /// UV sphere
    Sphere { radius: f32 },
    /// Plane in the local XY plane facing +Z
    Plane { width: f32, height: f32 },
}

impl Geometry {
    /// Scale applied to the unit mesh of this geometry kind
    pub fn scale(&self) -> Vec3 {
        match *self {
            Geometry::Box {
                width,
                height,
                depth,
            } => Vec3::new(width, height, depth),
            Geometry::Sphere { radius } => Vec3::splat(radius),
            Geometry::Plane { width, height } => Vec3::new(width, height, 1.0),
        }
    }
}

/// Surface shading of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Lit by the directional light
    Standard,
    /// Flat colour, ignores lights
    Unlit,
}

/// Mesh material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshMaterial {
    pub color: [f32; 4],
    pub shading: Shading,
}

impl MeshMaterial {
    pub fn standard(color: [f32; 4]) -> Self {
        Self {
            color,
            shading: Shading::Standard,
        }
    }

    pub fn unlit(color: [f32; 4]) -> Self {
        Self {
            color,
            shading: Shading::Unlit,
        }
    }
}

/// A renderable object
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: MeshMaterial,
    pub position: Vec3,
    pub rotation: Quat,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Mesh {
    /// Create a mesh at the origin with no rotation
    pub fn new(geometry: Geometry, material: MeshMaterial) -> Self {
        Self {
            geometry,
            material,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn with_cast_shadow(mut self, cast: bool) -> Self {
        self.cast_shadow = cast;
        self
    }

    pub fn with_receive_shadow(mut self, receive: bool) -> Self {
        self.receive_shadow = receive;
        self
    }

    /// Model matrix: translation * rotation * geometry scale
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.geometry.scale(), self.rotation, self.position)
    }
}

/// Directional light shining from `position` towards `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub target: Vec3,
    pub color: [f32; 4],
    pub intensity: f32,
    pub cast_shadow: bool,
}

impl DirectionalLight {
    pub fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            color,
            intensity: 1.0,
            cast_shadow: false,
        }
    }

    /// Unit vector pointing from the light towards its target
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}

/// All meshes and lights to render
#[derive(Debug, Clone)]
pub struct Scene {
    meshes: Vec<Mesh>,
    light: Option<DirectionalLight>,
    clear_color: [f32; 4],
}

impl Scene {
    pub fn new() -> Self {
        Self {
            meshes: Vec::new(),
            light: None,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Add a mesh and return its handle
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshHandle {
        self.meshes.push(mesh);
        MeshHandle(self.meshes.len() - 1)
    }

    #[cfg(test)]
    pub fn mesh(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.meshes.get(handle.0)
    }

    pub fn mesh_mut(&mut self, handle: MeshHandle) -> Option<&mut Mesh> {
        self.meshes.get_mut(handle.0)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Set the scene light, replacing any previous one
    pub fn set_light(&mut self, light: DirectionalLight) {
        self.light = Some(light);
    }

    pub fn light(&self) -> Option<&DirectionalLight> {
        self.light.as_ref()
    }

    pub fn set_clear_color(&mut self, color: [f32; 4]) {
        self.clear_color = color;
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_mesh_returns_sequential_handles() {
        let mut scene = Scene::new();
        let material = MeshMaterial::standard([1.0; 4]);
        let a = scene.add_mesh(Mesh::new(Geometry::Sphere { radius: 0.5 }, material));
        let b = scene.add_mesh(Mesh::new(Geometry::Sphere { radius: 0.5 }, material));

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(scene.mesh_count(), 2);
    }

    #[test]
    fn test_model_matrix_applies_geometry_scale() {
        let mut mesh = Mesh::new(
            Geometry::Box {
                width: 6.0,
                height: 1.0,
                depth: 6.0,
            },
            MeshMaterial::standard([1.0; 4]),
        );
        mesh.position = Vec3::new(0.0, 2.0, 0.0);

        let corner = mesh.model_matrix().transform_point3(Vec3::splat(0.5));
        assert_eq!(corner, Vec3::new(3.0, 2.5, 3.0));
    }

    #[test]
    fn test_light_direction() {
        let light = DirectionalLight::new(Vec3::new(0.0, 10.0, 0.0), [1.0; 4]);
        assert_eq!(light.direction(), Vec3::new(0.0, -1.0, 0.0));
    }
}
