// Vertex and instance layouts for mesh rendering

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use super::scene::{Mesh, Shading};

/// Vertex for lit mesh rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in local space
    pub position: [f32; 3],
    /// Outward surface normal
    pub normal: [f32; 3],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }

    /// Get the vertex buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Per-instance data: model matrix, colour and shading flags
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x = lit (0 or 1), y = receives shadow (0 or 1)
    pub flags: [f32; 4],
}

impl InstanceRaw {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self::new(
            mesh.model_matrix(),
            mesh.material.color,
            mesh.material.shading == Shading::Standard,
            mesh.receive_shadow,
        )
    }

    pub fn new(model: Mat4, color: [f32; 4], lit: bool, receive_shadow: bool) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            flags: [
                if lit { 1.0 } else { 0.0 },
                if receive_shadow { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }

    /// Get the instance buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4,
            7 => Float32x4,
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::scene::{Geometry, MeshMaterial};

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 96);
    }

    #[test]
    fn test_instance_flags() {
        let lit = Mesh::new(Geometry::Sphere { radius: 1.0 }, MeshMaterial::standard([1.0; 4]))
            .with_receive_shadow(true);
        let unlit = Mesh::new(Geometry::Sphere { radius: 1.0 }, MeshMaterial::unlit([1.0; 4]));

        assert_eq!(InstanceRaw::from_mesh(&lit).flags[..2], [1.0, 1.0]);
        assert_eq!(InstanceRaw::from_mesh(&unlit).flags[..2], [0.0, 0.0]);
    }
}
