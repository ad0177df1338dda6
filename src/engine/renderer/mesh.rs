// Unit geometry generation and GPU mesh buffers

use glam::Vec3;
use std::f32::consts::PI;
use wgpu::util::DeviceExt;

use super::scene::Geometry;
use super::vertex::Vertex;

const SPHERE_STACKS: usize = 16;
const SPHERE_SECTORS: usize = 32;

/// Kind of unit mesh a geometry is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshKind {
    Cube,
    Sphere,
    Plane,
}

impl MeshKind {
    pub const ALL: [MeshKind; 3] = [MeshKind::Cube, MeshKind::Sphere, MeshKind::Plane];

    pub fn of(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Box { .. } => MeshKind::Cube,
            Geometry::Sphere { .. } => MeshKind::Sphere,
            Geometry::Plane { .. } => MeshKind::Plane,
        }
    }

    /// CPU-side vertices and indices of the unit mesh
    pub fn build(self) -> (Vec<Vertex>, Vec<u16>) {
        match self {
            MeshKind::Cube => unit_cube(),
            MeshKind::Sphere => unit_sphere(SPHERE_STACKS, SPHERE_SECTORS),
            MeshKind::Plane => unit_plane(),
        }
    }
}

/// Cube of side 1 centered at the origin, 4 vertices per face
pub fn unit_cube() -> (Vec<Vertex>, Vec<u16>) {
    // (normal, u axis, v axis) per face
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let base = vertices.len() as u16;
        let center = normal * 0.5;
        for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            vertices.push(Vertex::new(center + u * su + v * sv, normal));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

/// UV sphere of radius 1, Y up
pub fn unit_sphere(stacks: usize, sectors: usize) -> (Vec<Vertex>, Vec<u16>) {
    let mut vertices = Vec::with_capacity((stacks + 1) * (sectors + 1));
    let mut indices = Vec::with_capacity(stacks * sectors * 6);

    for i in 0..=stacks {
        // from +pi/2 (top) to -pi/2 (bottom)
        let stack_angle = PI / 2.0 - i as f32 * PI / stacks as f32;
        let ring = stack_angle.cos();
        let y = stack_angle.sin();

        for j in 0..=sectors {
            let sector_angle = j as f32 * 2.0 * PI / sectors as f32;
            let position = Vec3::new(ring * sector_angle.cos(), y, ring * sector_angle.sin());
            vertices.push(Vertex::new(position, position.normalize_or_zero()));
        }
    }

    for i in 0..stacks {
        let k1 = i * (sectors + 1);
        let k2 = k1 + sectors + 1;

        for j in 0..sectors {
            let (a, b, c, d) = (
                (k1 + j) as u16,
                (k2 + j) as u16,
                (k1 + j + 1) as u16,
                (k2 + j + 1) as u16,
            );

            if i != 0 {
                indices.extend_from_slice(&[a, c, b]);
            }
            if i != stacks - 1 {
                indices.extend_from_slice(&[c, d, b]);
            }
        }
    }

    (vertices, indices)
}

/// Square of side 1 in the XY plane, facing +Z
pub fn unit_plane() -> (Vec<Vertex>, Vec<u16>) {
    let vertices = vec![
        Vertex::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::Z),
        Vertex::new(Vec3::new(0.5, -0.5, 0.0), Vec3::Z),
        Vertex::new(Vec3::new(0.5, 0.5, 0.0), Vec3::Z),
        Vertex::new(Vec3::new(-0.5, 0.5, 0.0), Vec3::Z),
    ];
    (vertices, vec![0, 1, 2, 0, 2, 3])
}

/// Unit mesh uploaded to the GPU
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, kind: MeshKind) -> Self {
        let (vertices, indices) = kind.build();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", kind)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", kind)),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_indices_in_range(vertices: &[Vertex], indices: &[u16]) {
        assert_eq!(indices.len() % 3, 0);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn test_unit_cube() {
        let (vertices, indices) = unit_cube();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        assert_indices_in_range(&vertices, &indices);
        for v in &vertices {
            assert!(v.position.iter().all(|c| c.abs() <= 0.5 + f32::EPSILON));
        }
    }

    #[test]
    fn test_unit_sphere_on_surface() {
        let (vertices, indices) = unit_sphere(8, 16);
        assert_indices_in_range(&vertices, &indices);
        for v in &vertices {
            let length = Vec3::from_array(v.position).length();
            assert!((length - 1.0).abs() < 1e-5);
        }
        // two triangles per quad, minus one at each pole ring
        assert_eq!(indices.len(), (2 * 8 - 2) * 16 * 3);
    }

    #[test]
    fn test_mesh_kind_of_geometry() {
        assert_eq!(MeshKind::of(&Geometry::Sphere { radius: 2.0 }), MeshKind::Sphere);
        assert_eq!(
            MeshKind::of(&Geometry::Plane {
                width: 1.0,
                height: 1.0
            }),
            MeshKind::Plane
        );
    }
}
