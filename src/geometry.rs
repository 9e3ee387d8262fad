//! Hard-coded primitive geometry for the demo scene.
//!
//! Vertex data lives in static constant tables (a textured unit cube, a
//! ground plane, a skybox cube, and a fullscreen quad) with
//! `bytemuck`-castable vertex types so the tables upload to GPU vertex
//! buffers directly.

use bytemuck::{Pod, Zeroable};

/// Vertex with position, normal, and texture coordinates (lit meshes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x2, // uv
    ];

    /// Vertex buffer layout matching the lit-mesh shader inputs.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Position-only vertex (skybox cube).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PositionVertex {
    /// Object-space position.
    pub position: [f32; 3],
}

impl PositionVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] =
        wgpu::vertex_attr_array![0 => Float32x3];

    /// Vertex buffer layout matching the skybox shader inputs.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// 2D position + texture coordinates (fullscreen quad).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    /// Normalized-device-coordinate position.
    pub position: [f32; 2],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

impl QuadVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    /// Vertex buffer layout matching the debug-quad shader inputs.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

const fn mesh_vertex(
    position: [f32; 3],
    normal: [f32; 3],
    uv: [f32; 2],
) -> MeshVertex {
    MeshVertex {
        position,
        normal,
        uv,
    }
}

/// Textured unit cube centered at the origin, spanning `[-0.5, 0.5]` on
/// every axis. Two counter-clockwise triangles per face, outward normals.
#[rustfmt::skip]
pub const CUBE_VERTICES: [MeshVertex; 36] = [
    // -Z face
    mesh_vertex([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
    mesh_vertex([ 0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 0.0]),
    mesh_vertex([ 0.5,  0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
    mesh_vertex([ 0.5,  0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
    mesh_vertex([-0.5,  0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 1.0]),
    mesh_vertex([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
    // +Z face
    mesh_vertex([-0.5, -0.5,  0.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
    mesh_vertex([ 0.5, -0.5,  0.5], [0.0, 0.0, 1.0], [1.0, 0.0]),
    mesh_vertex([ 0.5,  0.5,  0.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
    mesh_vertex([ 0.5,  0.5,  0.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
    mesh_vertex([-0.5,  0.5,  0.5], [0.0, 0.0, 1.0], [0.0, 1.0]),
    mesh_vertex([-0.5, -0.5,  0.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
    // -X face
    mesh_vertex([-0.5,  0.5,  0.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    mesh_vertex([-0.5,  0.5, -0.5], [-1.0, 0.0, 0.0], [1.0, 1.0]),
    mesh_vertex([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    mesh_vertex([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    mesh_vertex([-0.5, -0.5,  0.5], [-1.0, 0.0, 0.0], [0.0, 0.0]),
    mesh_vertex([-0.5,  0.5,  0.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    // +X face
    mesh_vertex([ 0.5,  0.5,  0.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
    mesh_vertex([ 0.5,  0.5, -0.5], [1.0, 0.0, 0.0], [1.0, 1.0]),
    mesh_vertex([ 0.5, -0.5, -0.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
    mesh_vertex([ 0.5, -0.5, -0.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
    mesh_vertex([ 0.5, -0.5,  0.5], [1.0, 0.0, 0.0], [0.0, 0.0]),
    mesh_vertex([ 0.5,  0.5,  0.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
    // -Y face
    mesh_vertex([-0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
    mesh_vertex([ 0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [1.0, 1.0]),
    mesh_vertex([ 0.5, -0.5,  0.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
    mesh_vertex([ 0.5, -0.5,  0.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
    mesh_vertex([-0.5, -0.5,  0.5], [0.0, -1.0, 0.0], [0.0, 0.0]),
    mesh_vertex([-0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
    // +Y face
    mesh_vertex([-0.5,  0.5, -0.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
    mesh_vertex([ 0.5,  0.5, -0.5], [0.0, 1.0, 0.0], [1.0, 1.0]),
    mesh_vertex([ 0.5,  0.5,  0.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
    mesh_vertex([ 0.5,  0.5,  0.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
    mesh_vertex([-0.5,  0.5,  0.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
    mesh_vertex([-0.5,  0.5, -0.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
];

/// Ground plane at `y = -0.5` spanning `[-10, 10]` in x/z, facing +Y, with
/// tiled texture coordinates.
#[rustfmt::skip]
pub const PLANE_VERTICES: [MeshVertex; 6] = [
    mesh_vertex([ 10.0, -0.5,  10.0], [0.0, 1.0, 0.0], [10.0,  0.0]),
    mesh_vertex([-10.0, -0.5,  10.0], [0.0, 1.0, 0.0], [ 0.0,  0.0]),
    mesh_vertex([-10.0, -0.5, -10.0], [0.0, 1.0, 0.0], [ 0.0, 10.0]),

    mesh_vertex([ 10.0, -0.5,  10.0], [0.0, 1.0, 0.0], [10.0,  0.0]),
    mesh_vertex([-10.0, -0.5, -10.0], [0.0, 1.0, 0.0], [ 0.0, 10.0]),
    mesh_vertex([ 10.0, -0.5, -10.0], [0.0, 1.0, 0.0], [10.0, 10.0]),
];

/// Skybox cube spanning `[-1, 1]`, wound to face inward. Positions double
/// as cubemap sampling directions.
#[rustfmt::skip]
pub const SKYBOX_VERTICES: [PositionVertex; 36] = [
    PositionVertex { position: [-1.0,  1.0, -1.0] },
    PositionVertex { position: [-1.0, -1.0, -1.0] },
    PositionVertex { position: [ 1.0, -1.0, -1.0] },
    PositionVertex { position: [ 1.0, -1.0, -1.0] },
    PositionVertex { position: [ 1.0,  1.0, -1.0] },
    PositionVertex { position: [-1.0,  1.0, -1.0] },

    PositionVertex { position: [-1.0, -1.0,  1.0] },
    PositionVertex { position: [-1.0, -1.0, -1.0] },
    PositionVertex { position: [-1.0,  1.0, -1.0] },
    PositionVertex { position: [-1.0,  1.0, -1.0] },
    PositionVertex { position: [-1.0,  1.0,  1.0] },
    PositionVertex { position: [-1.0, -1.0,  1.0] },

    PositionVertex { position: [ 1.0, -1.0, -1.0] },
    PositionVertex { position: [ 1.0, -1.0,  1.0] },
    PositionVertex { position: [ 1.0,  1.0,  1.0] },
    PositionVertex { position: [ 1.0,  1.0,  1.0] },
    PositionVertex { position: [ 1.0,  1.0, -1.0] },
    PositionVertex { position: [ 1.0, -1.0, -1.0] },

    PositionVertex { position: [-1.0, -1.0,  1.0] },
    PositionVertex { position: [-1.0,  1.0,  1.0] },
    PositionVertex { position: [ 1.0,  1.0,  1.0] },
    PositionVertex { position: [ 1.0,  1.0,  1.0] },
    PositionVertex { position: [ 1.0, -1.0,  1.0] },
    PositionVertex { position: [-1.0, -1.0,  1.0] },

    PositionVertex { position: [-1.0,  1.0, -1.0] },
    PositionVertex { position: [ 1.0,  1.0, -1.0] },
    PositionVertex { position: [ 1.0,  1.0,  1.0] },
    PositionVertex { position: [ 1.0,  1.0,  1.0] },
    PositionVertex { position: [-1.0,  1.0,  1.0] },
    PositionVertex { position: [-1.0,  1.0, -1.0] },

    PositionVertex { position: [-1.0, -1.0, -1.0] },
    PositionVertex { position: [-1.0, -1.0,  1.0] },
    PositionVertex { position: [ 1.0, -1.0, -1.0] },
    PositionVertex { position: [ 1.0, -1.0, -1.0] },
    PositionVertex { position: [-1.0, -1.0,  1.0] },
    PositionVertex { position: [ 1.0, -1.0,  1.0] },
];

/// Fullscreen quad as a four-vertex triangle strip.
#[rustfmt::skip]
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { position: [-1.0,  1.0], uv: [0.0, 1.0] },
    QuadVertex { position: [-1.0, -1.0], uv: [0.0, 0.0] },
    QuadVertex { position: [ 1.0,  1.0], uv: [1.0, 1.0] },
    QuadVertex { position: [ 1.0, -1.0], uv: [1.0, 0.0] },
];

/// [`CUBE_VERTICES`] with positions remapped from `[-0.5, 0.5]` to
/// `[-1, 1]`; normals and texture coordinates are unchanged.
#[must_use]
pub fn cube_vertices_ndc() -> [MeshVertex; 36] {
    let mut vertices = CUBE_VERTICES;
    for v in &mut vertices {
        v.position[0] *= 2.0;
        v.position[1] *= 2.0;
        v.position[2] *= 2.0;
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_strides_match_attribute_layouts() {
        assert_eq!(size_of::<MeshVertex>(), 8 * 4);
        assert_eq!(size_of::<PositionVertex>(), 3 * 4);
        assert_eq!(size_of::<QuadVertex>(), 4 * 4);
        assert_eq!(
            MeshVertex::layout().array_stride,
            size_of::<MeshVertex>() as wgpu::BufferAddress
        );
    }

    #[test]
    fn cube_has_unit_extent_and_unit_normals() {
        for v in &CUBE_VERTICES {
            for p in v.position {
                assert!(p == 0.5 || p == -0.5);
            }
            let [x, y, z] = v.normal;
            assert_eq!(x * x + y * y + z * z, 1.0);
        }
    }

    #[test]
    fn ndc_cube_doubles_positions_only() {
        let ndc = cube_vertices_ndc();
        for (scaled, original) in ndc.iter().zip(&CUBE_VERTICES) {
            for (a, b) in scaled.position.iter().zip(&original.position) {
                assert_eq!(*a, b * 2.0);
            }
            assert_eq!(scaled.normal, original.normal);
            assert_eq!(scaled.uv, original.uv);
        }
    }

    #[test]
    fn plane_faces_up() {
        for v in &PLANE_VERTICES {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
            assert_eq!(v.position[1], -0.5);
        }
    }

    #[test]
    fn table_sizes_match_draw_counts() {
        assert_eq!(CUBE_VERTICES.len(), 36);
        assert_eq!(SKYBOX_VERTICES.len(), 36);
        assert_eq!(PLANE_VERTICES.len(), 6);
        assert_eq!(QUAD_VERTICES.len(), 4);
    }
}
