//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the vertex format produced by the mesh builder and a
//! backend-neutral description of its attribute layout, which the rendering
//! collaborator uses when it uploads the buffers.

use cgmath::Point3;

/// Number of `f32` values in one vertex.
pub const FLOATS_PER_VERTEX: usize = 5;

/// A vertex in the voxel rendering pipeline.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Texture Coordinates: 2x f32 (8 bytes)
///
/// Total size: 20 bytes, no padding, so a vertex slice can be viewed as a flat
/// `f32` slice with a stride of [`FLOATS_PER_VERTEX`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk-local space
    pub position: [f32; 3],
    /// UV texture coordinates, each corner of a quad is one of (0,0),(1,0),(1,1),(0,1)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex at an integer lattice point.
    ///
    /// # Arguments
    /// * `pos` - Corner of the voxel the vertex sits on
    /// * `u` - U texture coordinate
    /// * `v` - V texture coordinate
    pub fn new(pos: Point3<u32>, u: f32, v: f32) -> Self {
        Vertex {
            position: [pos.x as f32, pos.y as f32, pos.z as f32],
            tex_coords: [u, v],
        }
    }

    /// Returns the vertex layout description for the shader pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: tex_coords (vec2<f32>)
    pub fn desc() -> VertexLayout {
        VertexLayout {
            stride: std::mem::size_of::<Vertex>(),
            attributes: &VERTEX_ATTRIBUTES,
        }
    }
}

static VERTEX_ATTRIBUTES: [VertexAttribute; 2] = [
    VertexAttribute {
        location: 0,
        components: 3,
        offset: 0,
    },
    VertexAttribute {
        location: 1,
        components: 2,
        offset: std::mem::size_of::<[f32; 3]>(),
    },
];

/// One float attribute inside an interleaved vertex.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location
    pub location: u32,
    /// Number of `f32` components
    pub components: usize,
    /// Byte offset from the start of the vertex
    pub offset: usize,
}

/// Stride and attributes of an interleaved vertex buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexLayout {
    /// Size of one vertex in bytes
    pub stride: usize,
    /// Attributes in location order
    pub attributes: &'static [VertexAttribute],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_five_float_stride() {
        let layout = Vertex::desc();
        assert_eq!(layout.stride, FLOATS_PER_VERTEX * std::mem::size_of::<f32>());
        let components: usize = layout.attributes.iter().map(|a| a.components).sum();
        assert_eq!(components, FLOATS_PER_VERTEX);
        assert_eq!(layout.attributes[1].offset, 12);
    }

    #[test]
    fn vertices_cast_to_flat_floats() {
        let vertices = [
            Vertex::new(Point3::new(1, 2, 3), 0.0, 1.0),
            Vertex::new(Point3::new(4, 5, 6), 1.0, 0.0),
        ];
        let floats: &[f32] = bytemuck::cast_slice(&vertices);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 1.0, 0.0]);
    }
}
