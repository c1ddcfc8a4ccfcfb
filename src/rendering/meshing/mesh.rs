//! Mesh data structures and operations for voxel rendering.
//!
//! This module converts the visibility flags of a voxel grid into flat vertex
//! and index buffers. Each visible face becomes one quad: four vertices and
//! six indices. No faces are merged.

use log::trace;

use crate::rendering::vertex::{Vertex, FLOATS_PER_VERTEX};
use crate::voxels::chunk::{chunk_iteration::VisibleFaceIterator, VoxelGrid};

use super::face::{Face, QUAD_INDICES, QUAD_TEX_COORDS};

/// Vertex and index buffers for one chunk.
///
/// Buffers are append-only while building and are cleared as a whole before a
/// rebuild, so building twice from the same grid yields identical buffers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChunkMesh {
    /// Interleaved vertex data
    vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`
    indices: Vec<u32>,
}

/// Index of the first vertex of a new quad.
///
/// # Panics
/// Panics if the quad's last vertex would not be addressable by a `u32` index.
/// Chunks up to `MAX_CHUNK_DIMENSION` cells per side never get close.
fn quad_base(vertex_count: usize) -> u32 {
    match u32::try_from(vertex_count + 3) {
        Ok(last) => last - 3,
        Err(_) => panic!(
            "mesh with {vertex_count} vertices cannot take another quad with 32-bit indices"
        ),
    }
}

impl ChunkMesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        ChunkMesh::default()
    }

    /// Builds the mesh for every visible face in `grid`.
    pub fn from_grid(grid: &VoxelGrid) -> Self {
        let mut mesh = ChunkMesh::new();
        mesh.rebuild(grid);
        mesh
    }

    /// Clears the buffers and re-emits every visible face in `grid`.
    ///
    /// Faces are emitted in [`VisibleFaceIterator`] order. Capacity is
    /// reserved up front from the visible face count.
    pub fn rebuild(&mut self, grid: &VoxelGrid) {
        self.vertices.clear();
        self.indices.clear();

        let face_count = grid.visible_face_count();
        self.vertices.reserve(face_count * 4);
        self.indices.reserve(face_count * QUAD_INDICES.len());

        for (position, side) in VisibleFaceIterator::new(grid) {
            self.add_face(&Face::new(position.x, position.y, position.z, side));
        }

        trace!(
            "Built chunk mesh: {} faces, {} vertices, {} triangles",
            face_count,
            self.vertex_count(),
            self.triangle_count()
        );
    }

    /// Appends one quad.
    ///
    /// The indices are offset by the number of vertices already in the mesh.
    pub fn add_face(&mut self, face: &Face) {
        let base = quad_base(self.vertices.len());
        for (corner, [u, v]) in face.corners().into_iter().zip(QUAD_TEX_COORDS) {
            self.vertices.push(Vertex::new(corner, u, v));
        }
        self.indices.extend(Self::generate_face_indices(base));
    }

    /// Generates index data for a face whose first vertex is `base`.
    ///
    /// # Returns
    /// Six indices forming two counter-clockwise triangles.
    pub fn generate_face_indices(base: u32) -> [u32; 6] {
        QUAD_INDICES.map(|i| base + i)
    }

    /// Vertex buffer.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex buffer viewed as flat floats (stride [`FLOATS_PER_VERTEX`]).
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices, equal to `vertex_floats().len() / 5`.
    pub fn vertex_count(&self) -> usize {
        self.vertex_floats().len() / FLOATS_PER_VERTEX
    }

    /// Number of triangles, equal to `indices().len() / 3`.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether no face was emitted.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
