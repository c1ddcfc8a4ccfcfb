//! Mesh generation for voxel rendering.
//!
//! This module provides the conversion from voxel visibility data into
//! GPU-friendly vertex and index buffers.
//!
//! # Architecture
//! - [`ChunkMesh`]: Vertex and index buffers for a whole chunk
//! - [`Face`]: A single unit quad on one side of a voxel
//!
//! # Usage
//! ```
//! use cgmath::Point3;
//! use voxel_chunk_engine::config::ChunkSettings;
//! use voxel_chunk_engine::rendering::meshing::ChunkMesh;
//! use voxel_chunk_engine::voxels::chunk::{populate_grid, update_visibility, BoundaryPolicy};
//!
//! let settings = ChunkSettings { dimension: 4, scale: 1.0, threshold: 0.1, boundary_policy: BoundaryPolicy::Visible };
//! let mut grid = populate_grid(Point3::new(0, 0, 0), &settings, &|_x: f64, _y: f64, _z: f64| 1.0);
//! update_visibility(&mut grid, settings.boundary_policy);
//! let mesh = ChunkMesh::from_grid(&grid);
//! assert_eq!(mesh.triangle_count(), 6 * 16 * 2);
//! ```

mod face;
mod mesh;

pub use face::{Face, QUAD_INDICES, QUAD_TEX_COORDS};
pub use mesh::ChunkMesh;
