//! # Voxel Engine Core
//!
//! This module contains the voxel data model and the chunk pipeline that turns
//! a density field into renderable geometry.
//!
//! ## Architecture
//!
//! * **Block**: A solid cell and its six face visibility flags
//! * **Density**: Scalar fields deciding which cells are solid
//! * **Chunk**: A fixed-size cubic grid of cells, its visibility pass and its lazily built mesh
//! * **World**: Owns every chunk and the density field they are populated from
//!
//! ## Data Flow
//!
//! 1. A density field is sampled once per cell to populate a chunk's grid
//! 2. The visibility pass marks each solid cell's faces that border empty space
//! 3. The mesh builder emits one quad per visible face when the mesh is first requested
//! 4. The finished buffers are handed to the rendering backend as a model
//!
//! ## Concurrency
//!
//! The whole pipeline is synchronous CPU work with no I/O. The visibility pass
//! only reads neighbor occupancy and only writes the visited cell's flags.

pub mod block;
pub mod chunk;
pub mod density;
pub mod world;
