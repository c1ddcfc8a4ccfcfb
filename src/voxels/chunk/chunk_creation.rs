//! # Chunk Creation Module
//!
//! This module provides functionality for populating a chunk's voxel grid from a
//! density field. It implements a builder that keeps the occupancy bit vector
//! and the solid block list consistent while cells are pushed in linear order.
//!
//! ## Memory Optimization
//!
//! The `GridBuilder` produces two components:
//! 1. A bit vector (`solid`) that tracks which positions contain solid cells
//! 2. A vector (`blocks`) that stores only the solid cells
//!
//! Empty cells cost one bit and never allocate a block record.

use bitvec::prelude::BitVec;
use cgmath::Point3;
use log::debug;

use crate::config::{ChunkSettings, MAX_CHUNK_DIMENSION};
use crate::voxels::block::Block;
use crate::voxels::density::{is_solid_sample, DensityField};

use super::grid::VoxelGrid;

/// A builder for creating a voxel grid one cell at a time.
///
/// Cells must be pushed in linear index order (x fastest, then y, then z),
/// which is the same order [`VoxelGrid::index`] flattens coordinates in.
pub struct GridBuilder {
    /// Side length of the grid being built
    dimension: usize,
    /// Bit vector where each bit represents whether a cell is solid (1) or empty (0)
    solid: BitVec,
    /// Vector containing only the solid cells, in the order they were pushed
    blocks: Vec<Block>,
    /// Current X position within the grid
    local_x: usize,
    /// Current Y position within the grid
    local_y: usize,
    /// Current Z position within the grid
    local_z: usize,
}

impl GridBuilder {
    /// Creates a new `GridBuilder` for a grid of side `dimension`.
    ///
    /// # Panics
    /// Panics if `dimension` is zero or larger than [`MAX_CHUNK_DIMENSION`],
    /// whose meshes would overflow 32-bit indices.
    pub fn new(dimension: usize) -> Self {
        assert!(dimension > 0, "a voxel grid needs at least one cell per side");
        assert!(
            dimension <= MAX_CHUNK_DIMENSION,
            "grid dimension {dimension} exceeds the maximum of {MAX_CHUNK_DIMENSION}"
        );
        GridBuilder {
            dimension,
            solid: BitVec::with_capacity(dimension * dimension * dimension),
            blocks: Vec::new(),
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }

    /// The coordinate the next pushed cell will occupy.
    pub fn cursor(&self) -> Point3<usize> {
        Point3::new(self.local_x, self.local_y, self.local_z)
    }

    /// Adds a cell at the current position and advances the position.
    ///
    /// # Panics
    /// Panics if the grid is already full.
    pub fn push_cell(&mut self, is_solid: bool) {
        assert!(
            self.local_z < self.dimension,
            "grid of dimension {} is already full",
            self.dimension
        );
        self.solid.push(is_solid);

        // Only store solid cells to save memory
        if is_solid {
            self.blocks.push(Block::new(
                self.local_x as u32,
                self.local_y as u32,
                self.local_z as u32,
            ));
        }

        self.local_x += 1;
        if self.local_x == self.dimension {
            self.local_x = 0;
            self.local_y += 1;
            if self.local_y == self.dimension {
                self.local_y = 0;
                self.local_z += 1;
            }
        }
    }

    /// Finalizes the grid.
    ///
    /// # Panics
    /// Panics if fewer than `dimension^3` cells were pushed.
    pub fn finish(self) -> VoxelGrid {
        assert_eq!(
            self.solid.len(),
            self.dimension * self.dimension * self.dimension,
            "grid finished before every cell was pushed"
        );
        VoxelGrid::from_parts(self.dimension, self.solid, self.blocks)
    }
}

/// Samples `density` for every cell of the chunk at `chunk_position`.
///
/// Cell `(x, y, z)` is solid iff
/// `f((x + cx*S) / scale, (y + cy*S) / scale, (z + cz*S) / scale) > threshold`.
/// Non-finite samples are treated as empty.
pub fn populate_grid<D>(chunk_position: Point3<i32>, settings: &ChunkSettings, density: &D) -> VoxelGrid
where
    D: DensityField + ?Sized,
{
    let dimension = settings.dimension;
    let s = dimension as i64;
    let origin = [
        chunk_position.x as i64 * s,
        chunk_position.y as i64 * s,
        chunk_position.z as i64 * s,
    ];

    let mut builder = GridBuilder::new(dimension);
    for k in 0..s {
        for j in 0..s {
            for i in 0..s {
                let sample = density.sample(
                    (i + origin[0]) as f64 / settings.scale,
                    (j + origin[1]) as f64 / settings.scale,
                    (k + origin[2]) as f64 / settings.scale,
                );
                builder.push_cell(is_solid_sample(sample, settings.threshold));
            }
        }
    }

    let grid = builder.finish();
    debug!(
        "Populated chunk {:?}: {} of {} cells solid",
        chunk_position,
        grid.solid_count(),
        grid.volume()
    );
    grid
}
