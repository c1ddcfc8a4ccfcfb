//! # Voxel Grid Module
//!
//! The cubic lattice owned by a chunk.
//!
//! ## Memory Optimization
//!
//! The grid uses the same two-part storage as the rest of the engine:
//! - `solid`: a bit vector (1 bit per cell) indicating which cells are solid
//! - `blocks`: a vector containing only the solid cells, in linear index order
//!
//! Empty cells cost a single bit and no block record. Because population walks
//! the lattice in linear index order, `blocks` is sorted by linear index and a
//! coordinate lookup is a binary search.
//!
//! ### Performance Characteristics
//! - **Solidity Check**: O(1) - Just check the bit in `solid`
//! - **Block Lookup**: O(log n) - Binary search over the solid blocks
//! - **Memory Usage**: 1 bit per cell + sizeof(Block) per solid cell

use bitvec::prelude::BitVec;
use cgmath::{Point3, Vector3};

use crate::voxels::block::Block;

/// Flattening shared by every lookup: `x + y * S + z * S * S`.
#[inline]
pub(crate) fn linear_index(dimension: usize, x: usize, y: usize, z: usize) -> usize {
    x + y * dimension + z * dimension * dimension
}

/// A cubic lattice of side `dimension` whose solid cells carry a [`Block`].
///
/// The linear index of `(x, y, z)` is `x + y * S + z * S * S`. Every lookup,
/// whether during population or during neighbor queries, goes through
/// [`VoxelGrid::index`] so the two can never disagree.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    /// Side length of the lattice.
    dimension: usize,
    /// One bit per cell, set when the cell is solid.
    solid: BitVec,
    /// Solid cells only, sorted by linear index.
    blocks: Vec<Block>,
}

impl VoxelGrid {
    /// Assembles a grid from an occupancy mask and its matching block list.
    ///
    /// Only the population builder calls this; it guarantees that `blocks`
    /// holds exactly one entry per set bit, in linear order.
    pub(super) fn from_parts(dimension: usize, solid: BitVec, blocks: Vec<Block>) -> Self {
        debug_assert_eq!(solid.len(), dimension * dimension * dimension);
        debug_assert_eq!(solid.count_ones(), blocks.len());
        VoxelGrid {
            dimension,
            solid,
            blocks,
        }
    }

    /// Side length `S` of the lattice.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Total number of cells, `S^3`.
    #[inline]
    pub fn volume(&self) -> usize {
        self.solid.len()
    }

    /// Returns `true` when `(x, y, z)` lies inside `[0, S)^3`.
    #[inline]
    pub fn contains(&self, x: i64, y: i64, z: i64) -> bool {
        let s = self.dimension as i64;
        (0..s).contains(&x) && (0..s).contains(&y) && (0..s).contains(&z)
    }

    /// Flattens a coordinate into its linear index.
    ///
    /// # Panics
    /// Panics if any component is outside `[0, S)`. Clamping would silently
    /// alias edge cells, so out-of-range coordinates are treated as a caller bug.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        assert!(
            x < self.dimension && y < self.dimension && z < self.dimension,
            "cell ({x}, {y}, {z}) is outside a grid of dimension {}",
            self.dimension
        );
        linear_index(self.dimension, x, y, z)
    }

    /// Recovers the coordinate of a linear index.
    ///
    /// # Panics
    /// Panics if `index >= S^3`.
    #[inline]
    pub fn coordinate(&self, index: usize) -> Point3<usize> {
        assert!(
            index < self.volume(),
            "index {index} is outside a grid of volume {}",
            self.volume()
        );
        let s = self.dimension;
        Point3::new(index % s, (index / s) % s, index / (s * s))
    }

    /// Checks if the cell at `(x, y, z)` is solid.
    ///
    /// # Panics
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn is_solid(&self, x: usize, y: usize, z: usize) -> bool {
        self.solid[self.index(x, y, z)]
    }

    /// Occupancy of the neighbor one step along `offset`.
    ///
    /// Returns `None` when the neighbor falls outside the lattice, so callers
    /// decide how chunk seams are treated instead of reading past the edge.
    pub fn neighbor_solid(&self, position: Point3<u32>, offset: Vector3<i32>) -> Option<bool> {
        GridOccupancy {
            dimension: self.dimension,
            solid: &self.solid,
        }
        .neighbor_solid(position, offset)
    }

    /// Gets a reference to the block at the given coordinate, if the cell is solid.
    ///
    /// # Panics
    /// Panics if the coordinate is out of bounds.
    pub fn block_at(&self, x: usize, y: usize, z: usize) -> Option<&Block> {
        self.block_slot(x, y, z).map(|slot| &self.blocks[slot])
    }

    /// Mutable counterpart of [`VoxelGrid::block_at`].
    pub fn block_at_mut(&mut self, x: usize, y: usize, z: usize) -> Option<&mut Block> {
        self.block_slot(x, y, z).map(move |slot| &mut self.blocks[slot])
    }

    fn block_slot(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        let target = self.index(x, y, z);
        if !self.solid[target] {
            return None;
        }
        self.blocks
            .binary_search_by_key(&target, |block| self.block_index(block))
            .ok()
    }

    /// Linear index of a block stored in this grid.
    #[inline]
    pub fn block_index(&self, block: &Block) -> usize {
        let p = block.position();
        self.index(p.x as usize, p.y as usize, p.z as usize)
    }

    /// All solid blocks in linear index order.
    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of solid cells.
    #[inline]
    pub fn solid_count(&self) -> usize {
        self.blocks.len()
    }

    /// Sum of visible faces over every solid block.
    pub fn visible_face_count(&self) -> usize {
        self.blocks.iter().map(Block::visible_face_count).sum()
    }

    /// Splits the grid into the read-only occupancy view and the mutable block
    /// list, so a pass can read neighbors while it writes flags.
    pub(super) fn split_for_update(&mut self) -> (GridOccupancy<'_>, &mut [Block]) {
        (
            GridOccupancy {
                dimension: self.dimension,
                solid: &self.solid,
            },
            &mut self.blocks,
        )
    }
}

/// Borrowed occupancy mask of a [`VoxelGrid`].
pub(super) struct GridOccupancy<'a> {
    dimension: usize,
    solid: &'a BitVec,
}

impl GridOccupancy<'_> {
    /// See [`VoxelGrid::neighbor_solid`].
    pub(super) fn neighbor_solid(
        &self,
        position: Point3<u32>,
        offset: Vector3<i32>,
    ) -> Option<bool> {
        let s = self.dimension as i64;
        let nx = position.x as i64 + offset.x as i64;
        let ny = position.y as i64 + offset.y as i64;
        let nz = position.z as i64 + offset.z as i64;
        if !((0..s).contains(&nx) && (0..s).contains(&ny) && (0..s).contains(&nz)) {
            return None;
        }
        Some(self.solid[linear_index(self.dimension, nx as usize, ny as usize, nz as usize)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::chunk::chunk_creation::GridBuilder;
    use proptest::prelude::*;

    fn grid_with(dimension: usize, solid: &[(usize, usize, usize)]) -> VoxelGrid {
        let mut builder = GridBuilder::new(dimension);
        for z in 0..dimension {
            for y in 0..dimension {
                for x in 0..dimension {
                    builder.push_cell(solid.contains(&(x, y, z)));
                }
            }
        }
        builder.finish()
    }

    #[test]
    fn index_matches_flattening_formula() {
        let grid = grid_with(4, &[]);
        assert_eq!(grid.index(0, 0, 0), 0);
        assert_eq!(grid.index(1, 0, 0), 1);
        assert_eq!(grid.index(0, 1, 0), 4);
        assert_eq!(grid.index(0, 0, 1), 16);
        assert_eq!(grid.index(3, 3, 3), 63);
    }

    #[test]
    #[should_panic(expected = "outside a grid")]
    fn out_of_range_index_panics() {
        let grid = grid_with(2, &[]);
        grid.index(2, 0, 0);
    }

    #[test]
    #[should_panic(expected = "outside a grid")]
    fn out_of_range_decode_panics() {
        let grid = grid_with(2, &[]);
        grid.coordinate(8);
    }

    #[test]
    fn block_lookup_finds_only_solid_cells() {
        let grid = grid_with(3, &[(0, 0, 0), (2, 1, 0), (1, 2, 2)]);
        assert_eq!(grid.solid_count(), 3);
        assert_eq!(grid.block_at(2, 1, 0).map(|b| b.position()), Some(Point3::new(2, 1, 0)));
        assert_eq!(grid.block_at(1, 2, 2).map(|b| b.position()), Some(Point3::new(1, 2, 2)));
        assert!(grid.block_at(1, 1, 1).is_none());
        assert!(grid.is_solid(0, 0, 0));
        assert!(!grid.is_solid(1, 0, 0));
    }

    #[test]
    fn neighbor_outside_lattice_is_none() {
        let grid = grid_with(2, &[(0, 0, 0), (1, 0, 0)]);
        let origin = Point3::new(0, 0, 0);
        assert_eq!(grid.neighbor_solid(origin, Vector3::new(-1, 0, 0)), None);
        assert_eq!(grid.neighbor_solid(origin, Vector3::new(1, 0, 0)), Some(true));
        assert_eq!(grid.neighbor_solid(origin, Vector3::new(0, 1, 0)), Some(false));
    }

    proptest! {
        #[test]
        fn index_round_trips(dimension in 1usize..24, x in 0usize..24, y in 0usize..24, z in 0usize..24) {
            let grid = grid_with(dimension, &[]);
            let (x, y, z) = (x % dimension, y % dimension, z % dimension);
            let index = grid.index(x, y, z);
            prop_assert!(index < grid.volume());
            prop_assert_eq!(grid.coordinate(index), Point3::new(x, y, z));
        }
    }

    #[test]
    fn every_index_decodes_to_a_unique_coordinate() {
        let grid = grid_with(5, &[]);
        for index in 0..grid.volume() {
            let p = grid.coordinate(index);
            assert_eq!(grid.index(p.x, p.y, p.z), index);
        }
    }
}
