//! # Chunk Iteration Module
//!
//! This module provides an iterator over every visible face of every solid
//! block in a grid. It is the order in which the mesh builder emits quads:
//! blocks in linear index order, and within a block the faces in
//! [`BlockSide::all`] order.

use cgmath::Point3;

use crate::voxels::block::{block_side::BlockSide, Block};

use super::grid::VoxelGrid;

/// An iterator over all visible faces in a grid.
///
/// Only the sparse block list is walked, so empty cells are never visited.
pub struct VisibleFaceIterator<'a> {
    /// Solid blocks of the grid being iterated
    blocks: &'a [Block],
    /// Current position in the blocks slice
    current_block_offset: usize,
    /// Next side of the current block to inspect
    current_side: usize,
}

impl<'a> VisibleFaceIterator<'a> {
    /// Creates a new `VisibleFaceIterator` for the given grid.
    pub fn new(grid: &'a VoxelGrid) -> Self {
        VisibleFaceIterator {
            blocks: grid.blocks(),
            current_block_offset: 0,
            current_side: 0,
        }
    }
}

impl Iterator for VisibleFaceIterator<'_> {
    type Item = (Point3<u32>, BlockSide);

    fn next(&mut self) -> Option<Self::Item> {
        let sides = BlockSide::all();
        while let Some(block) = self.blocks.get(self.current_block_offset) {
            while self.current_side < sides.len() {
                let side = sides[self.current_side];
                self.current_side += 1;
                if block.is_face_visible(side) {
                    return Some((block.position(), side));
                }
            }
            self.current_side = 0;
            self.current_block_offset += 1;
        }
        None
    }
}
