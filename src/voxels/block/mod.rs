//! # Block Module
//!
//! This module provides the block record stored for every solid cell of a chunk.
//! Empty cells have no block at all; a chunk only materializes blocks for the
//! cells its density field marks as solid.

use block_side::BlockSide;
use cgmath::Point3;

pub mod block_side;

/// A single solid voxel within a chunk.
///
/// The position is the block's identity and never changes after population.
/// The six visibility flags are written by the visibility pass and read by the
/// mesh builder; a flag is `true` when that face borders empty space and must
/// be rendered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Local lattice coordinate of this block within its chunk.
    position: Point3<u32>,
    /// Per-face visibility, indexed by [`BlockSide`].
    visible: [bool; 6],
}

impl Block {
    /// Creates a new block at the given chunk-local coordinate.
    ///
    /// All visibility flags start out `false`; the chunk's visibility pass is
    /// responsible for filling them in.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - Coordinates of the block inside its chunk
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Block {
            position: Point3::new(x, y, z),
            visible: [false; 6],
        }
    }

    /// Chunk-local coordinate of this block.
    #[inline]
    pub fn position(&self) -> Point3<u32> {
        self.position
    }

    /// Returns whether the given face was marked as bordering empty space.
    #[inline]
    pub fn is_face_visible(&self, side: BlockSide) -> bool {
        self.visible[side.index()]
    }

    /// Overwrites the visibility flag of a single face.
    #[inline]
    pub fn set_face_visible(&mut self, side: BlockSide, visible: bool) {
        self.visible[side.index()] = visible;
    }

    /// All six flags in [`BlockSide::all`] order.
    pub fn visibility(&self) -> [bool; 6] {
        self.visible
    }

    /// Number of faces that will be emitted for this block.
    pub fn visible_face_count(&self) -> usize {
        self.visible.iter().filter(|visible| **visible).count()
    }

    /// Iterates over the faces of this block that must be rendered.
    pub fn visible_sides(&self) -> impl Iterator<Item = BlockSide> + '_ {
        BlockSide::all()
            .into_iter()
            .filter(move |side| self.is_face_visible(*side))
    }
}
