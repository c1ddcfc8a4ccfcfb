//! # Visibility Pass
//!
//! Determines, for every solid block, which of its six faces border empty space.
//!
//! Each block's flags depend only on the occupancy of its neighbors, never on
//! the neighbors' flags. The pass reads the occupancy mask and writes only the
//! flags of the block it is visiting, so every block can be processed
//! independently.

use serde::{Deserialize, Serialize};

use crate::voxels::block::{block_side::BlockSide, Block};

use super::grid::{GridOccupancy, VoxelGrid};

/// How a face is treated when its neighbor lies outside the chunk.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Faces on the chunk seam are never rendered.
    #[default]
    Hidden,
    /// Faces on the chunk seam are always rendered.
    Visible,
}

impl BoundaryPolicy {
    /// Visibility assigned to a face whose neighbor is outside the lattice.
    #[inline]
    pub fn seam_visibility(self) -> bool {
        matches!(self, BoundaryPolicy::Visible)
    }
}

/// Recomputes the visibility flags of every solid block in `grid`.
///
/// A face with an in-bounds neighbor is visible iff that neighbor is empty.
/// A face whose neighbor falls outside `[0, S)` takes its value from `policy`.
pub fn update_visibility(grid: &mut VoxelGrid, policy: BoundaryPolicy) {
    let (occupancy, blocks) = grid.split_for_update();
    for block in blocks.iter_mut() {
        update_block(&occupancy, block, policy);
    }
}

fn update_block(occupancy: &GridOccupancy<'_>, block: &mut Block, policy: BoundaryPolicy) {
    let position = block.position();
    for side in BlockSide::all() {
        let visible = match occupancy.neighbor_solid(position, side.offset()) {
            Some(neighbor_solid) => !neighbor_solid,
            None => policy.seam_visibility(),
        };
        block.set_face_visible(side, visible);
    }
}
