use cgmath::Point3;

use crate::voxels::block::block_side::BlockSide;

/// Texture coordinate of each quad corner, in emission order.
pub const QUAD_TEX_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Indices of the two triangles of a quad, relative to its first vertex.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Represents a single unit quad face of a voxel in the mesh.
///
/// A face is defined by four corner points (lower-left, lower-right,
/// upper-right, upper-left) as seen from outside the block. Walking the
/// corners in that order is counter-clockwise, so with right-handed
/// coordinates the triangles built from [`QUAD_INDICES`] face outward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner of the face in chunk coordinates
    pub ll: Point3<u32>,
    /// Lower-right corner of the face in chunk coordinates
    pub lr: Point3<u32>,
    /// Upper-right corner of the face in chunk coordinates
    pub ur: Point3<u32>,
    /// Upper-left corner of the face in chunk coordinates
    pub ul: Point3<u32>,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face of the voxel at `(i, j, k)` on the given side.
    ///
    /// # Arguments
    /// * `i`, `j`, `k` - The coordinates of the voxel in chunk space
    /// * `block_side` - Which side of the block this face represents
    pub fn new(i: u32, j: u32, k: u32, block_side: BlockSide) -> Self {
        let p = Point3::new;
        let (ll, lr, ur, ul) = match block_side {
            BlockSide::FRONT => (
                p(i, j, k + 1),
                p(i + 1, j, k + 1),
                p(i + 1, j + 1, k + 1),
                p(i, j + 1, k + 1),
            ),
            BlockSide::BACK => (
                p(i + 1, j, k),
                p(i, j, k),
                p(i, j + 1, k),
                p(i + 1, j + 1, k),
            ),
            BlockSide::BOTTOM => (
                p(i, j, k),
                p(i + 1, j, k),
                p(i + 1, j, k + 1),
                p(i, j, k + 1),
            ),
            BlockSide::TOP => (
                p(i, j + 1, k + 1),
                p(i + 1, j + 1, k + 1),
                p(i + 1, j + 1, k),
                p(i, j + 1, k),
            ),
            BlockSide::LEFT => (
                p(i, j, k),
                p(i, j, k + 1),
                p(i, j + 1, k + 1),
                p(i, j + 1, k),
            ),
            BlockSide::RIGHT => (
                p(i + 1, j, k + 1),
                p(i + 1, j, k),
                p(i + 1, j + 1, k),
                p(i + 1, j + 1, k + 1),
            ),
        };
        Face {
            ll,
            lr,
            ur,
            ul,
            block_side,
        }
    }

    /// Corners in emission order, matching [`QUAD_TEX_COORDS`].
    pub fn corners(&self) -> [Point3<u32>; 4] {
        [self.ll, self.lr, self.ur, self.ul]
    }
}
