//! # Chunk Module
//!
//! This module provides the `Chunk` struct, which owns one cubic voxel grid and
//! drives it through population, visibility and lazy mesh generation.
//!
//! ## Lifecycle
//!
//! ```text
//!  new / repopulate          update_blocks            request_mesh
//! ─────────────────▶ Unbuilt ─────────────▶ Dirty ─────────────▶ Built
//!                                             ▲                    │
//!                                             └── update_blocks ───┘
//! ```
//!
//! - Population runs eagerly on construction and leaves the chunk `Unbuilt`.
//! - [`Chunk::update_blocks`] recomputes face visibility and marks the mesh `Dirty`.
//! - [`Chunk::request_mesh`] builds and uploads the mesh only when the chunk is
//!   not `Built`, then returns the cached handle until the next invalidation.
//!
//! Nothing re-dirties a built chunk on its own; invalidation always comes from
//! calling the population or visibility step again.

use cgmath::{Matrix4, Point3, Vector3};
use log::debug;

use crate::config::ChunkSettings;
use crate::rendering::meshing::ChunkMesh;
use crate::rendering::model::{ModelHandle, ModelUploader};

use super::density::DensityField;

mod chunk_creation;
pub mod chunk_iteration;
mod grid;
mod visibility;

pub use chunk_creation::{populate_grid, GridBuilder};
pub use grid::VoxelGrid;
pub use visibility::{update_visibility, BoundaryPolicy};

/// Where a chunk is in its mesh lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshState {
    /// Populated, but visibility has not been computed since.
    Unbuilt,
    /// Visibility is current; the mesh has not been rebuilt from it yet.
    Dirty,
    /// The model handle reflects the current visibility.
    Built,
}

/// A cubic region of the voxel world and the unit of meshing and placement.
///
/// Each chunk maintains its position in chunk coordinates, its grid, and the
/// model handle of its last built mesh.
#[derive(Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    position: Point3<i32>,
    /// Pipeline parameters this chunk was populated with.
    settings: ChunkSettings,
    /// The cells of this chunk.
    grid: VoxelGrid,
    /// Lifecycle state of the mesh.
    state: MeshState,
    /// The uploaded model, once a mesh has been built.
    model: Option<ModelHandle>,
}

impl Chunk {
    /// Creates a chunk and populates its grid from `density`.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    /// * `settings` - Side length, density scale/threshold and seam policy
    /// * `density` - The field deciding which cells are solid
    pub fn new<D>(position: Point3<i32>, settings: ChunkSettings, density: &D) -> Self
    where
        D: DensityField + ?Sized,
    {
        Chunk {
            position,
            settings,
            grid: populate_grid(position, &settings, density),
            state: MeshState::Unbuilt,
            model: None,
        }
    }

    /// Creates a chunk and immediately computes visibility and builds its mesh.
    pub fn generated<D, U>(
        position: Point3<i32>,
        settings: ChunkSettings,
        density: &D,
        uploader: &mut U,
    ) -> Self
    where
        D: DensityField + ?Sized,
        U: ModelUploader + ?Sized,
    {
        let mut chunk = Chunk::new(position, settings, density);
        chunk.update_blocks_and_generate(uploader);
        chunk
    }

    /// Re-samples `density` into a fresh grid.
    ///
    /// The previous model stays cached until the next mesh request replaces it.
    pub fn repopulate<D>(&mut self, density: &D)
    where
        D: DensityField + ?Sized,
    {
        self.grid = populate_grid(self.position, &self.settings, density);
        self.state = MeshState::Unbuilt;
    }

    /// Recomputes face visibility for every solid cell and marks the mesh dirty.
    pub fn update_blocks(&mut self) {
        update_visibility(&mut self.grid, self.settings.boundary_policy);
        self.state = MeshState::Dirty;
    }

    /// Recomputes visibility and rebuilds the mesh right away.
    pub fn update_blocks_and_generate<U>(&mut self, uploader: &mut U) -> ModelHandle
    where
        U: ModelUploader + ?Sized,
    {
        self.update_blocks();
        self.request_mesh(uploader)
    }

    /// Returns the chunk's model, building it first if needed.
    ///
    /// An `Unbuilt` chunk gets its visibility computed before meshing. A
    /// `Dirty` chunk is meshed from its current flags. A `Built` chunk returns
    /// its cached handle without touching the uploader. When a rebuild replaces
    /// a previous model, the old handle is released through `uploader`.
    pub fn request_mesh<U>(&mut self, uploader: &mut U) -> ModelHandle
    where
        U: ModelUploader + ?Sized,
    {
        match (self.state, self.model) {
            (MeshState::Built, Some(handle)) => return handle,
            (MeshState::Unbuilt, _) => self.update_blocks(),
            _ => {}
        }

        let mesh = self.build_mesh();
        let handle = uploader.upload(&mesh);
        if let Some(previous) = self.model.replace(handle) {
            uploader.release(previous);
        }
        self.state = MeshState::Built;
        debug!(
            "Chunk {:?} meshed: {} vertices, {} triangles",
            self.position,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        handle
    }

    /// Builds mesh buffers from the current visibility flags without
    /// uploading them or changing state.
    pub fn build_mesh(&self) -> ChunkMesh {
        ChunkMesh::from_grid(&self.grid)
    }

    /// Drops the chunk's model, releasing it through `uploader`.
    pub fn release_model<U>(&mut self, uploader: &mut U)
    where
        U: ModelUploader + ?Sized,
    {
        if let Some(handle) = self.model.take() {
            uploader.release(handle);
        }
        if self.state == MeshState::Built {
            self.state = MeshState::Dirty;
        }
    }

    /// Translation placing this chunk in world space: `T(cx*S, cy*S, cz*S)`.
    pub fn placement_matrix(&self) -> Matrix4<f32> {
        let s = self.settings.dimension as f32;
        Matrix4::from_translation(Vector3::new(
            self.position.x as f32 * s,
            self.position.y as f32 * s,
            self.position.z as f32 * s,
        ))
    }

    /// The position of this chunk in chunk coordinates.
    pub fn position(&self) -> Point3<i32> {
        self.position
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MeshState {
        self.state
    }

    /// Model handle of the last built mesh, if any.
    pub fn model(&self) -> Option<ModelHandle> {
        self.model
    }

    /// The chunk's cells.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Settings this chunk was populated with.
    pub fn settings(&self) -> &ChunkSettings {
        &self.settings
    }
}
