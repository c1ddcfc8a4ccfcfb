//! # World Module
//!
//! This module provides the `World` struct which owns every chunk in the voxel
//! world together with the density field they are populated from.
//!
//! ## Architecture
//!
//! The world is an explicit registry passed around by reference. Only chunks
//! that have been added are kept in memory, keyed by chunk coordinate.
//!
//! ## Performance Considerations
//!
//! - Chunk lookup is O(1) using a hash map
//! - Adding a chunk populates and runs its visibility pass; meshing waits for
//!   the first mesh request

use std::collections::HashMap;

use cgmath::{Matrix4, Point3};
use log::info;

use crate::config::ChunkSettings;
use crate::rendering::model::{ModelHandle, ModelUploader};
use crate::voxels::chunk::Chunk;
use crate::voxels::density::DensityField;

/// A ready-to-draw chunk: its model and where to place it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChunkDraw {
    /// Chunk coordinate
    pub position: Point3<i32>,
    /// Model built from the chunk's mesh
    pub model: ModelHandle,
    /// World placement of the model
    pub placement: Matrix4<f32>,
}

/// Represents a voxel world composed of multiple chunks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_chunk_engine::config::ChunkSettings;
/// use voxel_chunk_engine::voxels::density::ConstantDensity;
/// use voxel_chunk_engine::voxels::world::World;
///
/// let settings = ChunkSettings { dimension: 4, ..ChunkSettings::default() };
/// let mut world = World::new(settings, Box::new(ConstantDensity(1.0)));
/// world.add_chunk_at(Point3::new(0, 0, 0));
/// assert!(world.get_chunk_at(Point3::new(0, 0, 0)).is_some());
/// ```
pub struct World {
    /// Parameters every chunk is populated with.
    settings: ChunkSettings,
    /// The field deciding occupancy for every chunk.
    density: Box<dyn DensityField>,
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<Point3<i32>, Chunk>,
}

impl World {
    /// Creates a new, empty world.
    pub fn new(settings: ChunkSettings, density: Box<dyn DensityField>) -> Self {
        World {
            settings,
            density,
            chunks: HashMap::new(),
        }
    }

    /// Adds a new chunk at the specified chunk coordinates if one doesn't already exist.
    ///
    /// The chunk is populated and its visibility computed; its mesh is left
    /// dirty until requested.
    pub fn add_chunk_at(&mut self, position: Point3<i32>) -> &mut Chunk {
        let settings = self.settings;
        let density = &*self.density;
        self.chunks.entry(position).or_insert_with(|| {
            let mut chunk = Chunk::new(position, settings, density);
            chunk.update_blocks();
            chunk
        })
    }

    /// Adds every chunk in the cube `[-radius, radius]^3` around the origin.
    pub fn add_chunks_around_origin(&mut self, radius: i32) {
        for z in -radius..=radius {
            for y in -radius..=radius {
                for x in -radius..=radius {
                    self.add_chunk_at(Point3::new(x, y, z));
                }
            }
        }
        info!(
            "World holds {} chunks of dimension {}",
            self.chunks.len(),
            self.settings.dimension
        );
    }

    /// Retrieves a reference to the chunk at the specified chunk coordinates.
    pub fn get_chunk_at(&self, position: Point3<i32>) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Mutable counterpart of [`World::get_chunk_at`].
    pub fn get_chunk_at_mut(&mut self, position: Point3<i32>) -> Option<&mut Chunk> {
        self.chunks.get_mut(&position)
    }

    /// Removes a chunk, releasing its model through `uploader`.
    pub fn remove_chunk_at<U>(&mut self, position: Point3<i32>, uploader: &mut U) -> Option<Chunk>
    where
        U: ModelUploader + ?Sized,
    {
        let mut chunk = self.chunks.remove(&position)?;
        chunk.release_model(uploader);
        Some(chunk)
    }

    /// Re-samples the density field for an existing chunk.
    ///
    /// Returns `false` when no chunk exists at `position`.
    pub fn regenerate_chunk_at(&mut self, position: Point3<i32>) -> bool {
        let density = &*self.density;
        match self.chunks.get_mut(&position) {
            Some(chunk) => {
                chunk.repopulate(density);
                chunk.update_blocks();
                true
            }
            None => false,
        }
    }

    /// Requests the mesh of every chunk, building only the ones that need it.
    ///
    /// The result is sorted by chunk coordinate so draw order is stable.
    pub fn request_meshes<U>(&mut self, uploader: &mut U) -> Vec<ChunkDraw>
    where
        U: ModelUploader + ?Sized,
    {
        let mut draws: Vec<ChunkDraw> = self
            .chunks
            .values_mut()
            .map(|chunk| ChunkDraw {
                position: chunk.position(),
                model: chunk.request_mesh(&mut *uploader),
                placement: chunk.placement_matrix(),
            })
            .collect();
        draws.sort_by_key(|draw| (draw.position.z, draw.position.y, draw.position.x));
        draws
    }

    /// Iterates over every chunk, in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Number of chunks held.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Parameters every chunk is populated with.
    pub fn settings(&self) -> &ChunkSettings {
        &self.settings
    }
}
