//! Model handles and the upload boundary.
//!
//! A chunk never talks to the graphics API directly. It hands its finished
//! [`ChunkMesh`] to a [`ModelUploader`], receives an opaque [`ModelHandle`] in
//! return, and gives that handle back through [`ModelUploader::release`] when a
//! rebuild replaces it. The chunk is the only writer of its handle; renderers
//! only read it.

use std::collections::HashMap;

use log::trace;

use super::meshing::ChunkMesh;

/// Opaque reference to GPU-resident geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelHandle(u64);

impl ModelHandle {
    /// Raw id, for backends that key their own tables on it.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// The rendering collaborator that turns mesh buffers into a model.
pub trait ModelUploader {
    /// Uploads the vertex and index buffers and returns a handle to them.
    fn upload(&mut self, mesh: &ChunkMesh) -> ModelHandle;

    /// Releases a model that is no longer referenced by its chunk.
    fn release(&mut self, handle: ModelHandle);
}

/// Sizes of an uploaded model.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ModelInfo {
    /// Number of vertices in the vertex buffer
    pub vertex_count: usize,
    /// Number of indexed triangles
    pub triangle_count: usize,
}

/// In-memory [`ModelUploader`] that keeps a copy of every live model.
///
/// Used by headless runs and tests in place of a GPU backend.
#[derive(Debug, Default)]
pub struct ModelStore {
    next_id: u64,
    models: HashMap<ModelHandle, ChunkMesh>,
    uploads: usize,
    releases: usize,
}

impl ModelStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        ModelStore::default()
    }

    /// Buffers of a live model.
    pub fn get(&self, handle: ModelHandle) -> Option<&ChunkMesh> {
        self.models.get(&handle)
    }

    /// Sizes of a live model.
    pub fn info(&self, handle: ModelHandle) -> Option<ModelInfo> {
        self.get(handle).map(|mesh| ModelInfo {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
        })
    }

    /// Whether the handle refers to a model that has not been released.
    pub fn is_live(&self, handle: ModelHandle) -> bool {
        self.models.contains_key(&handle)
    }

    /// Number of models currently held.
    pub fn live_count(&self) -> usize {
        self.models.len()
    }

    /// Total number of uploads performed.
    pub fn upload_count(&self) -> usize {
        self.uploads
    }

    /// Total number of releases performed.
    pub fn release_count(&self) -> usize {
        self.releases
    }
}

impl ModelUploader for ModelStore {
    fn upload(&mut self, mesh: &ChunkMesh) -> ModelHandle {
        let handle = ModelHandle(self.next_id);
        self.next_id += 1;
        self.uploads += 1;
        self.models.insert(handle, mesh.clone());
        trace!(
            "Uploaded model {:?} ({} vertices)",
            handle,
            mesh.vertex_count()
        );
        handle
    }

    fn release(&mut self, handle: ModelHandle) {
        if self.models.remove(&handle).is_some() {
            self.releases += 1;
            trace!("Released model {:?}", handle);
        }
    }
}
