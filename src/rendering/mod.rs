//! # Rendering Module
//!
//! CPU-side rendering data: the vertex format, chunk meshing, model handles
//! exchanged with the graphics backend, and shader uniform values.
//!
//! Uploading buffers and issuing draw calls belong to the backend that
//! implements [`model::ModelUploader`] and [`uniform::UniformSink`].

pub mod meshing;
pub mod model;
pub mod uniform;
pub mod vertex;

pub use vertex::Vertex;
