//! # Scene State
//!
//! Camera and transform state that feeds view-projection matrices to the
//! renderer. The voxel pipeline never depends on this module; it only
//! produces placement matrices that are combined with it at draw time.

pub mod camera;
pub mod transform;

pub use camera::{model_view_projection, view_projection, Camera, Projection};
pub use transform::{NodeId, SceneError, Transform, TransformTree};
