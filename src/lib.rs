#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Chunk Engine
//!
//! Procedural voxel chunks, from density field to indexed triangle buffers.
//!
//! A chunk samples a density field once per cell, marks which faces of each
//! solid cell border empty space, and builds a mesh containing only those
//! faces the first time it is asked for one. The resulting buffers are handed
//! to a rendering backend through the [`ModelUploader`](rendering::model::ModelUploader)
//! trait, together with a placement matrix for the chunk.
//!
//! ## Key Modules
//!
//! * `voxels` - Blocks, density fields, chunk grids, visibility and the chunk registry
//! * `rendering` - Vertex layout, mesh building, model handles and shader uniforms
//! * `scene` - Camera, projection and the transform hierarchy
//! * `config` - JSON configuration and per-chunk settings
//!
//! ## Usage
//!
//! ```rust
//! use voxel_chunk_engine::config::EngineConfig;
//! use voxel_chunk_engine::voxels::density::GeneratorKind;
//!
//! let config = EngineConfig {
//!     chunk_dimension: 4,
//!     generator: GeneratorKind::Solid,
//!     world_radius: 0,
//!     ..EngineConfig::default()
//! };
//! let summary = voxel_chunk_engine::run(&config).unwrap();
//! assert_eq!(summary.chunks, 1);
//! assert_eq!(summary.solid_cells, 64);
//! ```

use std::fmt;

use cgmath::{Deg, Matrix4, Point3};
use log::info;
use thiserror::Error;

use crate::config::{ConfigError, EngineConfig};
use crate::rendering::model::{ModelStore, ModelUploader};
use crate::rendering::uniform::ShaderUniforms;
use crate::scene::{model_view_projection, view_projection, Camera, Projection};
use crate::voxels::world::{ChunkDraw, World};

pub mod config;
pub mod rendering;
pub mod scene;
pub mod voxels;

/// Name of the model-view-projection uniform set for every chunk draw.
pub const MVP_UNIFORM: &str = "u_mvp";
/// Name of the model (placement) uniform set for every chunk draw.
pub const MODEL_UNIFORM: &str = "u_model";

/// Top-level error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A global logger was already installed.
    #[error("failed to initialise logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Totals gathered by [`run`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Chunks generated
    pub chunks: usize,
    /// Solid cells across all chunks
    pub solid_cells: usize,
    /// Visible faces across all chunks
    pub visible_faces: usize,
    /// Vertices across all meshes
    pub vertices: usize,
    /// Triangles across all meshes
    pub triangles: usize,
    /// Chunk draws prepared with their uniforms
    pub draws: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} chunks, {} solid cells, {} visible faces, {} vertices, {} triangles, {} draws",
            self.chunks, self.solid_cells, self.visible_faces, self.vertices, self.triangles, self.draws
        )
    }
}

/// Installs `env_logger` on stdout.
///
/// `RUST_LOG` takes precedence; `fallback_filter` applies when it is unset.
pub fn init_logger(fallback_filter: &str) -> Result<(), EngineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(fallback_filter))
        .target(env_logger::Target::Stdout)
        .try_init()?;
    info!("Logger initialized");
    Ok(())
}

/// Camera looking at the generated chunk cube from outside one corner.
pub fn default_camera(config: &EngineConfig) -> (Camera, Projection) {
    let extent = ((2 * config.world_radius + 1) as usize * config.chunk_dimension) as f32;
    let camera = Camera::new(
        Point3::new(-extent, extent, -extent),
        Deg(45.0),
        Deg(-35.0),
    );
    let projection = Projection::new(1280, 720, Deg(45.0), 0.1, extent * 8.0);
    (camera, projection)
}

/// Uniforms for drawing one chunk with the given view-projection matrix.
pub fn chunk_uniforms(draw: &ChunkDraw, view_projection: Matrix4<f32>) -> ShaderUniforms {
    let mut uniforms = ShaderUniforms::new();
    uniforms
        .set(MODEL_UNIFORM, draw.placement)
        .set(MVP_UNIFORM, model_view_projection(view_projection, draw.placement));
    uniforms
}

/// A chunk draw together with the uniforms it is drawn with.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedDraw {
    /// Model and placement of the chunk
    pub draw: ChunkDraw,
    /// Uniforms for the chunk's shader program
    pub uniforms: ShaderUniforms,
}

/// Generates the chunk cube described by `config` and meshes every chunk into
/// an in-memory model store.
pub fn run(config: &EngineConfig) -> Result<RunSummary, EngineError> {
    let mut store = ModelStore::new();
    let (summary, _) = run_with_uploader(config, &mut store)?;
    info!(
        "Run finished: {} ({} models live)",
        summary,
        store.live_count()
    );
    Ok(summary)
}

/// Like [`run`], but uploads meshes through a caller-provided backend and
/// returns the prepared draws.
///
/// The config is validated before any chunk is generated.
pub fn run_with_uploader<U>(
    config: &EngineConfig,
    uploader: &mut U,
) -> Result<(RunSummary, Vec<PreparedDraw>), EngineError>
where
    U: ModelUploader + ?Sized,
{
    config.validate()?;
    let mut world = World::new(config.chunk_settings(), config.generator.build(config.seed));
    world.add_chunks_around_origin(config.world_radius as i32);

    let (camera, projection) = default_camera(config);
    let vp = view_projection(&camera, &projection);
    let prepared: Vec<PreparedDraw> = world
        .request_meshes(uploader)
        .into_iter()
        .map(|draw| PreparedDraw {
            uniforms: chunk_uniforms(&draw, vp),
            draw,
        })
        .collect();

    let mut summary = RunSummary {
        chunks: world.chunk_count(),
        draws: prepared.len(),
        ..RunSummary::default()
    };
    for chunk in world.chunks() {
        let grid = chunk.grid();
        let faces = grid.visible_face_count();
        summary.solid_cells += grid.solid_count();
        summary.visible_faces += faces;
        summary.vertices += faces * 4;
        summary.triangles += faces * 2;
    }
    Ok((summary, prepared))
}
