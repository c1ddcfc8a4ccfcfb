//! # Configuration
//!
//! Engine settings, loaded from an optional JSON file. Every field has a
//! default, so a partial file (or no file at all) is valid.
//!
//! ```json
//! {
//!   "chunk_dimension": 32,
//!   "generator": "perlin",
//!   "boundary_policy": "hidden",
//!   "world_radius": 2
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::voxels::chunk::BoundaryPolicy;
use crate::voxels::density::GeneratorKind;

/// Default side length of a chunk, in cells.
pub const DEFAULT_CHUNK_DIMENSION: usize = 64;
/// Largest supported side length; `24 * S^3` vertex indices must fit in a `u32`.
pub const MAX_CHUNK_DIMENSION: usize = 256;
/// Largest supported world radius, in chunks.
pub const MAX_WORLD_RADIUS: u32 = 8;
/// Divisor applied to world coordinates before sampling the density field.
pub const DEFAULT_DENSITY_SCALE: f64 = 10.0;
/// Samples strictly above this value are solid.
pub const DEFAULT_DENSITY_THRESHOLD: f64 = 0.1;

/// Errors raised while loading an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not valid JSON or has unknown fields.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its supported range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Side length `S` of every chunk
    pub chunk_dimension: usize,
    /// Coordinate divisor for density sampling
    pub density_scale: f64,
    /// Occupancy threshold
    pub density_threshold: f64,
    /// Seed for the noise generators
    pub seed: u32,
    /// Generation method
    pub generator: GeneratorKind,
    /// How faces on chunk seams are treated
    pub boundary_policy: BoundaryPolicy,
    /// Chunks are generated for every coordinate in `[-r, r]^3`
    pub world_radius: u32,
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            chunk_dimension: DEFAULT_CHUNK_DIMENSION,
            density_scale: DEFAULT_DENSITY_SCALE,
            density_threshold: DEFAULT_DENSITY_THRESHOLD,
            seed: 0,
            generator: GeneratorKind::Perlin,
            boundary_policy: BoundaryPolicy::Hidden,
            world_radius: 1,
            log_filter: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_CHUNK_DIMENSION).contains(&self.chunk_dimension) {
            return Err(ConfigError::Invalid(format!(
                "chunk_dimension must be in 1..={MAX_CHUNK_DIMENSION}, got {}",
                self.chunk_dimension
            )));
        }
        if !self.density_scale.is_finite() || self.density_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "density_scale must be finite and positive, got {}",
                self.density_scale
            )));
        }
        if !self.density_threshold.is_finite() {
            return Err(ConfigError::Invalid(
                "density_threshold must be finite".to_string(),
            ));
        }
        if self.world_radius > MAX_WORLD_RADIUS {
            return Err(ConfigError::Invalid(format!(
                "world_radius must be at most {MAX_WORLD_RADIUS}, got {}",
                self.world_radius
            )));
        }
        Ok(())
    }

    /// The subset of settings the chunk pipeline needs.
    pub fn chunk_settings(&self) -> ChunkSettings {
        ChunkSettings {
            dimension: self.chunk_dimension,
            scale: self.density_scale,
            threshold: self.density_threshold,
            boundary_policy: self.boundary_policy,
        }
    }
}

/// Per-chunk pipeline parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChunkSettings {
    /// Side length `S`
    pub dimension: usize,
    /// Coordinate divisor for density sampling
    pub scale: f64,
    /// Samples strictly above this value are solid
    pub threshold: f64,
    /// Seam handling for the visibility pass
    pub boundary_policy: BoundaryPolicy,
}

impl Default for ChunkSettings {
    fn default() -> Self {
        EngineConfig::default().chunk_settings()
    }
}
