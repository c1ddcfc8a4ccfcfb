//! # Voxel Chunk Engine Entry Point
//!
//! Generates and meshes a cube of chunks around the origin and logs a summary.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- [config.json]
//! ```
//!
//! Without a config path every setting takes its default value.

use log::info;
use voxel_chunk_engine::config::EngineConfig;
use voxel_chunk_engine::EngineError;

fn main() -> Result<(), EngineError> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    voxel_chunk_engine::init_logger(&config.log_filter)?;
    info!("Using {:?}", config);

    let summary = voxel_chunk_engine::run(&config)?;
    println!("{summary}");
    Ok(())
}
