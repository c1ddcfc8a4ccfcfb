//! # Density Fields
//!
//! A density field maps a lattice coordinate to a scalar. Chunk population
//! samples it once per cell and keeps the cell only when the sample is above
//! the configured threshold.
//!
//! Several generation methods are provided:
//! - Perlin noise for natural-looking terrain with caves and overhangs
//! - Checkerboard pattern for testing
//! - Constant fields (completely solid or completely empty chunks)
//! - Seeded white noise for scattered blocks
//!
//! Any `Fn(f64, f64, f64) -> f64` closure is also a density field, which keeps
//! tests and ad hoc shapes short.

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Scalar field sampled during chunk population.
pub trait DensityField {
    /// Samples the field at the (already scaled) world-space coordinate.
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

impl<F> DensityField for F
where
    F: Fn(f64, f64, f64) -> f64,
{
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self(x, y, z)
    }
}

/// Decides occupancy from a raw density sample.
///
/// NaN and infinite samples never produce a solid cell, regardless of the
/// threshold.
#[inline]
pub fn is_solid_sample(sample: f64, threshold: f64) -> bool {
    sample.is_finite() && sample > threshold
}

/// The method used to generate new chunks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Coherent Perlin noise.
    Perlin,
    /// Alternates between solid and empty cells along every axis.
    Checkerboard,
    /// Every cell is solid.
    Solid,
    /// Every cell is empty.
    Empty,
    /// Independent pseudo-random value per cell.
    WhiteNoise,
}

impl GeneratorKind {
    /// Builds the density field for this generation method.
    pub fn build(self, seed: u32) -> Box<dyn DensityField> {
        match self {
            GeneratorKind::Perlin => Box::new(PerlinDensity::new(seed)),
            GeneratorKind::Checkerboard => Box::new(CheckerboardDensity),
            GeneratorKind::Solid => Box::new(ConstantDensity(f64::MAX)),
            GeneratorKind::Empty => Box::new(ConstantDensity(f64::MIN)),
            GeneratorKind::WhiteNoise => Box::new(WhiteNoiseDensity::new(seed as u64)),
        }
    }
}

/// 3D Perlin noise in roughly `[-1, 1]`.
pub struct PerlinDensity {
    perlin: Perlin,
}

impl PerlinDensity {
    /// Creates a Perlin field with the given seed.
    pub fn new(seed: u32) -> Self {
        PerlinDensity {
            perlin: Perlin::new(seed),
        }
    }
}

impl DensityField for PerlinDensity {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z])
    }
}

/// Returns `1.0` on cells whose floored coordinates sum to an even number and
/// `-1.0` elsewhere.
///
/// Coordinates arrive divided by the density scale, so the pattern period is
/// one cell only when the scale is `1.0`.
pub struct CheckerboardDensity;

impl DensityField for CheckerboardDensity {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let parity = (x.floor() + y.floor() + z.floor()).rem_euclid(2.0);
        if parity == 0.0 {
            1.0
        } else {
            -1.0
        }
    }
}

/// The same value everywhere.
pub struct ConstantDensity(pub f64);

impl DensityField for ConstantDensity {
    fn sample(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.0
    }
}

/// Position-hashed white noise in `[-1, 1)`.
///
/// Each sample seeds a fresh generator from the coordinate bits, so the field
/// stays a pure function of position.
pub struct WhiteNoiseDensity {
    seed: u64,
}

impl WhiteNoiseDensity {
    /// Creates a white noise field with the given seed.
    pub fn new(seed: u64) -> Self {
        WhiteNoiseDensity { seed }
    }
}

impl DensityField for WhiteNoiseDensity {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let hash = x
            .to_bits()
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .rotate_left(21)
            ^ y.to_bits().wrapping_mul(0xC2B2_AE3D_27D4_EB4F).rotate_left(42)
            ^ z.to_bits().wrapping_mul(0x1656_67B1_9E37_79F9)
            ^ self.seed;
        let mut rng = fastrand::Rng::with_seed(hash);
        rng.f64() * 2.0 - 1.0
    }
}
