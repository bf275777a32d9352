//! World configuration, terrain banding, and height sampling.
#![forbid(unsafe_code)]

pub mod error;
pub mod voxel;
pub mod worldgen;

pub use error::TerrainError;
pub use voxel::{
    BandRange, ChunkCoord, FractalSettings, GridRegion, HeightField, NoiseOffsets, NoiseSampler,
    PerlinSampler, TerrainProfile,
};
pub use worldgen::{WorldConfig, load_config_from_path};
