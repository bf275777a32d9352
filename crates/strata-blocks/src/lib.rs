//! Terrain cell codes shared by generation and meshing.
#![forbid(unsafe_code)]

pub mod types;

pub use types::{BUCKET_COUNT, GROUND_BANDS, TerrainType};
