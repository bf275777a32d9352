mod chunk_coord;
mod height;
mod noise;
mod profile;
mod region;

pub use chunk_coord::ChunkCoord;
pub use height::{FractalSettings, HeightField};
pub use noise::{NoiseOffsets, NoiseSampler, PerlinSampler};
pub use profile::{BandRange, TerrainProfile};
pub use region::GridRegion;
