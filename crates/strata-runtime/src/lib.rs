//! Chunk streaming: keeps a window of generated, meshed chunks around a viewer.
#![forbid(unsafe_code)]

mod chunk;
mod store;
mod timing;

pub use chunk::Chunk;
pub use store::{ChunkStore, world_to_chunk_coordinate};
pub use timing::{ChunkTiming, TickReport};
