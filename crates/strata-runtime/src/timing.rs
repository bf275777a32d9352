use std::fmt;
use std::time::Instant;

use strata_world::ChunkCoord;

pub(crate) fn elapsed_us(start: Instant) -> u64 {
    start.elapsed().as_micros().min(u128::from(u64::MAX)) as u64
}

/// Wall time spent on one chunk build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkTiming {
    pub gen_us: u64,
    pub mesh_us: u64,
}

impl ChunkTiming {
    #[inline]
    pub fn total_us(&self) -> u64 {
        self.gen_us + self.mesh_us
    }
}

/// Outcome of one [`crate::ChunkStore::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub viewer_chunk: ChunkCoord,
    pub center_changed: bool,
    pub created: usize,
    pub timing: ChunkTiming,
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "chunk=({}, {}) moved={} created={} gen={}us mesh={}us",
            self.viewer_chunk.cx,
            self.viewer_chunk.cz,
            self.center_changed,
            self.created,
            self.timing.gen_us,
            self.timing.mesh_us
        )
    }
}
