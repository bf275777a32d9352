use std::sync::Arc;
use std::time::Instant;

use hashbrown::HashMap;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use strata_geom::Vec3;
use strata_world::{ChunkCoord, HeightField, TerrainError, TerrainProfile, WorldConfig};

use crate::chunk::Chunk;
use crate::timing::{ChunkTiming, TickReport, elapsed_us};

/// Owns every resident chunk and keeps a square window of them loaded around the
/// viewer. Chunks are only ever added; nothing is evicted.
pub struct ChunkStore {
    config: WorldConfig,
    seed: u32,
    field: Arc<HeightField>,
    chunks: HashMap<ChunkCoord, Chunk>,
    center: ChunkCoord,
    pool: Option<ThreadPool>,
}

impl ChunkStore {
    /// Validates `config`, fixes the seed, and loads the window around chunk `(0, 0)`.
    pub fn init(config: WorldConfig) -> Result<Self, TerrainError> {
        config.validate()?;
        let config = config.with_resolved_seed();
        let seed = config.seed.unwrap_or_default();
        let profile = Arc::new(TerrainProfile::from_config(&config)?);
        let field = Arc::new(HeightField::from_seed(&config, profile, seed));
        let pool = if config.worker_threads > 0 {
            Some(
                ThreadPoolBuilder::new()
                    .num_threads(config.worker_threads)
                    .thread_name(|i| format!("strata-chunk-{i}"))
                    .build()
                    .map_err(|e| TerrainError::ThreadPool(e.to_string()))?,
            )
        } else {
            None
        };
        let mut store = Self {
            config,
            seed,
            field,
            chunks: HashMap::new(),
            center: ChunkCoord::new(0, 0),
            pool,
        };
        let t0 = Instant::now();
        let created = store.ensure_loaded(store.center)?;
        log::info!(
            target: "store",
            "initialized seed={} chunk_size={} window={} workers={}: {} chunks in {}us",
            store.seed,
            store.config.chunk_size,
            store.config.world_size_in_chunks,
            store.config.worker_threads,
            created,
            elapsed_us(t0)
        );
        Ok(store)
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    #[inline]
    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    #[inline]
    pub fn center(&self) -> ChunkCoord {
        self.center
    }

    /// Chunk containing world position `(wx, wz)`.
    #[inline]
    pub fn world_to_chunk_coordinate(&self, wx: f32, wz: f32) -> ChunkCoord {
        world_to_chunk_coordinate(&self.config, wx, wz)
    }

    /// Moves the window to the viewer's chunk and loads whatever is missing.
    pub fn tick(&mut self, viewer: Vec3) -> Result<TickReport, TerrainError> {
        let coord = self.world_to_chunk_coordinate(viewer.x, viewer.z);
        let center_changed = coord != self.center;
        let (created, timing) = self.load_window(coord)?;
        self.center = coord;
        Ok(TickReport {
            viewer_chunk: coord,
            center_changed,
            created,
            timing,
        })
    }

    /// Builds every absent chunk of the window around `center`; returns how many
    /// were added.
    pub fn ensure_loaded(&mut self, center: ChunkCoord) -> Result<usize, TerrainError> {
        self.load_window(center).map(|(created, _)| created)
    }

    fn load_window(&mut self, center: ChunkCoord) -> Result<(usize, ChunkTiming), TerrainError> {
        let window = center.window(self.config.window_half_width()).ok_or_else(|| {
            TerrainError::OutOfRange(format!("chunk window around ({}, {})", center.cx, center.cz))
        })?;
        let missing: Vec<ChunkCoord> = window
            .filter(|c| !self.chunks.contains_key(c))
            .collect();
        if missing.is_empty() {
            return Ok((0, ChunkTiming::default()));
        }
        let built = match &self.pool {
            Some(pool) => {
                let config = &self.config;
                let field = self.field.as_ref();
                pool.install(|| {
                    missing
                        .par_iter()
                        .map(|&c| Chunk::build(c, config, field))
                        .collect::<Result<Vec<_>, _>>()
                })?
            }
            None => missing
                .iter()
                .map(|&c| Chunk::build(c, &self.config, &self.field))
                .collect::<Result<Vec<_>, _>>()?,
        };
        let mut timing = ChunkTiming::default();
        for chunk in built {
            timing.gen_us += chunk.timing.gen_us;
            timing.mesh_us += chunk.timing.mesh_us;
            self.chunks.insert(chunk.coord, chunk);
        }
        log::debug!(
            target: "store",
            "window ({}, {}): +{} chunks, {} resident",
            center.cx,
            center.cz,
            missing.len(),
            self.chunks.len()
        );
        Ok((missing.len(), timing))
    }

    /// Regenerates one resident chunk in place. Returns `false` if it is not loaded.
    pub fn rebuild_chunk(&mut self, coord: ChunkCoord) -> Result<bool, TerrainError> {
        match self.chunks.get_mut(&coord) {
            Some(chunk) => {
                chunk.rebuild(&self.config, &self.field)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChunkCoord, &Chunk)> + '_ {
        self.chunks.iter()
    }
}

/// `floor(w / (chunk_size * cell_width))` on both axes.
pub fn world_to_chunk_coordinate(config: &WorldConfig, wx: f32, wz: f32) -> ChunkCoord {
    let size = config.chunk_world_size();
    ChunkCoord::new((wx / size).floor() as i32, (wz / size).floor() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_coordinates_floor_into_chunks() {
        let cfg = WorldConfig {
            chunk_size: 16,
            cell_width: 1.0,
            ..WorldConfig::default()
        };
        assert_eq!(world_to_chunk_coordinate(&cfg, 0.0, 0.0), ChunkCoord::new(0, 0));
        assert_eq!(world_to_chunk_coordinate(&cfg, 15.9, 16.0), ChunkCoord::new(0, 1));
        assert_eq!(world_to_chunk_coordinate(&cfg, -0.5, -16.0), ChunkCoord::new(-1, -1));
        assert_eq!(world_to_chunk_coordinate(&cfg, -16.01, 33.0), ChunkCoord::new(-2, 2));
    }

    #[test]
    fn cell_width_scales_chunk_extent() {
        let cfg = WorldConfig {
            chunk_size: 8,
            cell_width: 2.0,
            ..WorldConfig::default()
        };
        assert_eq!(world_to_chunk_coordinate(&cfg, 15.0, 16.0), ChunkCoord::new(0, 1));
    }
}
