use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::TerrainError;
use crate::voxel::TerrainProfile;

/// Everything fixed at world-init. Assembled once and passed by reference to every
/// component that needs it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// `None` picks a random seed at init (see [`WorldConfig::with_resolved_seed`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(default = "default_grid_x_length")]
    pub grid_x_length: usize,
    #[serde(default = "default_grid_z_length")]
    pub grid_z_length: usize,
    #[serde(default = "default_terrain_levels")]
    pub terrain_levels: usize,
    #[serde(default = "default_height_offset")]
    pub height_offset: usize,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_world_size_in_chunks")]
    pub world_size_in_chunks: usize,
    #[serde(default = "default_cell_width")]
    pub cell_width: f32,
    #[serde(default = "default_cell_height")]
    pub cell_height: f32,
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f32,
    #[serde(default = "default_octaves")]
    pub octaves: usize,
    #[serde(default = "default_persistence")]
    pub persistence: f32,
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f32,
    #[serde(default = "default_weights")]
    pub terrain_type_weights: Vec<f32>,
    #[serde(default)]
    pub parallel_columns: bool,
    #[serde(default)]
    pub worker_threads: usize,
}

fn default_grid_x_length() -> usize {
    150
}
fn default_grid_z_length() -> usize {
    270
}
fn default_terrain_levels() -> usize {
    50
}
fn default_height_offset() -> usize {
    1
}
fn default_chunk_size() -> usize {
    16
}
fn default_world_size_in_chunks() -> usize {
    5
}
fn default_cell_width() -> f32 {
    1.0
}
fn default_cell_height() -> f32 {
    0.5
}
fn default_noise_scale() -> f32 {
    0.01
}
fn default_octaves() -> usize {
    1
}
fn default_persistence() -> f32 {
    0.5
}
fn default_lacunarity() -> f32 {
    2.0
}
fn default_weights() -> Vec<f32> {
    vec![1.0, 1.0, 3.0, 6.0, 5.0]
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            grid_x_length: default_grid_x_length(),
            grid_z_length: default_grid_z_length(),
            terrain_levels: default_terrain_levels(),
            height_offset: default_height_offset(),
            chunk_size: default_chunk_size(),
            world_size_in_chunks: default_world_size_in_chunks(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            noise_scale: default_noise_scale(),
            octaves: default_octaves(),
            persistence: default_persistence(),
            lacunarity: default_lacunarity(),
            terrain_type_weights: default_weights(),
            parallel_columns: false,
            worker_threads: 0,
        }
    }
}

impl WorldConfig {
    /// Rows per column: every terrain level plus the offset rows beneath level 0.
    #[inline]
    pub fn grid_height(&self) -> usize {
        self.terrain_levels + self.height_offset
    }

    /// Half-width of the streamed chunk window around the viewer.
    #[inline]
    pub fn window_half_width(&self) -> i32 {
        (self.world_size_in_chunks / 2) as i32
    }

    /// World-space length of one chunk side.
    #[inline]
    pub fn chunk_world_size(&self) -> f32 {
        self.chunk_size as f32 * self.cell_width
    }

    /// Pins the seed so every component built from this config agrees on it.
    pub fn with_resolved_seed(mut self) -> Self {
        if self.seed.is_none() {
            let seed = rand::random::<u32>();
            log::warn!("no world seed configured; using random seed {seed}");
            self.seed = Some(seed);
        }
        self
    }

    pub fn from_toml_str(s: &str, origin: &str) -> Result<Self, TerrainError> {
        let cfg: WorldConfig = toml::from_str(s).map_err(|source| TerrainError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), TerrainError> {
        fn positive(name: &str, v: usize) -> Result<(), TerrainError> {
            if v == 0 {
                return Err(TerrainError::config(format!("{name} must be at least 1")));
            }
            if i32::try_from(v).is_err() {
                return Err(TerrainError::config(format!("{name} must fit in i32, got {v}")));
            }
            Ok(())
        }
        fn positive_f(name: &str, v: f32) -> Result<(), TerrainError> {
            if !(v.is_finite() && v > 0.0) {
                return Err(TerrainError::config(format!(
                    "{name} must be a positive finite number, got {v}"
                )));
            }
            Ok(())
        }
        positive("grid_x_length", self.grid_x_length)?;
        positive("grid_z_length", self.grid_z_length)?;
        positive("terrain_levels", self.terrain_levels)?;
        positive("chunk_size", self.chunk_size)?;
        positive("world_size_in_chunks", self.world_size_in_chunks)?;
        positive("octaves", self.octaves)?;
        positive_f("cell_width", self.cell_width)?;
        positive_f("cell_height", self.cell_height)?;
        positive_f("noise_scale", self.noise_scale)?;
        positive_f("persistence", self.persistence)?;
        positive_f("lacunarity", self.lacunarity)?;
        TerrainProfile::validate_weights(&self.terrain_type_weights)?;
        Ok(())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldConfig, TerrainError> {
    let s = fs::read_to_string(path).map_err(|source| TerrainError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    WorldConfig::from_toml_str(&s, &path.display().to_string())
}
