use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use strata_world::{WorldConfig, load_config_from_path};

#[derive(Parser, Debug)]
#[command(name = "strata", version, about = "Layered voxel terrain generator")]
pub struct Cli {
    /// World config TOML; built-in defaults when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[arg(long, global = true)]
    pub seed: Option<u32>,
    #[arg(long, global = true)]
    pub chunk_size: Option<usize>,
    /// Streamed window width in chunks.
    #[arg(long, global = true)]
    pub window: Option<usize>,
    /// Also write debug-level logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the level-to-band table, percentiles and water level.
    Profile,
    /// Generate and mesh the whole non-chunked region.
    World {
        /// Sample columns on the rayon pool.
        #[arg(long)]
        parallel: bool,
    },
    /// Walk a viewer across the world and report chunk streaming per tick.
    Stream {
        #[arg(long, default_value = "0,0")]
        from: WorldPoint,
        #[arg(long)]
        to: WorldPoint,
        #[arg(long, default_value_t = 8)]
        steps: usize,
    },
    /// Print the effective configuration as TOML.
    Config,
}

/// `X,Z` world position on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldPoint {
    pub x: f32,
    pub z: f32,
}

impl WorldPoint {
    pub fn lerp(self, other: WorldPoint, t: f32) -> WorldPoint {
        WorldPoint {
            x: self.x + (other.x - self.x) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

impl FromStr for WorldPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, z) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Z but got '{s}'"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f32>()
                .map_err(|e| format!("bad coordinate '{v}': {e}"))
        };
        Ok(WorldPoint {
            x: parse(x)?,
            z: parse(z)?,
        })
    }
}

impl Cli {
    /// File (or defaults) with command-line overrides applied, then validated.
    pub fn world_config(&self) -> anyhow::Result<WorldConfig> {
        let mut config = match &self.config {
            Some(path) => load(path)?,
            None => WorldConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if let Some(window) = self.window {
            config.world_size_in_chunks = window;
        }
        config.validate().context("invalid world configuration")?;
        Ok(config)
    }
}

fn load(path: &Path) -> anyhow::Result<WorldConfig> {
    load_config_from_path(path).with_context(|| format!("loading world config {}", path.display()))
}
