use std::ops::RangeInclusive;

use strata_blocks::{GROUND_BANDS, TerrainType};

use crate::error::TerrainError;
use crate::worldgen::WorldConfig;

/// Contiguous run of levels assigned to one ground band.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BandRange {
    pub terrain: TerrainType,
    pub levels: RangeInclusive<usize>,
}

/// Mapping from vertical level to ground band, plus the level percentiles used to
/// classify noise into heights. Built once per world and read-only afterwards.
#[derive(Clone, Debug)]
pub struct TerrainProfile {
    levels: usize,
    height_offset: usize,
    weights: Vec<f32>,
    level_weights: Vec<f32>,
    level_percentiles: Vec<f32>,
    type_percentiles: Vec<f32>,
    level_types: Vec<TerrainType>,
    water_level: usize,
}

impl TerrainProfile {
    pub fn validate_weights(weights: &[f32]) -> Result<(), TerrainError> {
        if weights.len() < 2 {
            return Err(TerrainError::config(format!(
                "need at least 2 terrain type weights, got {}",
                weights.len()
            )));
        }
        if weights.len() > GROUND_BANDS {
            return Err(TerrainError::config(format!(
                "at most {GROUND_BANDS} terrain type weights are supported, got {}",
                weights.len()
            )));
        }
        if let Some((i, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !(w.is_finite() && **w > 0.0))
        {
            return Err(TerrainError::config(format!(
                "terrain type weight {i} must be positive, got {w}"
            )));
        }
        Ok(())
    }

    pub fn build(weights: &[f32], levels: usize) -> Result<Self, TerrainError> {
        if levels < 1 {
            return Err(TerrainError::config("terrain levels must be at least 1"));
        }
        Self::validate_weights(weights)?;

        let level_weights = interpolate_level_weights(weights, levels);
        let level_percentiles = cumulative_percentiles(&level_weights);
        let type_percentiles = cumulative_percentiles(weights);

        let level_types: Vec<TerrainType> = (0..levels)
            .map(|level| {
                let ratio = if levels == 1 {
                    0.0
                } else {
                    level as f32 / (levels - 1) as f32
                };
                let band = type_percentiles
                    .iter()
                    .position(|&p| ratio <= p)
                    .unwrap_or(type_percentiles.len() - 1);
                TerrainType::ground_band(band)
            })
            .collect();

        let water_level = level_types
            .windows(2)
            .position(|w| w[0] == TerrainType::Sand && w[1] == TerrainType::LowGround)
            .map(|i| i + 1)
            .unwrap_or_else(|| {
                log::warn!(
                    "terrain weights {weights:?} over {levels} levels never move from sand to low ground; water level defaults to 0"
                );
                0
            });

        Ok(Self {
            levels,
            height_offset: 0,
            weights: weights.to_vec(),
            level_weights,
            level_percentiles,
            type_percentiles,
            level_types,
            water_level,
        })
    }

    pub fn from_config(config: &WorldConfig) -> Result<Self, TerrainError> {
        let mut profile = Self::build(&config.terrain_type_weights, config.terrain_levels)?;
        profile.height_offset = config.height_offset;
        Ok(profile)
    }

    #[inline]
    pub fn with_height_offset(mut self, height_offset: usize) -> Self {
        self.height_offset = height_offset;
        self
    }

    #[inline]
    pub fn levels(&self) -> usize {
        self.levels
    }

    #[inline]
    pub fn height_offset(&self) -> usize {
        self.height_offset
    }

    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[inline]
    pub fn level_weights(&self) -> &[f32] {
        &self.level_weights
    }

    #[inline]
    pub fn level_percentiles(&self) -> &[f32] {
        &self.level_percentiles
    }

    #[inline]
    pub fn type_percentiles(&self) -> &[f32] {
        &self.type_percentiles
    }

    /// Level at which the sand band gives way to low ground.
    #[inline]
    pub fn water_level(&self) -> usize {
        self.water_level
    }

    /// Grid row where water stops, i.e. `water_level` shifted by the height offset.
    #[inline]
    pub fn water_row(&self) -> i32 {
        (self.water_level + self.height_offset) as i32
    }

    /// Ground band for `level`. Levels outside `[0, levels)` clamp to the nearest end.
    #[inline]
    pub fn level_to_type(&self, level: i32) -> TerrainType {
        let clamped = level.clamp(0, self.levels as i32 - 1) as usize;
        self.level_types[clamped]
    }

    /// Smallest level whose cumulative percentile covers `noise`.
    #[inline]
    pub fn level_for_noise(&self, noise: f32) -> Option<usize> {
        self.level_percentiles.iter().position(|&p| noise <= p)
    }

    pub fn band_ranges(&self) -> Vec<BandRange> {
        let mut out: Vec<BandRange> = Vec::new();
        for (level, &terrain) in self.level_types.iter().enumerate() {
            match out.last_mut() {
                Some(band) if band.terrain == terrain => {
                    band.levels = *band.levels.start()..=level;
                }
                _ => out.push(BandRange {
                    terrain,
                    levels: level..=level,
                }),
            }
        }
        out
    }
}

/// Spreads the band weights over `levels` anchors and blends every level between the
/// first anchor at or above it and the anchor before that one.
fn interpolate_level_weights(weights: &[f32], levels: usize) -> Vec<f32> {
    let n = weights.len();
    let mut out = vec![0.0f32; levels];
    out[0] = weights[0];
    if levels == 1 {
        return out;
    }
    let scale = (levels - 1) as f32 / (n - 1) as f32;
    let anchors: Vec<f32> = (0..n).map(|i| i as f32 * scale).collect();
    for (level, slot) in out.iter_mut().enumerate().skip(1) {
        let l = level as f32;
        // anchors[0] == 0 < l, so the upper anchor is never the first one
        let j = anchors
            .iter()
            .position(|&a| l <= a)
            .unwrap_or(n - 1)
            .max(1);
        let big_dist = (l - anchors[j]).abs();
        let small_dist = (l - anchors[j - 1]).abs();
        *slot = (weights[j] * big_dist + weights[j - 1] * small_dist) / (big_dist + small_dist);
    }
    out
}

/// Running sum divided by the total; the final entry is pinned to exactly 1.0.
fn cumulative_percentiles(weights: &[f32]) -> Vec<f32> {
    let total: f64 = weights.iter().map(|&w| f64::from(w)).sum();
    let mut acc = 0.0f64;
    let mut out: Vec<f32> = weights
        .iter()
        .map(|&w| {
            acc += f64::from(w);
            (acc / total) as f32
        })
        .collect();
    if let Some(last) = out.last_mut() {
        *last = 1.0;
    }
    out
}
