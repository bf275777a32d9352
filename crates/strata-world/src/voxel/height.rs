use std::sync::Arc;

use crate::error::TerrainError;
use crate::worldgen::WorldConfig;

use super::noise::{NoiseOffsets, NoiseSampler, PerlinSampler};
use super::profile::TerrainProfile;

/// Fractal shaping applied when layering noise octaves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractalSettings {
    pub scale: f32,
    pub octaves: usize,
    pub persistence: f32,
    pub lacunarity: f32,
}

impl FractalSettings {
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            scale: config.noise_scale,
            octaves: config.octaves,
            persistence: config.persistence,
            lacunarity: config.lacunarity,
        }
    }

    /// One octave at `scale`; samples `(x*scale + xo, z*scale + zo)` directly.
    pub fn single(scale: f32) -> Self {
        Self {
            scale,
            octaves: 1,
            persistence: 1.0,
            lacunarity: 1.0,
        }
    }
}

struct Octave {
    frequency: f32,
    amplitude: f32,
    x_offset: f32,
    z_offset: f32,
}

/// Converts `(x, z)` columns into ground heights using layered noise and the
/// profile's level percentiles.
pub struct HeightField {
    profile: Arc<TerrainProfile>,
    sampler: Arc<dyn NoiseSampler>,
    octaves: Vec<Octave>,
}

impl HeightField {
    /// Octave count is the smaller of `fractal.octaves` and the offsets supplied.
    pub fn new(
        profile: Arc<TerrainProfile>,
        sampler: Arc<dyn NoiseSampler>,
        offsets: &NoiseOffsets,
        fractal: FractalSettings,
    ) -> Self {
        let octaves = offsets
            .iter()
            .take(fractal.octaves)
            .enumerate()
            .map(|(i, (x_offset, z_offset))| Octave {
                frequency: fractal.scale * fractal.lacunarity.powi(i as i32),
                amplitude: fractal.persistence.powi(i as i32),
                x_offset,
                z_offset,
            })
            .collect();
        Self {
            profile,
            sampler,
            octaves,
        }
    }

    /// Perlin sampler and offsets derived from `seed`, shaping from `config`.
    pub fn from_seed(config: &WorldConfig, profile: Arc<TerrainProfile>, seed: u32) -> Self {
        let offsets = NoiseOffsets::from_seed(seed, config.octaves);
        Self::new(
            profile,
            Arc::new(PerlinSampler::new(seed)),
            &offsets,
            FractalSettings::from_config(config),
        )
    }

    #[inline]
    pub fn profile(&self) -> &TerrainProfile {
        &self.profile
    }

    #[inline]
    pub fn profile_arc(&self) -> &Arc<TerrainProfile> {
        &self.profile
    }

    #[inline]
    pub fn octave_count(&self) -> usize {
        self.octaves.len()
    }

    /// Layered noise folded to `[0, 1]`: each octave maps its sample to `[-1, 1]`,
    /// the weighted sum is clamped to `[-1, 1]`, and the absolute value is taken.
    pub fn noise_value(&self, x: i32, z: i32) -> f32 {
        let fx = x as f32;
        let fz = z as f32;
        let total: f32 = self
            .octaves
            .iter()
            .map(|o| {
                let v = self
                    .sampler
                    .sample(fx * o.frequency + o.x_offset, fz * o.frequency + o.z_offset);
                (v * 2.0 - 1.0) * o.amplitude
            })
            .sum();
        total.clamp(-1.0, 1.0).abs()
    }

    /// Ground height in `[height_offset, levels - 1 + height_offset]`.
    pub fn ground_height(&self, x: i32, z: i32) -> Result<i32, TerrainError> {
        let noise = self.noise_value(x, z);
        let level = self.profile.level_for_noise(noise).ok_or_else(|| {
            TerrainError::InvariantViolation(format!(
                "noise {noise} at ({x}, {z}) fell outside every level percentile"
            ))
        })?;
        Ok((level + self.profile.height_offset()) as i32)
    }
}
