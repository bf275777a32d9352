use fastnoise_lite::{FastNoiseLite, NoiseType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic 2D noise in `[0, 1]`.
pub trait NoiseSampler: Send + Sync {
    fn sample(&self, x: f32, z: f32) -> f32;
}

impl<F> NoiseSampler for F
where
    F: Fn(f32, f32) -> f32 + Send + Sync,
{
    #[inline]
    fn sample(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// Single-octave Perlin noise. Octaves are layered by `HeightField`, so the
/// generator itself runs without fractal shaping at unit frequency.
pub struct PerlinSampler {
    noise: FastNoiseLite,
}

impl PerlinSampler {
    pub fn new(seed: u32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::Perlin));
        noise.set_frequency(Some(1.0));
        Self { noise }
    }
}

impl NoiseSampler for PerlinSampler {
    #[inline]
    fn sample(&self, x: f32, z: f32) -> f32 {
        ((self.noise.get_noise_2d(x, z) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Per-octave sampling offsets drawn once per world seed.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseOffsets {
    offsets: Vec<(f32, f32)>,
}

impl NoiseOffsets {
    pub const RANGE: f32 = 10_000.0;

    pub fn from_seed(seed: u32, octaves: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(seed));
        let offsets = (0..octaves)
            .map(|_| {
                let x = rng.gen_range(-Self::RANGE..Self::RANGE);
                let z = rng.gen_range(-Self::RANGE..Self::RANGE);
                (x, z)
            })
            .collect();
        Self { offsets }
    }

    /// Fixed offsets, mostly for tests that need to line samples up exactly.
    pub fn fixed(offsets: Vec<(f32, f32)>) -> Self {
        Self { offsets }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.offsets.iter().copied()
    }
}
