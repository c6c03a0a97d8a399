use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::{Deserialize, Serialize};

/// Noise-seeded initial fill. Frequencies are in cycles per voxel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    pub seed: i32,
    pub frequency: f32,
    /// Samples with noise above this value start filled. Noise is in [-1, 1].
    pub threshold: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 1337,
            frequency: 0.08,
            threshold: 0.0,
        }
    }
}

pub struct TerrainSampler {
    noise: FastNoiseLite,
    threshold: f32,
}

impl TerrainSampler {
    pub fn new(params: &TerrainParams) -> Self {
        let mut noise = FastNoiseLite::with_seed(params.seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(params.frequency));
        Self {
            noise,
            threshold: params.threshold,
        }
    }

    /// Whether the sample at global voxel coordinates `(gx, gy)` starts filled.
    #[inline]
    pub fn filled(&self, gx: usize, gy: usize) -> bool {
        self.noise.get_noise_2d(gx as f32, gy as f32) > self.threshold
    }
}
