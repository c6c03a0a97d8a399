use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::terrain::TerrainParams;

/// Map construction parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Side length of the whole map in map-local units, centered on the origin.
    pub size: f32,
    /// Voxels per chunk side.
    pub voxel_resolution: usize,
    /// Chunks per map side.
    pub chunk_resolution: usize,
    /// Noise-seeded initial fill; all voxels start empty when absent.
    pub terrain: Option<TerrainParams>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: 2.0,
            voxel_resolution: 8,
            chunk_resolution: 2,
            terrain: None,
        }
    }
}

impl MapConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MapConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| format!("reading map config {}: {}", path.display(), e))?;
        Self::from_toml_str(&s)
    }

    /// Rejects values `VoxelMap::new` treats as programming errors.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(format!("size must be a positive number, got {}", self.size).into());
        }
        if self.voxel_resolution == 0 {
            return Err("voxel_resolution must be at least 1".into());
        }
        if self.chunk_resolution == 0 {
            return Err("chunk_resolution must be at least 1".into());
        }
        if let Some(t) = &self.terrain {
            if !t.frequency.is_finite() {
                return Err("terrain.frequency must be finite".into());
            }
        }
        Ok(())
    }

    #[inline]
    pub fn chunk_size(&self) -> f32 {
        self.size / self.chunk_resolution as f32
    }

    #[inline]
    pub fn voxel_size(&self) -> f32 {
        self.chunk_size() / self.voxel_resolution as f32
    }

    #[inline]
    pub fn half_size(&self) -> f32 {
        self.size * 0.5
    }

    /// Voxels per map side.
    #[inline]
    pub fn total_resolution(&self) -> usize {
        self.chunk_resolution * self.voxel_resolution
    }
}
