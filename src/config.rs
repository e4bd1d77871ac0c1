//! Terrain generation configuration.

use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::MAX_VERTICES;
use crate::terrain::{TerrainError, DEFAULT_HEIGHT_SPAN};

/// Errors that can occur while loading or saving a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Parameters for one terrain generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Number of vertices along each side of the grid (1-256).
    pub grid_size: usize,
    /// Number of random faults to apply.
    pub fault_count: usize,
    /// Total height span after normalization.
    pub height_span: f32,
    /// Random seed for reproducible generation.
    pub seed: u64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            grid_size: 2,
            fault_count: 0,
            height_span: DEFAULT_HEIGHT_SPAN,
            seed: 42,
        }
    }
}

impl TerrainConfig {
    /// Creates a configuration from signed user input.
    ///
    /// # Errors
    /// `InvalidArgument` if `grid_size < 1` or `fault_count < 0`.
    pub fn from_args(grid_size: i64, fault_count: i64) -> Result<Self, TerrainError> {
        let grid_size = usize::try_from(grid_size)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| {
                TerrainError::InvalidArgument(format!("grid size must be at least 1, got {}", grid_size))
            })?;
        let fault_count = usize::try_from(fault_count).map_err(|_| {
            TerrainError::InvalidArgument(format!("fault count must not be negative, got {}", fault_count))
        })?;

        Ok(Self {
            grid_size,
            fault_count,
            ..Default::default()
        })
    }

    /// A dense grid with many faults: sharp ridges and deep valleys.
    pub fn rugged(seed: u64) -> Self {
        Self {
            grid_size: 128,
            fault_count: 400,
            seed,
            ..Default::default()
        }
    }

    /// A coarser grid with few faults: broad, rolling terrain.
    pub fn gentle(seed: u64) -> Self {
        Self {
            grid_size: 64,
            fault_count: 40,
            height_span: 0.4,
            seed,
        }
    }

    /// Checks that every parameter is usable for generation.
    ///
    /// # Errors
    /// `InvalidArgument` for a zero grid size or a non-positive height span,
    /// `IndexOverflow` when the grid has more vertices than a 16-bit index
    /// can address.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.grid_size == 0 {
            return Err(TerrainError::InvalidArgument(
                "grid size must be at least 1".to_string(),
            ));
        }
        let vertices = self.grid_size.saturating_mul(self.grid_size);
        if vertices > MAX_VERTICES {
            return Err(TerrainError::IndexOverflow {
                vertices,
                max: MAX_VERTICES,
            });
        }
        if !(self.height_span.is_finite() && self.height_span > 0.0) {
            return Err(TerrainError::InvalidArgument(format!(
                "height span must be positive, got {}",
                self.height_span
            )));
        }
        Ok(())
    }

    /// Returns a random source seeded from this configuration.
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Loads a configuration file, falling back to defaults on any error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config {}: {}, using defaults", path.display(), e);
            Self::default()
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
