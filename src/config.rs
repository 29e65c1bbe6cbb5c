//! Run configuration: canvas size, tile count, coloring mode and seeds.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::noise_field::DEFAULT_OCTAVES;
use crate::seeds::MapSeeds;

/// Default attempt budget per requested seed before the sampler gives up.
pub const DEFAULT_ATTEMPTS_PER_SEED: usize = 10_000;

/// Immutable drawing area in pixels. Both sides are always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCanvas")]
pub struct Canvas {
    width: u32,
    height: u32,
}

/// Unchecked canvas as it appears in JSON.
#[derive(Deserialize)]
struct RawCanvas {
    width: u32,
    height: u32,
}

impl TryFrom<RawCanvas> for Canvas {
    type Error = MapError;

    fn try_from(raw: RawCanvas) -> Result<Self> {
        Canvas::new(raw.width, raw.height)
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MapError::InvalidConfig(format!(
                "canvas must be non-empty, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels on the canvas.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Corners of the canvas, counter-clockwise starting at the origin.
    pub fn corners(&self) -> [(f64, f64); 4] {
        let (w, h) = (self.width as f64, self.height as f64);
        [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)]
    }

    /// Minimum seed separation for `tiles` seeds: `sqrt(min(width, height) / tiles)`.
    pub fn min_distance(&self, tiles: usize) -> Result<f64> {
        if tiles == 0 {
            return Err(MapError::InvalidConfig(
                "tile count must be positive".to_string(),
            ));
        }
        let short_side = self.width.min(self.height) as f64;
        Ok((short_side / tiles as f64).sqrt())
    }
}

/// All settings for one map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: u32,
    pub height: u32,
    /// Number of tiles (seeds) to place
    pub tiles: usize,
    /// Draw a marker on every seed
    pub show_centers: bool,
    /// Master seed; random when absent
    pub seed: Option<u64>,
    /// Color tiles from the noise field instead of the categorical palette
    pub terrain: bool,
    /// Overrides the noise seed derived from `seed`
    pub noise_seed: Option<u32>,
    /// Multiplier applied to seed coordinates before sampling noise
    pub noise_scale: f64,
    /// Noise layers summed per sample
    pub noise_octaves: u32,
    /// Outline every region in black
    pub borders: bool,
    pub attempts_per_seed: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            tiles: 200,
            show_centers: false,
            seed: None,
            terrain: false,
            noise_seed: None,
            noise_scale: 0.01,
            noise_octaves: DEFAULT_OCTAVES,
            borders: true,
            attempts_per_seed: DEFAULT_ATTEMPTS_PER_SEED,
        }
    }
}

impl MapConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: MapConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Save the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Reject settings the generator cannot work with.
    pub fn validate(&self) -> Result<()> {
        Canvas::new(self.width, self.height)?;
        if self.tiles == 0 {
            return Err(MapError::InvalidConfig(
                "tile count must be positive".to_string(),
            ));
        }
        if !self.noise_scale.is_finite() || self.noise_scale <= 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "noise scale must be a positive number, got {}",
                self.noise_scale
            )));
        }
        if self.noise_octaves == 0 {
            return Err(MapError::InvalidConfig(
                "noise octaves must be positive".to_string(),
            ));
        }
        if self.attempts_per_seed == 0 {
            return Err(MapError::InvalidConfig(
                "attempts per seed must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn canvas(&self) -> Result<Canvas> {
        Canvas::new(self.width, self.height)
    }

    /// Seeds for this run: derived from `seed` (random if unset), with
    /// `noise_seed` taking precedence for the noise field.
    pub fn seeds(&self) -> MapSeeds {
        let master = self.seed.unwrap_or_else(rand::random);
        MapSeeds::from_master(master).with_noise(self.noise_seed)
    }
}
