//! Tile generation: seed placement followed by per-seed coloring.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{Canvas, MapConfig};
use crate::error::Result;
use crate::noise_field::NoiseField;
use crate::palette::{categorical_color, Color, ColorRamp};
use crate::sampler::{PointSampler, Seed};
use crate::seeds::MapSeeds;

/// A seed with its resolved display color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub seed: Seed,
    pub color: Color,
}

/// How tiles get their colors.
#[derive(Clone, Debug)]
pub enum Coloring {
    /// Weighted draw from the fixed three-color palette
    Categorical,
    /// Noise sampled at the seed, mapped through the water/land ramp
    Terrain {
        field: NoiseField,
        ramp: ColorRamp,
        scale: f64,
    },
}

impl Coloring {
    fn color<R: Rng + ?Sized>(&self, seed: Seed, rng: &mut R) -> Color {
        match self {
            Coloring::Categorical => categorical_color(rng),
            Coloring::Terrain { field, ramp, scale } => ramp.color_for(seed, field, *scale),
        }
    }
}

/// Validated settings for producing tiles. Reusable across runs.
#[derive(Clone, Debug)]
pub struct MapGenerator {
    canvas: Canvas,
    tiles: usize,
    min_distance: f64,
    sampler: PointSampler,
    terrain: bool,
    noise_scale: f64,
    noise_octaves: u32,
    ramp: ColorRamp,
}

impl MapGenerator {
    pub fn new(config: &MapConfig) -> Result<Self> {
        config.validate()?;
        let canvas = config.canvas()?;
        let min_distance = canvas.min_distance(config.tiles)?;

        Ok(Self {
            canvas,
            tiles: config.tiles,
            min_distance,
            sampler: PointSampler::new(config.attempts_per_seed),
            terrain: config.terrain,
            noise_scale: config.noise_scale,
            noise_octaves: config.noise_octaves,
            ramp: ColorRamp::default(),
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Coloring mode for a run using the given noise seed.
    pub fn coloring(&self, noise_seed: u32) -> Coloring {
        if self.terrain {
            Coloring::Terrain {
                field: NoiseField::new(noise_seed).with_octaves(self.noise_octaves),
                ramp: self.ramp,
                scale: self.noise_scale,
            }
        } else {
            Coloring::Categorical
        }
    }

    /// Generate tiles for one run. Each call owns a fresh RNG and noise field.
    pub fn generate(&self, seeds: &MapSeeds) -> Result<Vec<Tile>> {
        let mut rng = ChaCha8Rng::seed_from_u64(seeds.placement);
        let coloring = self.coloring(seeds.noise);
        self.generate_with(&mut rng, &coloring)
    }

    /// Generate tiles drawing all randomness from `rng`.
    ///
    /// All seeds are placed before any is colored; tiles keep acceptance order.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, coloring: &Coloring) -> Result<Vec<Tile>> {
        info!(
            width = self.canvas.width(),
            height = self.canvas.height(),
            tiles = self.tiles,
            min_distance = self.min_distance,
            "Creating tiles"
        );
        let seeds = self.sampler.sample(self.canvas, self.min_distance, self.tiles, rng)?;

        let tiles: Vec<Tile> = seeds
            .into_iter()
            .map(|seed| Tile {
                seed,
                color: coloring.color(seed, rng),
            })
            .collect();

        Ok(tiles)
    }
}
