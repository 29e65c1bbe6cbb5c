//! Greedy rejection sampling of seed points with a minimum separation.
//!
//! Candidates are drawn uniformly over the canvas and kept only when they are
//! at least `min_distance` away from every seed accepted so far. There is no
//! spatial index, so each attempt costs one distance check per accepted seed.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{Canvas, DEFAULT_ATTEMPTS_PER_SEED};
use crate::error::{MapError, Result};

/// A sampled point anchoring one map region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed {
    pub x: u32,
    pub y: u32,
}

impl Seed {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Seed) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn as_f64(&self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }
}

/// Places seeds one at a time, giving up after a fixed attempt budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointSampler {
    attempts_per_seed: usize,
}

impl Default for PointSampler {
    fn default() -> Self {
        Self {
            attempts_per_seed: DEFAULT_ATTEMPTS_PER_SEED,
        }
    }
}

impl PointSampler {
    pub fn new(attempts_per_seed: usize) -> Self {
        Self {
            attempts_per_seed: attempts_per_seed.max(1),
        }
    }

    /// Total attempts allowed when asking for `count` seeds.
    pub fn attempt_budget(&self, count: usize) -> usize {
        self.attempts_per_seed.saturating_mul(count)
    }

    /// Draw `count` seeds inside `canvas`, no two closer than `min_distance`.
    ///
    /// Seeds are returned in acceptance order. A candidate exactly
    /// `min_distance` away from an existing seed is accepted. Fails with
    /// [`MapError::Unsatisfiable`] once the attempt budget is spent, or as soon
    /// as every pixel already holds a seed.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        canvas: Canvas,
        min_distance: f64,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Seed>> {
        let budget = self.attempt_budget(count);
        let mut seeds: Vec<Seed> = Vec::with_capacity(count.min(canvas.area() as usize));
        let mut attempts = 0usize;

        while seeds.len() < count {
            // A positive separation keeps seeds on distinct pixels
            if min_distance > 0.0 && seeds.len() as u64 >= canvas.area() {
                warn!(placed = seeds.len(), requested = count, attempts, "canvas has no free pixel left");
                return Err(unsatisfiable(seeds.len(), count));
            }
            if attempts >= budget {
                warn!(
                    placed = seeds.len(),
                    requested = count,
                    attempts,
                    "seed sampler exhausted its attempt budget"
                );
                return Err(unsatisfiable(seeds.len(), count));
            }
            attempts += 1;

            let candidate = Seed::new(
                rng.gen_range(0..canvas.width()),
                rng.gen_range(0..canvas.height()),
            );
            if !too_close(&candidate, &seeds, min_distance) {
                seeds.push(candidate);
            }
        }

        debug!(
            seeds = seeds.len(),
            attempts,
            rejected = attempts - seeds.len(),
            "seed sampling finished"
        );
        Ok(seeds)
    }
}

fn unsatisfiable(placed: usize, requested: usize) -> MapError {
    MapError::Unsatisfiable { placed, requested }
}

fn too_close(candidate: &Seed, seeds: &[Seed], min_distance: f64) -> bool {
    seeds.iter().any(|s| candidate.distance(s) < min_distance)
}
