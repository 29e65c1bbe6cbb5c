//! Seed management for map generation
//!
//! Seed placement and the terrain noise field each get their own seed, derived
//! from a single master seed, so either can be pinned while the other varies.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for one generation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// RNG stream for seed placement and categorical colors
    pub placement: u64,
    /// Noise field seed for terrain coloring
    pub noise: u32,
}

impl MapSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            placement: derive_seed(master, "placement"),
            noise: derive_seed(master, "noise") as u32,
        }
    }

    /// Replace the derived noise seed when one is pinned.
    pub fn with_noise(self, noise: Option<u32>) -> Self {
        match noise {
            Some(noise) => Self { noise, ..self },
            None => self,
        }
    }

    /// Seeds for the `index`-th map of a batch that shares one master seed.
    pub fn for_batch(master: u64, index: u64) -> Self {
        Self::from_master(master.wrapping_add(index))
    }
}

impl Default for MapSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

/// Derive a sub-seed from a master seed and a system name.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    system.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for MapSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MapSeeds {{ master: {}, placement: {}, noise: {} }}",
            self.master, self.placement, self.noise,
        )
    }
}
