//! Voronoi tile map generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod logging;
pub mod noise_field;
pub mod palette;
pub mod partition;
pub mod render;
pub mod sampler;
pub mod seeds;

pub use config::{Canvas, MapConfig};
pub use error::{MapError, Result};
pub use generator::{Coloring, MapGenerator, Tile};
pub use noise_field::NoiseField;
pub use palette::{Color, ColorRamp};
pub use partition::{BisectorPartitioner, Region, RegionPartitioner, VoronoiPartitioner};
pub use render::{MapRenderer, RenderOptions};
pub use sampler::{PointSampler, Seed};
pub use seeds::MapSeeds;
