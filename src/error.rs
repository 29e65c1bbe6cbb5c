//! Error type shared by every stage of map generation.

/// Errors that can occur while generating, partitioning, rendering or saving a map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// Width, height, tile count or another setting is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The sampler could not place every seed within its attempt budget.
    #[error("could only place {placed} of {requested} seeds")]
    Unsatisfiable { placed: usize, requested: usize },

    /// The region partitioner could not produce one region per seed.
    #[error("partition failed: {0}")]
    Partition(String),

    /// Tiles and regions handed to the renderer don't line up.
    #[error("render failed: {0}")]
    Render(String),

    /// Image encoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem error while reading config or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config or tile export (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;
