//! JSON export of generated tiles.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Canvas;
use crate::error::Result;
use crate::generator::Tile;
use crate::seeds::MapSeeds;

/// Everything needed to redraw a map without regenerating it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileExport {
    pub canvas: Canvas,
    pub master_seed: u64,
    pub noise_seed: u32,
    pub tiles: Vec<Tile>,
}

impl TileExport {
    pub fn new(canvas: Canvas, seeds: &MapSeeds, tiles: Vec<Tile>) -> Self {
        Self {
            canvas,
            master_seed: seeds.master,
            noise_seed: seeds.noise,
            tiles,
        }
    }
}

/// Write tiles as pretty-printed JSON.
pub fn export_tiles_json(export: &TileExport, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, export)?;
    info!(tiles = export.tiles.len(), "Exported tiles to {}", path.display());
    Ok(())
}

pub fn load_tiles_json(path: impl AsRef<Path>) -> Result<TileExport> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
