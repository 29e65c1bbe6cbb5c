use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rayon::prelude::*;
use tracing::{error, info};

use voronoi_map::export::{export_tiles_json, TileExport};
use voronoi_map::logging::init_logging;
use voronoi_map::render::{render_map, save_image};
use voronoi_map::{MapConfig, MapGenerator, MapRenderer, MapSeeds, RenderOptions, Result, VoronoiPartitioner};

#[derive(Parser, Debug)]
#[command(name = "voronoi_map")]
#[command(about = "Generate tiled Voronoi maps with spaced seeds and noise-driven colors")]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width of the map in pixels
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Height of the map in pixels
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Number of tiles
    #[arg(short, long)]
    tiles: Option<usize>,

    /// Draw a dot on each tile's seed
    #[arg(long)]
    show_centers: bool,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Color tiles by terrain noise instead of the fixed palette
    #[arg(long)]
    terrain: bool,

    /// Seed for the terrain noise (derived from --seed if not specified)
    #[arg(long)]
    noise_seed: Option<u32>,

    /// Noise coordinates per pixel
    #[arg(long)]
    noise_scale: Option<f64>,

    /// Noise layers summed per terrain sample
    #[arg(long)]
    noise_octaves: Option<u32>,

    /// Don't outline tiles
    #[arg(long)]
    no_borders: bool,

    /// Output image path
    #[arg(short, long, default_value = "voronoi_map.png")]
    output: PathBuf,

    /// Number of maps to generate; maps after the first use seed + index
    #[arg(long, default_value = "1")]
    maps: u64,

    /// Also write the tiles as JSON (batch runs add the index to the name)
    #[arg(long)]
    export_tiles: Option<PathBuf>,

    /// Log filter (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn apply_overrides(&self, config: &mut MapConfig) {
        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(h) = self.height {
            config.height = h;
        }
        if let Some(t) = self.tiles {
            config.tiles = t;
        }
        if self.show_centers {
            config.show_centers = true;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.terrain {
            config.terrain = true;
        }
        if let Some(noise_seed) = self.noise_seed {
            config.noise_seed = Some(noise_seed);
        }
        if let Some(scale) = self.noise_scale {
            config.noise_scale = scale;
        }
        if let Some(octaves) = self.noise_octaves {
            config.noise_octaves = octaves;
        }
        if self.no_borders {
            config.borders = false;
        }
    }
}

/// `map.png` -> `map_3.png` for batch member 3; single runs keep the name.
fn indexed_path(path: &Path, index: u64, total: u64) -> PathBuf {
    if total <= 1 {
        return path.to_path_buf();
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("map");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, index, ext),
        None => format!("{}_{}", stem, index),
    };
    path.with_file_name(name)
}

fn run_one(config: &MapConfig, generator: &MapGenerator, seeds: MapSeeds, index: u64, args: &Args) -> Result<()> {
    info!(index, %seeds, "Generating map");
    let renderer = MapRenderer::new(RenderOptions::from_config(config));
    let map = render_map(generator, &seeds, &VoronoiPartitioner, &renderer)?;

    save_image(&map.image, indexed_path(&args.output, index, args.maps))?;

    if let Some(ref tiles_path) = args.export_tiles {
        let export = TileExport::new(generator.canvas(), &seeds, map.tiles);
        export_tiles_json(&export, indexed_path(tiles_path, index, args.maps))?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };
    args.apply_overrides(&mut config);

    let generator = MapGenerator::new(&config)?;
    let base = config.seeds();
    info!(
        "Map size: {}x{}, {} tiles, min distance {:.3}",
        config.width,
        config.height,
        config.tiles,
        generator.min_distance()
    );

    // Independent runs: each owns its RNG and noise field
    (0..args.maps.max(1)).into_par_iter().try_for_each(|index| {
        let seeds = if index == 0 {
            base
        } else {
            MapSeeds::for_batch(base.master, index).with_noise(config.noise_seed)
        };
        run_one(&config, &generator, seeds, index, args)
    })
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_path() {
        let p = Path::new("out/map.png");
        assert_eq!(indexed_path(p, 0, 1), PathBuf::from("out/map.png"));
        assert_eq!(indexed_path(p, 3, 5), PathBuf::from("out/map_3.png"));
        assert_eq!(indexed_path(Path::new("tiles"), 2, 4), PathBuf::from("tiles_2"));
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from(["voronoi_map", "-W", "320", "--tiles", "40", "--terrain", "--no-borders"]);
        let mut config = MapConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.width, 320);
        assert_eq!(config.tiles, 40);
        assert!(config.terrain);
        assert!(!config.borders);
        // Untouched fields keep defaults
        assert_eq!(config.height, 600);
        assert_eq!(config.noise_octaves, 4);
    }

    #[test]
    fn test_noise_octaves_override() {
        let args = Args::parse_from(["voronoi_map", "--terrain", "--noise-octaves", "2"]);
        let mut config = MapConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.noise_octaves, 2);
        assert!(MapGenerator::new(&config).is_ok());
    }
}
