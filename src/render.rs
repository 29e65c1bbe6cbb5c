//! Rasterizes partitioned tiles into an RGB image and writes it to disk.

use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_polygon_mut, draw_polygon_mut};
use imageproc::point::Point;
use tracing::info;

use crate::config::{Canvas, MapConfig};
use crate::error::{MapError, Result};
use crate::generator::{MapGenerator, Tile};
use crate::palette::Color;
use crate::partition::{Region, RegionPartitioner};
use crate::seeds::MapSeeds;

/// Drawing options for a map image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    /// Fill for any pixel no region reaches (rounding gaps at edges)
    pub background: Color,
    /// Outline color for regions, `None` for no outlines
    pub border: Option<Color>,
    /// Draw a dot on every seed
    pub show_centers: bool,
    pub marker_radius: i32,
    pub marker_color: Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            border: Some(Color::BLACK),
            show_centers: false,
            marker_radius: 2,
            marker_color: Color::BLACK,
        }
    }
}

impl RenderOptions {
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            border: config.borders.then_some(Color::BLACK),
            show_centers: config.show_centers,
            ..Default::default()
        }
    }
}

/// Draws tiles and their regions onto a fresh canvas.
#[derive(Clone, Copy, Debug, Default)]
pub struct MapRenderer {
    pub options: RenderOptions,
}

impl MapRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render `tiles` using the region with the same seed at the same index.
    pub fn render(&self, canvas: Canvas, tiles: &[Tile], regions: &[Region]) -> Result<RgbImage> {
        if tiles.len() != regions.len() {
            return Err(MapError::Render(format!(
                "{} regions for {} tiles",
                regions.len(),
                tiles.len()
            )));
        }

        let mut img = RgbImage::from_pixel(canvas.width(), canvas.height(), self.options.background.into());

        for (tile, region) in tiles.iter().zip(regions) {
            if tile.seed != region.seed {
                return Err(MapError::Render(format!(
                    "region for ({}, {}) found at the slot of ({}, {})",
                    region.seed.x, region.seed.y, tile.seed.x, tile.seed.y
                )));
            }
            let poly = pixel_polygon(&region.polygon);
            if poly.len() >= 3 {
                draw_polygon_mut(&mut img, &poly, Rgb::from(tile.color));
            }
        }

        // Outlines after all fills so neighbours don't paint over them
        if let Some(border) = self.options.border {
            for region in regions {
                let outline: Vec<Point<f32>> = region
                    .polygon
                    .iter()
                    .map(|&(x, y)| Point::new(x as f32, y as f32))
                    .collect();
                if outline.len() >= 3 {
                    draw_hollow_polygon_mut(&mut img, &outline, Rgb::from(border));
                }
            }
        }

        if self.options.show_centers {
            for tile in tiles {
                draw_filled_circle_mut(
                    &mut img,
                    (tile.seed.x as i32, tile.seed.y as i32),
                    self.options.marker_radius,
                    Rgb::from(self.options.marker_color),
                );
            }
        }

        Ok(img)
    }
}

/// Round polygon vertices to pixels, dropping repeats and the closing vertex.
fn pixel_polygon(polygon: &[(f64, f64)]) -> Vec<Point<i32>> {
    let mut out: Vec<Point<i32>> = Vec::with_capacity(polygon.len());
    for &(x, y) in polygon {
        let p = Point::new(x.round() as i32, y.round() as i32);
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

/// Save an image; the format follows the file extension.
pub fn save_image(img: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    img.save(path)?;
    info!("Voronoi map has been saved in: {}", path.display());
    Ok(())
}

/// Tiles together with their rendered image.
pub struct RenderedMap {
    pub tiles: Vec<Tile>,
    pub image: RgbImage,
}

/// Generate, partition and draw one map.
pub fn render_map(
    generator: &MapGenerator,
    seeds: &MapSeeds,
    partitioner: &dyn RegionPartitioner,
    renderer: &MapRenderer,
) -> Result<RenderedMap> {
    let tiles = generator.generate(seeds)?;

    info!("Creating Voronoi diagram");
    let canvas = generator.canvas();
    let centers: Vec<_> = tiles.iter().map(|t| t.seed).collect();
    let regions = partitioner.partition(canvas, &centers)?;

    info!("Creating image");
    let image = renderer.render(canvas, &tiles, &regions)?;
    Ok(RenderedMap { tiles, image })
}
