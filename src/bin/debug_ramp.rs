//! Debug tool for inspecting tile colors
//! Renders the terrain ramp as a horizontal strip plus a categorical palette swatch

use image::{Rgb, RgbImage};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use voronoi_map::logging::init_logging;
use voronoi_map::palette::{categorical_color, ColorRamp};
use voronoi_map::render::save_image;

const WIDTH: u32 = 600;
const RAMP_HEIGHT: u32 = 60;
const SWATCH_HEIGHT: u32 = 20;
const MIN_VALUE: f64 = -60.0;
const MAX_VALUE: f64 = 60.0;

fn main() -> voronoi_map::Result<()> {
    init_logging(None);
    let ramp = ColorRamp::default();
    let mut img = RgbImage::new(WIDTH, RAMP_HEIGHT + SWATCH_HEIGHT);

    // Ramp strip, with a tick where the waterline falls
    for x in 0..WIDTH {
        let value = MIN_VALUE + (MAX_VALUE - MIN_VALUE) * x as f64 / (WIDTH - 1) as f64;
        let color: Rgb<u8> = ramp.color_at(value).into();
        for y in 0..RAMP_HEIGHT {
            img.put_pixel(x, y, color);
        }
    }
    let waterline_x = ((ramp.waterline - MIN_VALUE) / (MAX_VALUE - MIN_VALUE) * (WIDTH - 1) as f64) as u32;
    for y in 0..RAMP_HEIGHT / 4 {
        img.put_pixel(waterline_x, y, Rgb([0, 0, 0]));
    }

    // Palette swatch: one column per draw, so band widths show the weights
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut draws: Vec<_> = (0..WIDTH).map(|_| categorical_color(&mut rng)).collect();
    draws.sort_by_key(|c| c.channels());
    for (x, color) in draws.into_iter().enumerate() {
        for y in RAMP_HEIGHT..RAMP_HEIGHT + SWATCH_HEIGHT {
            img.put_pixel(x as u32, y, color.into());
        }
    }

    save_image(&img, "debug_ramp.png")
}
