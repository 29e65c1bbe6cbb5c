//! Tile colors: the two-band terrain ramp and the categorical palette.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::noise_field::NoiseField;
use crate::sampler::Seed;

/// An RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    // Terrain ramp endpoints
    pub const DARK_BLUE: Color = Color::new(0, 0, 139);
    pub const LIGHT_BLUE: Color = Color::new(135, 206, 250);
    pub const LIGHT_GREEN: Color = Color::new(144, 238, 144);
    pub const DARK_GREEN: Color = Color::new(0, 100, 0);

    // Categorical palette
    pub const YELLOW_GREEN: Color = Color::new(154, 205, 50);
    pub const ROYAL_BLUE: Color = Color::new(65, 105, 225);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(c: Color) -> Self {
        image::Rgb(c.channels())
    }
}

/// Linearly interpolate between two colors, clamping `t` to [0, 1].
pub fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Color::new(channel(a.r, b.r), channel(a.g, b.g), channel(a.b, b.b))
}

/// Two-band water/land gradient over the noise domain.
///
/// Values at or below the waterline run dark blue to light blue; values above
/// it run light green to dark green. The land band's denominator is
/// `max - 1 - waterline`, so the top of the land band saturates just before `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRamp {
    pub min: f64,
    pub max: f64,
    pub waterline: f64,
    pub deep_water: Color,
    pub shallow_water: Color,
    pub lowland: Color,
    pub highland: Color,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            min: -50.0,
            max: 50.0,
            waterline: -10.0,
            deep_water: Color::DARK_BLUE,
            shallow_water: Color::LIGHT_BLUE,
            lowland: Color::LIGHT_GREEN,
            highland: Color::DARK_GREEN,
        }
    }
}

impl ColorRamp {
    /// Color for a raw noise value. Out-of-range values are clamped first.
    pub fn color_at(&self, value: f64) -> Color {
        let value = value.clamp(self.min, self.max);
        if value <= self.waterline {
            let ratio = (value - self.min) / (self.waterline - self.min);
            lerp_color(self.deep_water, self.shallow_water, ratio)
        } else {
            let ratio = (value - self.waterline) / (self.max - 1.0 - self.waterline);
            lerp_color(self.lowland, self.highland, ratio)
        }
    }

    /// Color for a seed, sampling `field` at the seed's scaled position.
    pub fn color_for(&self, seed: Seed, field: &NoiseField, scale: f64) -> Color {
        let value = field.sample(seed.x as f64 * scale, seed.y as f64 * scale);
        self.color_at(value)
    }
}

/// Draw a categorical tile color: yellow-green 7/11, dark green 2/11, royal blue 2/11.
pub fn categorical_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    match rng.gen_range(0..=10) {
        0..=6 => Color::YELLOW_GREEN,
        7..=8 => Color::DARK_GREEN,
        _ => Color::ROYAL_BLUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_waterline_is_light_blue() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.color_at(-10.0), Color::LIGHT_BLUE);
    }

    #[test]
    fn test_ramp_endpoints() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.color_at(-50.0), Color::DARK_BLUE);
        assert_eq!(ramp.color_at(50.0), Color::DARK_GREEN);
        // Just above the waterline starts at light green
        assert_eq!(ramp.color_at(-9.999), Color::LIGHT_GREEN);
    }

    #[test]
    fn test_clamping() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.color_at(-1000.0), ramp.color_at(-50.0));
        assert_eq!(ramp.color_at(1000.0), ramp.color_at(50.0));
    }

    #[test]
    fn test_land_band_saturates_before_max() {
        let ramp = ColorRamp::default();
        // ratio = (49 + 10) / 59 = 1
        assert_eq!(ramp.color_at(49.0), Color::DARK_GREEN);
    }

    #[test]
    fn test_water_band_monotonic() {
        let ramp = ColorRamp::default();
        let mut prev = ramp.color_at(-50.0);
        let mut v = -50.0;
        while v <= -10.0 {
            let c = ramp.color_at(v);
            assert!(c.r >= prev.r && c.g >= prev.g && c.b >= prev.b, "not monotonic at {}", v);
            prev = c;
            v += 0.25;
        }
    }

    #[test]
    fn test_lerp_clamps_ratio() {
        let a = Color::new(10, 20, 30);
        let b = Color::new(200, 100, 0);
        assert_eq!(lerp_color(a, b, -3.0), a);
        assert_eq!(lerp_color(a, b, 7.0), b);
        assert_eq!(lerp_color(a, b, 0.5), Color::new(105, 60, 15));
    }

    #[test]
    fn test_color_for_matches_color_at() {
        let ramp = ColorRamp::default();
        let field = NoiseField::new(12);
        let seed = Seed::new(37, 81);
        let expected = ramp.color_at(field.sample(37.0 * 0.05, 81.0 * 0.05));
        assert_eq!(ramp.color_for(seed, &field, 0.05), expected);
    }

    #[test]
    fn test_categorical_distribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let draws = 11_000;
        let mut counts = [0usize; 3];
        for _ in 0..draws {
            match categorical_color(&mut rng) {
                Color::YELLOW_GREEN => counts[0] += 1,
                Color::DARK_GREEN => counts[1] += 1,
                Color::ROYAL_BLUE => counts[2] += 1,
                other => panic!("unexpected color {:?}", other),
            }
        }

        let expected = [7.0 / 11.0, 2.0 / 11.0, 2.0 / 11.0];
        for (count, p) in counts.iter().zip(expected) {
            let observed = *count as f64 / draws as f64;
            assert!((observed - p).abs() < 0.02, "observed {} expected {}", observed, p);
        }
    }
}
