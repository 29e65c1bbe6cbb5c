use noise::{NoiseFn, Perlin};

/// Nominal half-range of the values returned by [`NoiseField::sample`].
pub const NOISE_AMPLITUDE: f64 = 50.0;
pub const DEFAULT_OCTAVES: u32 = 4;

const PERSISTENCE: f64 = 0.5;
const LACUNARITY: f64 = 2.0;

/// Seeded 2D coherent noise, fBm over Perlin.
///
/// Immutable once built: `sample` takes `&self`, so one field can be shared
/// read-only between threads.
#[derive(Clone, Debug)]
pub struct NoiseField {
    perlin: Perlin,
    octaves: u32,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            octaves: DEFAULT_OCTAVES,
        }
    }

    /// Number of noise layers summed per sample (at least one).
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves.max(1);
        self
    }

    /// Noise value at (x, y), nominally in [-50, 50] but not clamped.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        fbm(&self.perlin, [x, y], self.octaves) * NOISE_AMPLITUDE
    }
}

/// Octave sum where each layer doubles frequency and halves weight,
/// divided by the total weight so the result stays in Perlin's range.
fn fbm(perlin: &Perlin, point: [f64; 2], octaves: u32) -> f64 {
    let (sum, weight, _, _) = (0..octaves).fold(
        (0.0, 0.0, 1.0, 1.0),
        |(sum, weight, amplitude, frequency), _| {
            let value = perlin.get([point[0] * frequency, point[1] * frequency]);
            (
                sum + value * amplitude,
                weight + amplitude,
                amplitude * PERSISTENCE,
                frequency * LACUNARITY,
            )
        },
    );
    sum / weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_values() {
        let a = NoiseField::new(42);
        let b = NoiseField::new(42);
        for i in 0..50 {
            let (x, y) = (i as f64 * 0.37, i as f64 * 0.91);
            assert_eq!(a.sample(x, y), b.sample(x, y));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        let differs = (0..50).any(|i| {
            let (x, y) = (i as f64 * 0.37 + 0.1, i as f64 * 0.53 + 0.2);
            a.sample(x, y) != b.sample(x, y)
        });
        assert!(differs);
    }

    #[test]
    fn test_values_near_nominal_range() {
        let field = NoiseField::new(9);
        for i in 0..200 {
            let v = field.sample(i as f64 * 0.13, i as f64 * 0.29);
            assert!(v.is_finite());
            // Perlin overshoots [-1, 1] only slightly
            assert!(v.abs() < NOISE_AMPLITUDE * 1.5, "value {} far outside range", v);
        }
    }

    #[test]
    fn test_single_octave_is_plain_perlin() {
        let field = NoiseField::new(17).with_octaves(1);
        let perlin = Perlin::new(17);
        let (x, y) = (3.3, 7.9);
        assert_eq!(field.sample(x, y), perlin.get([x, y]) * NOISE_AMPLITUDE);
    }

    #[test]
    fn test_octaves_change_values() {
        let coarse = NoiseField::new(17).with_octaves(1);
        let fine = NoiseField::new(17);
        let differs = (0..20).any(|i| {
            let (x, y) = (i as f64 * 0.41 + 0.1, i as f64 * 0.23 + 0.3);
            coarse.sample(x, y) != fine.sample(x, y)
        });
        assert!(differs);
        // Zero is bumped to one layer
        let zero = NoiseField::new(17).with_octaves(0);
        assert_eq!(zero.sample(1.1, 2.2), coarse.sample(1.1, 2.2));
    }

    #[test]
    fn test_shared_across_threads() {
        let field = std::sync::Arc::new(NoiseField::new(3));
        let expected = field.sample(1.25, 2.5);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let field = field.clone();
                std::thread::spawn(move || field.sample(1.25, 2.5))
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    }
}
