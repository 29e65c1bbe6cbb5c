//! Nearest-seed partition of the canvas into one convex polygon per seed.

use tracing::{debug, warn};
use voronoice::{BoundingBox, ClipBehavior, Point, VoronoiBuilder};

use crate::config::Canvas;
use crate::error::{MapError, Result};
use crate::sampler::Seed;

/// The part of the canvas closer to `seed` than to any other seed.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub seed: Seed,
    /// Polygon vertices in order, not repeating the first vertex at the end
    pub polygon: Vec<(f64, f64)>,
}

impl Region {
    /// Polygon area via the shoelace formula.
    pub fn area(&self) -> f64 {
        let n = self.polygon.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let (x0, y0) = self.polygon[i];
                let (x1, y1) = self.polygon[(i + 1) % n];
                x0 * y1 - x1 * y0
            })
            .sum();
        twice.abs() / 2.0
    }

    /// Whether the (convex) polygon contains `p`, boundary included.
    pub fn contains(&self, p: (f64, f64)) -> bool {
        let n = self.polygon.len();
        if n < 3 {
            return false;
        }
        let mut sign = 0.0f64;
        for i in 0..n {
            let (ax, ay) = self.polygon[i];
            let (bx, by) = self.polygon[(i + 1) % n];
            let cross = (bx - ax) * (p.1 - ay) - (by - ay) * (p.0 - ax);
            if cross.abs() < 1e-9 {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }
}

/// Splits a canvas into nearest-seed regions.
///
/// Implementations return exactly one region per seed, in seed order, and the
/// regions cover the canvas without overlapping.
pub trait RegionPartitioner {
    fn partition(&self, canvas: Canvas, seeds: &[Seed]) -> Result<Vec<Region>>;
}

/// Voronoi diagram from Delaunay triangulation (`voronoice`), clipped to the canvas.
///
/// Falls back to [`BisectorPartitioner`] when the diagram cannot be built or
/// does not yield one usable cell per seed, as happens with fewer than three
/// seeds or with collinear seeds.
#[derive(Clone, Copy, Debug, Default)]
pub struct VoronoiPartitioner;

impl RegionPartitioner for VoronoiPartitioner {
    fn partition(&self, canvas: Canvas, seeds: &[Seed]) -> Result<Vec<Region>> {
        match voronoi_regions(canvas, seeds) {
            Some(regions) => Ok(regions),
            None => {
                warn!(seeds = seeds.len(), "Voronoi diagram unusable, clipping bisectors instead");
                BisectorPartitioner.partition(canvas, seeds)
            }
        }
    }
}

fn voronoi_regions(canvas: Canvas, seeds: &[Seed]) -> Option<Vec<Region>> {
    let (w, h) = (canvas.width() as f64, canvas.height() as f64);
    let bbox = BoundingBox::new(Point { x: w / 2.0, y: h / 2.0 }, w, h);
    let sites: Vec<Point> = seeds
        .iter()
        .map(|s| Point { x: s.x as f64, y: s.y as f64 })
        .collect();

    let diagram = VoronoiBuilder::default()
        .set_sites(sites)
        .set_bounding_box(bbox)
        .set_clip_behavior(ClipBehavior::Clip)
        .build()?;

    if diagram.sites().len() != seeds.len() {
        return None;
    }

    let mut regions = Vec::with_capacity(seeds.len());
    for (i, seed) in seeds.iter().enumerate() {
        let cell = diagram.cell(i);
        let site = cell.site_position();
        if site.x != seed.x as f64 || site.y != seed.y as f64 {
            return None;
        }
        let polygon: Vec<(f64, f64)> = cell.iter_vertices().map(|p| (p.x, p.y)).collect();
        if polygon.len() < 3 {
            return None;
        }
        regions.push(Region { seed: *seed, polygon });
    }

    // Clipped cells must tile the canvas exactly
    let covered: f64 = regions.iter().map(Region::area).sum();
    let expected = canvas.area() as f64;
    if (covered - expected).abs() > expected * 1e-6 {
        debug!(covered, expected, "Voronoi cells do not cover the canvas");
        return None;
    }

    debug!(regions = regions.len(), "Voronoi diagram built");
    Some(regions)
}

/// Exact partition by clipping the canvas rectangle against the perpendicular
/// bisector of every other seed. Quadratic in the seed count.
#[derive(Clone, Copy, Debug, Default)]
pub struct BisectorPartitioner;

impl RegionPartitioner for BisectorPartitioner {
    fn partition(&self, canvas: Canvas, seeds: &[Seed]) -> Result<Vec<Region>> {
        let rect = canvas.corners().to_vec();
        let mut regions = Vec::with_capacity(seeds.len());

        for (i, seed) in seeds.iter().enumerate() {
            let (sx, sy) = seed.as_f64();
            let mut polygon = rect.clone();

            for (j, other) in seeds.iter().enumerate() {
                if i == j {
                    continue;
                }
                if other == seed {
                    return Err(MapError::Partition(format!(
                        "duplicate seed at ({}, {})",
                        seed.x, seed.y
                    )));
                }
                let (ox, oy) = other.as_f64();
                // Keep points p with |p - s|^2 <= |p - o|^2
                let normal = (ox - sx, oy - sy);
                let offset = (ox * ox + oy * oy - sx * sx - sy * sy) / 2.0;
                polygon = clip_half_plane(&polygon, normal, offset);
                if polygon.is_empty() {
                    break;
                }
            }

            if polygon.len() < 3 {
                return Err(MapError::Partition(format!(
                    "seed ({}, {}) has an empty region",
                    seed.x, seed.y
                )));
            }
            regions.push(Region { seed: *seed, polygon });
        }

        Ok(regions)
    }
}

/// Sutherland-Hodgman step: keep the part of `polygon` where `normal · p <= offset`.
fn clip_half_plane(polygon: &[(f64, f64)], normal: (f64, f64), offset: f64) -> Vec<(f64, f64)> {
    let side = |p: (f64, f64)| normal.0 * p.0 + normal.1 * p.1 - offset;
    let mut out = Vec::with_capacity(polygon.len() + 1);

    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        let (da, db) = (side(a), side(b));

        if da <= 0.0 {
            out.push(a);
        }
        if (da < 0.0 && db > 0.0) || (da > 0.0 && db < 0.0) {
            let t = da / (da - db);
            out.push((a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::PointSampler;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sampled(canvas: Canvas, count: usize, seed: u64) -> Vec<Seed> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let min_distance = canvas.min_distance(count).unwrap();
        PointSampler::default().sample(canvas, min_distance, count, &mut rng).unwrap()
    }

    fn assert_exhaustive(canvas: Canvas, seeds: &[Seed], regions: &[Region]) {
        assert_eq!(regions.len(), seeds.len());
        let total: f64 = regions.iter().map(Region::area).sum();
        let expected = canvas.area() as f64;
        assert!((total - expected).abs() < expected * 1e-6, "area {} != {}", total, expected);

        for (region, seed) in regions.iter().zip(seeds) {
            assert_eq!(region.seed, *seed);
            assert!(region.contains(seed.as_f64()), "{:?} outside its region", seed);
        }
    }

    #[test]
    fn test_single_seed_covers_canvas() {
        let canvas = Canvas::new(40, 30).unwrap();
        let seeds = [Seed::new(5, 5)];
        let regions = BisectorPartitioner.partition(canvas, &seeds).unwrap();
        assert_eq!(regions[0].area(), 1200.0);
    }

    #[test]
    fn test_two_seeds_split_in_half() {
        let canvas = Canvas::new(10, 10).unwrap();
        let seeds = [Seed::new(2, 5), Seed::new(8, 5)];
        let regions = BisectorPartitioner.partition(canvas, &seeds).unwrap();
        assert!((regions[0].area() - 50.0).abs() < 1e-9);
        assert!((regions[1].area() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_seed_rejected() {
        let canvas = Canvas::new(10, 10).unwrap();
        let seeds = [Seed::new(3, 3), Seed::new(3, 3)];
        assert!(matches!(
            BisectorPartitioner.partition(canvas, &seeds),
            Err(MapError::Partition(_))
        ));
    }

    #[test]
    fn test_bisector_partition_is_exhaustive() {
        let canvas = Canvas::new(120, 80).unwrap();
        let seeds = sampled(canvas, 25, 4);
        let regions = BisectorPartitioner.partition(canvas, &seeds).unwrap();
        assert_exhaustive(canvas, &seeds, &regions);
    }

    #[test]
    fn test_voronoi_partition_is_exhaustive() {
        let canvas = Canvas::new(200, 150).unwrap();
        let seeds = sampled(canvas, 60, 10);
        let regions = VoronoiPartitioner.partition(canvas, &seeds).unwrap();
        assert_exhaustive(canvas, &seeds, &regions);
    }

    #[test]
    fn test_voronoi_falls_back_for_two_seeds() {
        let canvas = Canvas::new(10, 10).unwrap();
        let seeds = [Seed::new(2, 5), Seed::new(8, 5)];
        let regions = VoronoiPartitioner.partition(canvas, &seeds).unwrap();
        assert_exhaustive(canvas, &seeds, &regions);
    }

    #[test]
    fn test_region_nearest_seed() {
        let canvas = Canvas::new(60, 60).unwrap();
        let seeds = sampled(canvas, 12, 21);
        let regions = BisectorPartitioner.partition(canvas, &seeds).unwrap();

        // Pixel centers land in the region of their nearest seed
        for y in (0..60).step_by(7) {
            for x in (0..60).step_by(7) {
                let p = (x as f64 + 0.5, y as f64 + 0.5);
                let nearest = seeds
                    .iter()
                    .enumerate()
                    .min_by(|a, b| {
                        let da = (a.1.x as f64 - p.0).powi(2) + (a.1.y as f64 - p.1).powi(2);
                        let db = (b.1.x as f64 - p.0).powi(2) + (b.1.y as f64 - p.1).powi(2);
                        da.partial_cmp(&db).unwrap()
                    })
                    .map(|(i, _)| i)
                    .unwrap();
                assert!(regions[nearest].contains(p));
            }
        }
    }
}
