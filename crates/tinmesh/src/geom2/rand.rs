//! Random planar point clouds (uniform box or disk) with replay tokens.
//!
//! Purpose
//! - Deterministic input generation for demos, benches and property tests.
//!   The same `(seed, index)` token always yields the same cloud.
//!
//! Model
//! - `Box2`: independent uniform x and y over an axis-aligned rectangle.
//! - `Disk`: area-uniform samples (radius drawn as `R sqrt(u)`).

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sampling region.
#[derive(Clone, Copy, Debug)]
pub enum Region2 {
    Box2 {
        min: Vector2<f64>,
        max: Vector2<f64>,
    },
    Disk {
        center: Vector2<f64>,
        radius: f64,
    },
}

/// Point cloud configuration.
#[derive(Clone, Copy, Debug)]
pub struct PointCloudCfg {
    pub count: usize,
    pub region: Region2,
}

impl Default for PointCloudCfg {
    fn default() -> Self {
        Self {
            count: 3000,
            region: Region2::Box2 {
                min: Vector2::new(3_500_000.0, 5_700_000.0),
                max: Vector2::new(3_600_000.0, 5_800_000.0),
            },
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { seed, index: 0 }
    }

    /// Token for the next draw in the same stream.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw `cfg.count` points from `cfg.region`.
pub fn draw_points(cfg: PointCloudCfg, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    (0..cfg.count)
        .map(|_| sample(&cfg.region, &mut rng))
        .collect()
}

fn sample<R: Rng>(region: &Region2, rng: &mut R) -> Vector2<f64> {
    match *region {
        Region2::Box2 { min, max } => Vector2::new(
            min.x + (max.x - min.x) * rng.gen::<f64>(),
            min.y + (max.y - min.y) * rng.gen::<f64>(),
        ),
        Region2::Disk { center, radius } => {
            let r = radius.abs() * rng.gen::<f64>().sqrt();
            let th = rng.gen::<f64>() * std::f64::consts::TAU;
            center + Vector2::new(th.cos(), th.sin()) * r
        }
    }
}

/// Flatten points into `[x0, y0, x1, y1, ...]`.
pub fn flatten(points: &[Vector2<f64>]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}
