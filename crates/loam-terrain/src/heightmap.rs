//! Heightmap generation and post-processing.
//!
//! The generation sequence is raw fractal noise, then [`normalize_heightmap`],
//! then optionally [`smooth_heightmap`], then [`apply_height_curve`]. Each
//! stage returns a new map and runs its own flatness check independent of
//! upstream decisions.

mod contrast;
mod map;
mod normalize;
mod smooth;

pub use contrast::{
    CONTRAST_EXPONENT, CurveRepair, RIPPLE_RANGE_THRESHOLD, apply_height_curve,
    apply_height_curve_with_repair,
};
pub use map::{Heightmap, HeightmapError};
pub use normalize::{
    LOW_RANGE_EXPONENT, LOW_RANGE_THRESHOLD, NormalizeRepair, normalize_heightmap,
    normalize_with_repair,
};
pub use smooth::smooth_heightmap;

use crate::noise::{FractalParams, fractal_2d};
use crate::rng::{Seed, SeededRng};

/// Magnitude of the base sample offset drawn for each generated heightmap.
pub const BASE_OFFSET_RANGE: f64 = 10_000.0;

/// Parameters for a square fractal heightmap.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightmapParams {
    /// Samples per side. Intended as `2^n + 1` but not enforced.
    pub resolution: usize,
    /// Noise scale; larger values give broader features.
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub seed: Seed,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            resolution: 513,
            scale: 64.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.5,
            seed: 123,
        }
    }
}

impl HeightmapParams {
    /// Clamp out-of-range values to the nearest safe setting.
    pub fn validated(&self) -> Self {
        Self {
            resolution: self.resolution.max(1),
            scale: crate::noise::clamp_scale(self.scale),
            octaves: self.octaves.max(1),
            ..self.clone()
        }
    }
}

/// Generate a `resolution x resolution` fractal heightmap with values in `[0, 1]`.
///
/// A stream seeded with `seed` picks the base sample offset, so the same
/// seed always lands on the same region of the noise field.
pub fn generate_heightmap(params: &HeightmapParams) -> Heightmap {
    let params = params.validated();
    let mut rng = SeededRng::new(params.seed);
    let offset = (
        rng.next_range(-BASE_OFFSET_RANGE, BASE_OFFSET_RANGE),
        rng.next_range(-BASE_OFFSET_RANGE, BASE_OFFSET_RANGE),
    );

    let map = fractal_2d(&FractalParams {
        width: params.resolution,
        height: params.resolution,
        scale: params.scale,
        octaves: params.octaves,
        persistence: params.persistence,
        lacunarity: params.lacunarity,
        offset,
        seed: params.seed,
    });

    tracing::debug!(
        resolution = params.resolution,
        seed = params.seed,
        range = map.range(),
        "generated fractal heightmap"
    );
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(seed: Seed) -> HeightmapParams {
        HeightmapParams {
            resolution: 33,
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn test_generated_heightmap_is_square() {
        let map = generate_heightmap(&small(1));
        assert_eq!(map.dimensions(), (33, 33));
        assert!(map.is_square());
    }

    #[test]
    fn test_generated_values_in_unit_range() {
        for seed in 0..8 {
            let (lo, hi) = generate_heightmap(&small(seed)).min_max();
            assert!(lo >= 0.0 && hi <= 1.0, "seed {seed}: [{lo}, {hi}]");
        }
    }

    #[test]
    fn test_same_seed_same_heightmap() {
        assert_eq!(generate_heightmap(&small(77)), generate_heightmap(&small(77)));
    }

    #[test]
    fn test_different_seed_different_heightmap() {
        assert_ne!(generate_heightmap(&small(77)), generate_heightmap(&small(78)));
    }

    #[test]
    fn test_validated_clamps_parameters() {
        let params = HeightmapParams {
            resolution: 0,
            scale: -1.0,
            octaves: 0,
            ..Default::default()
        }
        .validated();
        assert_eq!(params.resolution, 1);
        assert!(params.scale > 0.0);
        assert_eq!(params.octaves, 1);
    }

    #[test]
    fn test_generate_on_different_threads_identical() {
        let a = std::thread::spawn(|| generate_heightmap(&small(5)));
        let b = std::thread::spawn(|| generate_heightmap(&small(5)));
        assert_eq!(a.join().unwrap(), b.join().unwrap());
    }
}
