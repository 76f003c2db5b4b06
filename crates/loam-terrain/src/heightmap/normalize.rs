//! Min/max normalization with contrast and flatness repair.

use super::{Heightmap, HeightmapParams, generate_heightmap};
use crate::rng::{FLAT_FALLBACK_STREAM, Seed};

/// Ranges below this are stretched with a power curve instead of linearly.
pub const LOW_RANGE_THRESHOLD: f32 = 0.1;
/// Exponent applied to low-range maps after the linear stretch.
pub const LOW_RANGE_EXPONENT: f32 = 0.7;

/// Which branch [`normalize_with_repair`] took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalizeRepair {
    /// Standard min/max stretch to `[0, 1]`.
    LinearStretch,
    /// Range was small; stretched then raised to [`LOW_RANGE_EXPONENT`].
    ContrastStretch,
    /// Input was flat; a fresh fractal map was generated instead.
    Regenerated,
}

/// Normalize a heightmap to `[0, 1]`. See [`normalize_with_repair`].
pub fn normalize_heightmap(map: &Heightmap, fallback_seed: Seed) -> Heightmap {
    normalize_with_repair(map, fallback_seed).0
}

/// Normalize a heightmap and report which repair path was taken.
///
/// A flat input is replaced by a new fractal map generated from
/// `fallback_seed + FLAT_FALLBACK_STREAM`, so callers must expect a
/// different seed path in that case.
pub fn normalize_with_repair(map: &Heightmap, fallback_seed: Seed) -> (Heightmap, NormalizeRepair) {
    let (lo, hi) = map.min_max();

    if approximately(lo, hi) {
        tracing::warn!(value = lo, "heightmap is flat, regenerating");
        let replacement = generate_heightmap(&flat_fallback_params(map.width(), fallback_seed));
        return (replacement, NormalizeRepair::Regenerated);
    }

    let range = hi - lo;
    if range < LOW_RANGE_THRESHOLD {
        tracing::warn!(range, "heightmap has little variation, enhancing contrast");
        let enhanced = map.map(|v| ((v - lo) / range).powf(LOW_RANGE_EXPONENT));
        return (enhanced, NormalizeRepair::ContrastStretch);
    }

    (map.map(|v| (v - lo) / range), NormalizeRepair::LinearStretch)
}

fn flat_fallback_params(resolution: usize, seed: Seed) -> HeightmapParams {
    HeightmapParams {
        resolution,
        scale: 0.03,
        octaves: 3,
        persistence: 0.4,
        lacunarity: 2.5,
        seed: seed.wrapping_add(FLAT_FALLBACK_STREAM),
    }
}

fn approximately(a: f32, b: f32) -> bool {
    (b - a).abs() < (1e-6 * a.abs().max(b.abs())).max(f32::EPSILON * 8.0)
}
