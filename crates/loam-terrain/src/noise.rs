//! Coherent noise sampling: single-octave Perlin, fractal Brownian motion (fBm)
//! grids, a crude 3D variant, and bilinear value noise.

use std::sync::LazyLock;

use ::noise::{NoiseFn, Perlin};

use crate::heightmap::Heightmap;
use crate::rng::{OCTAVE_JITTER_STREAM, Seed, SeededRng};

/// Smallest noise scale accepted. Non-positive scales are clamped to this.
pub const MIN_NOISE_SCALE: f64 = 0.0001;

/// Magnitude of the random jitter applied to each octave's sample coordinates.
pub const OCTAVE_JITTER_RANGE: f64 = 100_000.0;

static DEFAULT_ENGINE: LazyLock<NoiseEngine> = LazyLock::new(NoiseEngine::default);

/// Perlin noise source mapped into `[0, 1]`.
#[derive(Clone, Debug)]
pub struct NoiseEngine {
    perlin: Perlin,
}

impl NoiseEngine {
    /// Create an engine whose gradient table is permuted by `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Single-octave coherent noise in `[0, 1]`.
    #[inline]
    pub fn perlin_2d(&self, x: f64, y: f64) -> f64 {
        ((self.perlin.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Approximate 3D noise: the mean of the xy, yz and xz 2D slices.
    pub fn perlin_3d(&self, x: f64, y: f64, z: f64, scale: f64) -> f64 {
        let scale = clamp_scale(scale);
        let xy = self.perlin_2d(x / scale, y / scale);
        let yz = self.perlin_2d(y / scale, z / scale);
        let xz = self.perlin_2d(x / scale, z / scale);
        (xy + yz + xz) / 3.0
    }
}

impl Default for NoiseEngine {
    fn default() -> Self {
        Self::new(Perlin::DEFAULT_SEED)
    }
}

/// Single-octave noise in `[0, 1]` from the shared default engine.
pub fn perlin_2d(x: f64, y: f64) -> f64 {
    DEFAULT_ENGINE.perlin_2d(x, y)
}

/// Clamp a noise scale to [`MIN_NOISE_SCALE`] when it is not positive.
#[inline]
pub fn clamp_scale(scale: f64) -> f64 {
    if scale <= 0.0 || scale.is_nan() {
        MIN_NOISE_SCALE
    } else {
        scale
    }
}

/// Sum of octave amplitudes, starting at 1 and multiplied by `persistence`
/// per octave. Depends only on the parameters, never on sampled values.
pub fn max_amplitude(octaves: u32, persistence: f64) -> f64 {
    let mut sum = 0.0;
    let mut amp = 1.0;
    for _ in 0..octaves.max(1) {
        sum += amp;
        amp *= persistence;
    }
    sum
}

/// Sample a single-octave Perlin grid. Larger `scale` gives slower variation.
pub fn perlin_grid(width: usize, height: usize, scale: f64, offset: (f64, f64)) -> Heightmap {
    let scale = clamp_scale(scale);
    Heightmap::from_fn(width, height, |x, y| {
        let sx = (x as f64 + offset.0) / scale;
        let sy = (y as f64 + offset.1) / scale;
        perlin_2d(sx, sy) as f32
    })
}

/// Parameters for [`fractal_2d`].
#[derive(Clone, Debug, PartialEq)]
pub struct FractalParams {
    pub width: usize,
    pub height: usize,
    /// Larger values stretch the pattern. Clamped to [`MIN_NOISE_SCALE`].
    pub scale: f64,
    /// Number of layers summed. Clamped to at least 1.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Base sample offset shared by every octave.
    pub offset: (f64, f64),
    /// Seeds the per-octave jitter.
    pub seed: Seed,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            width: 129,
            height: 129,
            scale: 32.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: (0.0, 0.0),
            seed: 0,
        }
    }
}

/// Generate a multi-octave fBm grid with every value in `[0, 1]`.
///
/// Each octave's sample coordinates are shifted by its own jitter drawn from
/// the `seed + OCTAVE_JITTER_STREAM` stream, so different seeds decorrelate
/// octave alignment as well as the base pattern. The result is renormalized
/// by [`max_amplitude`] rather than by the observed range.
pub fn fractal_2d(params: &FractalParams) -> Heightmap {
    let scale = clamp_scale(params.scale);
    let octaves = params.octaves.max(1);

    let mut rng = SeededRng::derived(params.seed, OCTAVE_JITTER_STREAM);
    let jitter: Vec<(f64, f64)> = (0..octaves)
        .map(|_| {
            let jx = rng.next_range(-OCTAVE_JITTER_RANGE, OCTAVE_JITTER_RANGE);
            let jy = rng.next_range(-OCTAVE_JITTER_RANGE, OCTAVE_JITTER_RANGE);
            (params.offset.0 + jx, params.offset.1 + jy)
        })
        .collect();

    let norm = max_amplitude(octaves, params.persistence);
    let engine = &*DEFAULT_ENGINE;

    Heightmap::from_fn(params.width, params.height, |x, y| {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;

        for &(ox, oy) in &jitter {
            let sx = x as f64 / scale * frequency + ox;
            let sy = y as f64 / scale * frequency + oy;
            total += (engine.perlin_2d(sx, sy) * 2.0 - 1.0) * amplitude;

            amplitude *= params.persistence;
            frequency *= params.lacunarity;
        }

        let normalized = if norm > 0.0 {
            (total / norm + 1.0) * 0.5
        } else {
            0.5
        };
        normalized.clamp(0.0, 1.0) as f32
    })
}

/// Bilinearly interpolated lattice noise with one random value per
/// `grid_size` cells. Lattice values are drawn in row order from `seed`.
pub fn value_noise_2d(seed: Seed, width: usize, height: usize, grid_size: usize) -> Heightmap {
    let width = width.max(1);
    let height = height.max(1);
    let grid_size = grid_size.max(1);

    let lattice_w = width.div_ceil(grid_size) + 1;
    let lattice_h = height.div_ceil(grid_size) + 1;
    let mut rng = SeededRng::new(seed);
    let lattice: Vec<f64> = (0..lattice_w * lattice_h)
        .map(|_| rng.next_uniform())
        .collect();
    let at = |ix: usize, iy: usize| lattice[iy.min(lattice_h - 1) * lattice_w + ix.min(lattice_w - 1)];

    Heightmap::from_fn(width, height, |x, y| {
        let gx = x as f64 / grid_size as f64;
        let gy = y as f64 / grid_size as f64;
        let ix = gx.floor() as usize;
        let iy = gy.floor() as usize;
        let fx = gx - ix as f64;
        let fy = gy - iy as f64;

        let top = lerp(at(ix, iy), at(ix + 1, iy), fx);
        let bottom = lerp(at(ix, iy + 1), at(ix + 1, iy + 1), fx);
        lerp(top, bottom, fy) as f32
    })
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn params(seed: Seed) -> FractalParams {
        FractalParams {
            width: 33,
            height: 33,
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn test_perlin_2d_in_unit_range() {
        for i in 0..2000 {
            let x = i as f64 * 0.37 - 300.0;
            let y = i as f64 * 0.11 + 17.0;
            let v = perlin_2d(x, y);
            assert!((0.0..=1.0).contains(&v), "perlin_2d({x}, {y}) = {v}");
        }
    }

    #[test]
    fn test_perlin_2d_deterministic() {
        let a = NoiseEngine::new(9);
        let b = NoiseEngine::new(9);
        assert!((a.perlin_2d(1.25, 3.5) - b.perlin_2d(1.25, 3.5)).abs() < EPSILON);
    }

    #[test]
    fn test_perlin_3d_is_mean_of_slices() {
        let engine = NoiseEngine::default();
        let (x, y, z, s) = (3.3, 7.1, 1.9, 2.0);
        let expected = (engine.perlin_2d(x / s, y / s)
            + engine.perlin_2d(y / s, z / s)
            + engine.perlin_2d(x / s, z / s))
            / 3.0;
        assert!((engine.perlin_3d(x, y, z, s) - expected).abs() < EPSILON);
    }

    #[test]
    fn test_max_amplitude_calculation() {
        assert!((max_amplitude(4, 0.5) - 1.875).abs() < EPSILON);
        assert!((max_amplitude(1, 0.5) - 1.0).abs() < EPSILON);
        // Octaves below one are clamped.
        assert!((max_amplitude(0, 0.5) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_clamp_scale() {
        assert_eq!(clamp_scale(0.0), MIN_NOISE_SCALE);
        assert_eq!(clamp_scale(-4.0), MIN_NOISE_SCALE);
        assert_eq!(clamp_scale(f64::NAN), MIN_NOISE_SCALE);
        assert_eq!(clamp_scale(12.5), 12.5);
    }

    #[test]
    fn test_fractal_values_in_unit_range() {
        for seed in [0, 1, -5, 123_456] {
            for octaves in [1, 3, 8] {
                let map = fractal_2d(&FractalParams {
                    octaves,
                    ..params(seed)
                });
                let (lo, hi) = map.min_max();
                assert!(
                    lo >= 0.0 && hi <= 1.0,
                    "seed {seed} octaves {octaves}: range [{lo}, {hi}]"
                );
            }
        }
    }

    #[test]
    fn test_fractal_deterministic() {
        assert_eq!(fractal_2d(&params(42)), fractal_2d(&params(42)));
    }

    #[test]
    fn test_fractal_different_seeds_differ() {
        let a = fractal_2d(&params(1));
        let b = fractal_2d(&params(2));
        assert_ne!(a, b, "Different seeds should produce different noise");
    }

    #[test]
    fn test_fractal_degenerate_parameters_clamped() {
        let map = fractal_2d(&FractalParams {
            width: 0,
            height: 0,
            scale: 0.0,
            octaves: 0,
            ..params(3)
        });
        assert_eq!(map.dimensions(), (1, 1));
        let v = map.get(0, 0);
        assert!(v.is_finite() && (0.0..=1.0).contains(&v), "value {v}");
    }

    #[test]
    fn test_fractal_not_constant() {
        let map = fractal_2d(&params(11));
        assert!(map.range() > 0.05, "fBm grid unexpectedly flat: {}", map.range());
    }

    #[test]
    fn test_perlin_grid_dimensions_and_range() {
        let map = perlin_grid(10, 6, 4.0, (0.5, 0.5));
        assert_eq!(map.dimensions(), (10, 6));
        let (lo, hi) = map.min_max();
        assert!(lo >= 0.0 && hi <= 1.0);
    }

    #[test]
    fn test_value_noise_hits_lattice_points() {
        let map = value_noise_2d(5, 17, 17, 4);
        let mut rng = SeededRng::new(5);
        let first = rng.next_uniform() as f32;
        assert!((map.get(0, 0) - first).abs() < 1e-6);
        let (lo, hi) = map.min_max();
        assert!(lo >= 0.0 && hi < 1.0);
    }

    #[test]
    fn test_value_noise_zero_grid_size_clamped() {
        let map = value_noise_2d(5, 4, 4, 0);
        assert_eq!(map.dimensions(), (4, 4));
    }
}
