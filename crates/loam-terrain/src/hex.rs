//! Hex-grid island classification.
//!
//! Every cell is bucketed into a terrain type from its normalized distance
//! to the grid centre plus a small Perlin term, giving a roughly circular
//! island with an irregular coast. [`generate_hex_grid`] then picks a tile
//! for every cell and [`HexGrid::place_buildings`] may swap land cells for
//! buildings.

mod grid;
mod tiles;

pub use grid::{
    HexCell, HexCoord, HexGrid, HexGridError, HexGridParams, Occupant, generate_hex_grid,
};
pub use tiles::{EXACT_MATCH_WEIGHT, PARTIAL_MATCH_WEIGHT, TileCategory, TileDatabase, select_tile};

use glam::Vec2;

use crate::noise::NoiseEngine;
use crate::rng::Seed;

/// Terrain bucket of a hex cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HexTerrainType {
    Water,
    Sand,
    Dirt,
    Grass,
}

impl HexTerrainType {
    pub const ALL: [HexTerrainType; 4] = [
        HexTerrainType::Water,
        HexTerrainType::Sand,
        HexTerrainType::Dirt,
        HexTerrainType::Grass,
    ];

    /// Lowercase tag matched against tile names.
    pub fn tag(self) -> &'static str {
        match self {
            HexTerrainType::Water => "water",
            HexTerrainType::Sand => "sand",
            HexTerrainType::Dirt => "dirt",
            HexTerrainType::Grass => "grass",
        }
    }
}

impl std::fmt::Display for HexTerrainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Shape parameters of the island.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexIslandParams {
    /// Frequency of the coastline noise, in noise units per cell.
    pub noise_scale: f32,
    /// How far the noise term can push a cell outward.
    pub noise_weight: f32,
    /// Values above this are water.
    pub water_threshold: f32,
    /// Values above this (and not water) are sand.
    pub sand_threshold: f32,
    /// Values above this (and not sand) are dirt; the rest is grass.
    pub dirt_threshold: f32,
}

impl Default for HexIslandParams {
    fn default() -> Self {
        Self {
            noise_scale: 0.3,
            noise_weight: 0.2,
            water_threshold: 0.7,
            sand_threshold: 0.6,
            dirt_threshold: 0.5,
        }
    }
}

/// Classifies cells of one grid.
///
/// Construction precomputes the grid centre and the distance normalizer, so
/// classifying many cells of the same grid is cheap.
#[derive(Clone, Debug)]
pub struct HexIslandClassifier {
    center: Vec2,
    max_distance: f32,
    noise: NoiseEngine,
    params: HexIslandParams,
}

impl HexIslandClassifier {
    /// Zero dimensions are clamped to 1. The coastline noise is seeded from
    /// the low 32 bits of `seed`.
    pub fn new(grid_width: usize, grid_height: usize, seed: Seed, params: HexIslandParams) -> Self {
        let center = Vec2::new(grid_width.max(1) as f32 / 2.0, grid_height.max(1) as f32 / 2.0);
        Self {
            center,
            max_distance: center.length(),
            noise: NoiseEngine::new(seed as u32),
            params,
        }
    }

    /// Combined distance-plus-noise value at `(x, y)`; 0 at the centre, about
    /// 1 at the corners before noise.
    pub fn island_value(&self, x: i32, y: i32) -> f32 {
        let distance = Vec2::new(x as f32, y as f32).distance(self.center) / self.max_distance;
        let noise = self.noise.perlin_2d(
            (x as f32 * self.params.noise_scale) as f64,
            (y as f32 * self.params.noise_scale) as f64,
        ) as f32;
        distance + noise * self.params.noise_weight
    }

    pub fn classify(&self, x: i32, y: i32) -> HexTerrainType {
        let value = self.island_value(x, y);
        let p = &self.params;
        if value > p.water_threshold {
            HexTerrainType::Water
        } else if value > p.sand_threshold {
            HexTerrainType::Sand
        } else if value > p.dirt_threshold {
            HexTerrainType::Dirt
        } else {
            HexTerrainType::Grass
        }
    }
}

/// Classify a single cell with the default island shape.
pub fn classify_hex_cell(
    x: i32,
    y: i32,
    grid_width: usize,
    grid_height: usize,
    seed: Seed,
) -> HexTerrainType {
    HexIslandClassifier::new(grid_width, grid_height, seed, HexIslandParams::default()).classify(x, y)
}

/// Whether row `y` is shifted half a cell along x. Negative rows follow the
/// same parity as non-negative ones.
pub(crate) fn is_offset_row(y: i32) -> bool {
    y.rem_euclid(2) == 1
}

/// World-space centre of cell `(x, y)` on the ground plane.
///
/// Odd rows are shifted half a cell along x (pointy-top, odd-row offset).
pub fn hex_to_world(x: i32, y: i32, tile_size: f32) -> Vec2 {
    let row_shift = if is_offset_row(y) { 0.5 } else { 0.0 };
    Vec2::new(
        tile_size * 3.0f32.sqrt() * (x as f32 + row_shift),
        tile_size * 1.5 * y as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_centre_is_grass_and_corners_are_water() {
        for seed in 0..10 {
            assert_eq!(classify_hex_cell(10, 10, 20, 20, seed), HexTerrainType::Grass);
            assert_eq!(classify_hex_cell(0, 0, 20, 20, seed), HexTerrainType::Water);
            assert_eq!(classify_hex_cell(19, 0, 20, 20, seed), HexTerrainType::Water);
            assert_eq!(classify_hex_cell(0, 19, 20, 20, seed), HexTerrainType::Water);
        }
    }

    #[test]
    fn test_island_value_grows_outward() {
        let c = HexIslandClassifier::new(20, 20, 5, HexIslandParams {
            noise_weight: 0.0,
            ..Default::default()
        });
        assert!(c.island_value(10, 10).abs() < EPSILON);
        assert!(c.island_value(13, 10) < c.island_value(16, 10));
        assert!((c.island_value(0, 0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_noise_term_bounded_by_weight() {
        let plain = HexIslandClassifier::new(20, 20, 1, HexIslandParams {
            noise_weight: 0.0,
            ..Default::default()
        });
        let noisy = HexIslandClassifier::new(20, 20, 1, HexIslandParams::default());
        for x in 0..20 {
            for y in 0..20 {
                let d = noisy.island_value(x, y) - plain.island_value(x, y);
                assert!((-EPSILON..=0.2 + EPSILON).contains(&d), "({x}, {y}) noise term {d}");
            }
        }
    }

    #[test]
    fn test_thresholds_bucket_in_order() {
        let params = HexIslandParams {
            noise_weight: 0.0,
            ..Default::default()
        };
        let c = HexIslandClassifier::new(20, 20, 0, params);
        for x in 0..20 {
            for y in 0..20 {
                let v = c.island_value(x, y);
                let expected = if v > 0.7 {
                    HexTerrainType::Water
                } else if v > 0.6 {
                    HexTerrainType::Sand
                } else if v > 0.5 {
                    HexTerrainType::Dirt
                } else {
                    HexTerrainType::Grass
                };
                assert_eq!(c.classify(x, y), expected, "({x}, {y}) value {v}");
            }
        }
    }

    #[test]
    fn test_all_buckets_present_on_default_grid() {
        let c = HexIslandClassifier::new(20, 20, 123, HexIslandParams::default());
        for terrain in HexTerrainType::ALL {
            let found = (0..20).any(|x| (0..20).any(|y| c.classify(x, y) == terrain));
            assert!(found, "no {terrain} cell on the default island");
        }
    }

    #[test]
    fn test_classification_deterministic() {
        let a = HexIslandClassifier::new(16, 12, 77, HexIslandParams::default());
        let b = HexIslandClassifier::new(16, 12, 77, HexIslandParams::default());
        for x in 0..16 {
            for y in 0..12 {
                assert_eq!(a.classify(x, y), b.classify(x, y));
            }
        }
    }

    #[test]
    fn test_zero_sized_grid_is_clamped() {
        let c = HexIslandClassifier::new(0, 0, 0, HexIslandParams::default());
        assert!(c.island_value(0, 0).is_finite());
    }

    #[test]
    fn test_hex_to_world_layout() {
        let size = 0.58;
        let root3 = 3.0f32.sqrt();
        assert_eq!(hex_to_world(0, 0, size), Vec2::ZERO);
        assert!((hex_to_world(1, 0, size) - Vec2::new(size * root3, 0.0)).length() < EPSILON);
        assert!((hex_to_world(0, 1, size) - Vec2::new(size * root3 * 0.5, size * 1.5)).length() < EPSILON);
        assert!((hex_to_world(2, 2, size) - Vec2::new(size * root3 * 2.0, size * 3.0)).length() < EPSILON);
    }

    #[test]
    fn test_offset_rows_for_negative_indices() {
        assert!(is_offset_row(1));
        assert!(is_offset_row(-1));
        assert!(is_offset_row(-3));
        assert!(!is_offset_row(0));
        assert!(!is_offset_row(-2));
        // Row -1 sits half a cell right of row 0, like row 1.
        let a = hex_to_world(0, -1, 1.0);
        let b = hex_to_world(0, 1, 1.0);
        assert!((a.x - b.x).abs() < 1e-6, "{a} vs {b}");
    }

    #[test]
    fn test_neighbouring_centres_equidistant() {
        let size = 1.0;
        let origin = hex_to_world(3, 2, size);
        let right = hex_to_world(4, 2, size).distance(origin);
        let up_left = hex_to_world(2, 3, size).distance(origin);
        let up_right = hex_to_world(3, 3, size).distance(origin);
        assert!((right - up_left).abs() < EPSILON, "{right} vs {up_left}");
        assert!((right - up_right).abs() < EPSILON, "{right} vs {up_right}");
    }

    #[test]
    fn test_terrain_tags() {
        let tags: Vec<&str> = HexTerrainType::ALL.iter().map(|t| t.tag()).collect();
        assert_eq!(tags, ["water", "sand", "dirt", "grass"]);
        assert_eq!(HexTerrainType::Sand.to_string(), "sand");
    }
}
