//! Slope-aware three-layer texture blending (splat mapping).
//!
//! Each heightmap cell receives grass, rock and snow weights derived from its
//! height and its mean absolute height difference to the eight neighbours.
//! Weights of every cell are normalized to sum to 1.

use crate::heightmap::Heightmap;

/// Number of texture layers in a [`SplatMap`].
pub const SPLAT_LAYERS: usize = 3;

/// Weight sums below this fall back to pure grass.
const MIN_TOTAL_WEIGHT: f32 = 0.01;

/// A texture layer of the splat map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplatLayer {
    Grass = 0,
    Rock = 1,
    Snow = 2,
}

impl SplatLayer {
    /// All layers in storage order.
    pub const ALL: [SplatLayer; SPLAT_LAYERS] = [SplatLayer::Grass, SplatLayer::Rock, SplatLayer::Snow];

    /// Index of this layer within a cell's weight array.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Fixed thresholds steering the blend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplatThresholds {
    /// Grass fades out as height approaches this value.
    pub grass: f32,
    /// Snow starts above this height.
    pub snow: f32,
    /// Slope at which rock reaches full weight.
    pub slope: f32,
}

impl Default for SplatThresholds {
    fn default() -> Self {
        Self {
            grass: 0.4,
            snow: 0.7,
            slope: 0.25,
        }
    }
}

/// Per-cell blend weights, `[grass, rock, snow]`, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct SplatMap {
    width: usize,
    height: usize,
    weights: Vec<[f32; SPLAT_LAYERS]>,
}

impl SplatMap {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All three weights at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> [f32; SPLAT_LAYERS] {
        self.weights[y * self.width + x]
    }

    /// Weight of one layer at `(x, y)`.
    pub fn weight(&self, x: usize, y: usize, layer: SplatLayer) -> f32 {
        self.get(x, y)[layer.index()]
    }

    /// The layer with the highest weight at `(x, y)`; grass wins ties.
    pub fn dominant_layer(&self, x: usize, y: usize) -> SplatLayer {
        let w = self.get(x, y);
        SplatLayer::ALL
            .into_iter()
            .fold(SplatLayer::Grass, |best, layer| {
                if w[layer.index()] > w[best.index()] {
                    layer
                } else {
                    best
                }
            })
    }

    /// Raw row-major weights.
    pub fn weights(&self) -> &[[f32; SPLAT_LAYERS]] {
        &self.weights
    }

    /// Copy out as `layers[x][y][layer]`, the layout terrain engines consume.
    pub fn to_layers(&self) -> Vec<Vec<[f32; SPLAT_LAYERS]>> {
        (0..self.width)
            .map(|x| (0..self.height).map(|y| self.get(x, y)).collect())
            .collect()
    }
}

/// Mean absolute height difference between `(x, y)` and its eight neighbours.
///
/// Neighbours outside the map reuse the nearest edge cell.
pub fn cell_slope(map: &Heightmap, x: usize, y: usize) -> f32 {
    let centre = map.get(x, y);
    let mut total = 0.0;
    for dy in -1..=1isize {
        for dx in -1..=1isize {
            if dx == 0 && dy == 0 {
                continue;
            }
            total += (centre - map.get_clamped(x as isize + dx, y as isize + dy)).abs();
        }
    }
    total / 8.0
}

/// Blend weights for one cell, normalized to sum to 1.
pub fn blend_weights(height: f32, slope: f32, thresholds: &SplatThresholds) -> [f32; SPLAT_LAYERS] {
    let grass = ((1.0 - slope) * (1.0 - height / thresholds.grass)).clamp(0.0, 1.0);
    let rock = (slope / thresholds.slope).clamp(0.0, 1.0);
    let snow = if height > thresholds.snow {
        (((height - thresholds.snow) / (1.0 - thresholds.snow)) * (1.0 - slope)).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let total = grass + rock + snow;
    if total < MIN_TOTAL_WEIGHT {
        return [1.0, 0.0, 0.0];
    }
    [grass / total, rock / total, snow / total]
}

/// Generate a splat map with the default thresholds.
pub fn generate_splat_map(map: &Heightmap) -> SplatMap {
    generate_splat_map_with(map, &SplatThresholds::default())
}

/// Generate a splat map with custom thresholds.
pub fn generate_splat_map_with(map: &Heightmap, thresholds: &SplatThresholds) -> SplatMap {
    let (width, height) = map.dimensions();
    let mut weights = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            weights.push(blend_weights(map.get(x, y), cell_slope(map, x, y), thresholds));
        }
    }
    SplatMap {
        width,
        height,
        weights,
    }
}
