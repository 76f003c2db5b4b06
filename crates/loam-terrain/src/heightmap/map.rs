//! Dense 2D float grid used for every heightmap artifact.

use std::ops::Index;

/// Errors that can occur when building a [`Heightmap`] from nested rows.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum HeightmapError {
    /// No rows, or a first row with no columns.
    #[error("heightmap rows are empty")]
    EmptyRows,
    /// A row whose length differs from the first row.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A row-major grid of height samples indexed by `(x, y)`.
///
/// Transforms never mutate a map in place; each returns a new [`Heightmap`].
/// Dimensions are always at least 1x1.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightmap {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Heightmap {
    /// Create a zero-filled map. Zero dimensions are clamped to 1.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Create a map with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Create a map by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Build a map from `rows[y][x]`.
    ///
    /// # Errors
    ///
    /// Returns [`HeightmapError::EmptyRows`] for empty input and
    /// [`HeightmapError::RaggedRows`] when rows differ in length.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, HeightmapError> {
        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(HeightmapError::EmptyRows);
        }
        let mut data = Vec::with_capacity(expected * rows.len());
        for (row, values) in rows.iter().enumerate() {
            if values.len() != expected {
                return Err(HeightmapError::RaggedRows {
                    row,
                    expected,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self {
            width: expected,
            height: rows.len(),
            data,
        })
    }

    /// Copy the map out as `rows[y][x]`.
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.data.chunks_exact(self.width).map(<[f32]>::to_vec).collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns `true` when width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Raw row-major samples.
    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Sample with coordinates clamped to the border (no wraparound).
    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize) -> f32 {
        let cx = x.clamp(0, self.width as isize - 1) as usize;
        let cy = y.clamp(0, self.height as isize - 1) as usize;
        self.get(cx, cy)
    }

    /// Smallest and largest sample.
    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// `max - min` over all samples.
    pub fn range(&self) -> f32 {
        let (lo, hi) = self.min_max();
        hi - lo
    }

    /// Arithmetic mean of all samples.
    pub fn mean(&self) -> f32 {
        let sum: f64 = self.data.iter().map(|&v| v as f64).sum();
        (sum / self.data.len() as f64) as f32
    }

    /// Apply `f` to every sample, producing a new map.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

impl Index<(usize, usize)> for Heightmap {
    type Output = f32;

    fn index(&self, (x, y): (usize, usize)) -> &f32 {
        &self.data[y * self.width + x]
    }
}
