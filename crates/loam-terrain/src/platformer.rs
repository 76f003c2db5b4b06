//! Section-based 1D terrain profiles for a side-scrolling platformer.
//!
//! Columns are generated left to right as runs ("sections") of equal
//! height. A few interior sections are then flooded, their neighbours are
//! levelled to form flat banks, and every column's top tile is classified as
//! a plain surface, a left or right corner, or water.

use crate::rng::{SECTION_HEIGHT_STREAM, Seed, SeededRng, WATER_STREAM};

/// Minimum number of columns between the end of one water section and the
/// start of the next.
pub const MIN_WATER_SPACING: i64 = 50;

/// Extra random width a section may receive on top of the minimum.
const SECTION_WIDTH_SPREAD: usize = 3;

/// Parameters for [`generate_section_terrain`].
#[derive(Clone, Debug, PartialEq)]
pub struct SectionTerrainParams {
    pub seed: Seed,
    /// Number of columns.
    pub width: usize,
    /// Dirt tiles under each top tile; also the tolerance band used when
    /// comparing neighbour heights.
    pub dirt_depth: i32,
    pub min_surface_height: i32,
    pub max_surface_height: i32,
    pub min_section_width: usize,
    /// Largest height step between consecutive sections.
    pub max_height_variation: i32,
    /// Probability that an eligible interior section becomes water.
    pub water_spawn_chance: f64,
}

impl Default for SectionTerrainParams {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 50,
            dirt_depth: 5,
            min_surface_height: 5,
            max_surface_height: 10,
            min_section_width: 3,
            max_height_variation: 2,
            water_spawn_chance: 0.4,
        }
    }
}

impl SectionTerrainParams {
    /// Clamp out-of-range values to the nearest safe setting.
    pub fn validated(&self) -> Self {
        let water_spawn_chance = if self.water_spawn_chance.is_nan() {
            0.0
        } else {
            self.water_spawn_chance.clamp(0.0, 1.0)
        };
        Self {
            seed: self.seed,
            width: self.width.max(1),
            dirt_depth: self.dirt_depth.max(0),
            min_surface_height: self.min_surface_height,
            max_surface_height: self.max_surface_height.max(self.min_surface_height),
            min_section_width: self.min_section_width.max(1),
            max_height_variation: self.max_height_variation.max(0),
            water_spawn_chance,
        }
    }
}

/// Classification of a column's top tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TopTileType {
    Normal,
    LeftCorner,
    RightCorner,
    Water,
}

/// A maximal run of columns sharing one section id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub id: usize,
    /// First column, inclusive.
    pub start: usize,
    /// Last column, inclusive.
    pub end: usize,
    pub height: i32,
    pub is_water: bool,
}

impl Section {
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Tilemap layer a [`TilePlacement`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileLayer {
    Ground,
    Background,
}

/// What to draw at a placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Top(TopTileType),
    Dirt,
    Sky,
}

/// One tile to be written by a tilemap consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TilePlacement {
    pub x: i32,
    pub y: i32,
    pub layer: TileLayer,
    pub kind: TileKind,
}

/// The complete profile, stored as one entry per column.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionTerrain {
    pub heights: Vec<i32>,
    pub section_ids: Vec<usize>,
    pub water_mask: Vec<bool>,
    pub top_tiles: Vec<TopTileType>,
}

impl SectionTerrain {
    pub fn width(&self) -> usize {
        self.heights.len()
    }

    /// Section spans in left-to-right order.
    pub fn sections(&self) -> Vec<Section> {
        section_spans(&self.section_ids)
            .into_iter()
            .map(|(id, start, end)| Section {
                id,
                start,
                end,
                height: self.heights[start],
                is_water: self.water_mask[start],
            })
            .collect()
    }

    /// Ids of the water sections in ascending order.
    pub fn water_section_ids(&self) -> Vec<usize> {
        water_ids(&self.section_ids, &self.water_mask)
    }

    /// Tallest column, or 0 for an empty profile.
    pub fn max_height(&self) -> i32 {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    /// Expand the profile into individual tile placements.
    ///
    /// Each column gets its top tile at `(x, h)` and `dirt_depth` dirt tiles
    /// below it on the ground layer. The background layer is filled with sky
    /// from `h + 1` up to the tallest column plus `sky_fill_extra`.
    pub fn paint(&self, dirt_depth: i32, sky_fill_extra: i32) -> Vec<TilePlacement> {
        let sky_top = self.max_height() + sky_fill_extra;
        let mut tiles = Vec::new();

        for (x, (&h, &top)) in self.heights.iter().zip(&self.top_tiles).enumerate() {
            let x = x as i32;
            tiles.push(TilePlacement {
                x,
                y: h,
                layer: TileLayer::Ground,
                kind: TileKind::Top(top),
            });
            tiles.extend((h - dirt_depth.max(0)..h).rev().map(|y| TilePlacement {
                x,
                y,
                layer: TileLayer::Ground,
                kind: TileKind::Dirt,
            }));
            tiles.extend((h + 1..=sky_top).map(|y| TilePlacement {
                x,
                y,
                layer: TileLayer::Background,
                kind: TileKind::Sky,
            }));
        }
        tiles
    }
}

/// Generate a complete profile: heights, water, banks and top tiles.
pub fn generate_section_terrain(params: &SectionTerrainParams) -> SectionTerrain {
    let params = params.validated();
    let (raw_heights, section_ids) = generate_section_heights(&params);
    let water_mask = mark_water_sections(&section_ids, &params);
    let heights = equalize_shorelines(&raw_heights, &section_ids, &water_mask);
    let top_tiles = classify_top_tiles(&heights, &water_mask, params.dirt_depth);

    tracing::debug!(
        seed = params.seed,
        width = params.width,
        sections = section_ids.last().map_or(0, |id| id + 1),
        water_sections = ?water_ids(&section_ids, &water_mask),
        "generated section terrain"
    );

    SectionTerrain {
        heights,
        section_ids,
        water_mask,
        top_tiles,
    }
}

/// Generate per-column heights and section ids.
///
/// The first section takes a height uniform in the surface range. Every
/// later section steps from the previous height by at most
/// `max_height_variation`, clamped to the range. Section widths are drawn
/// before each height step; a tail shorter than `min_section_width` becomes
/// its own section.
pub fn generate_section_heights(params: &SectionTerrainParams) -> (Vec<i32>, Vec<usize>) {
    let p = params.validated();
    let mut rng = SeededRng::derived(p.seed, SECTION_HEIGHT_STREAM);

    let mut heights = Vec::with_capacity(p.width);
    let mut section_ids = Vec::with_capacity(p.width);

    let (lo, hi) = (p.min_surface_height, p.max_surface_height);
    let mut current = rng.next_int_inclusive(lo as i64, hi as i64) as i32;
    let mut section = 0;

    while heights.len() < p.width {
        let remaining = p.width - heights.len();
        let run = if remaining < p.min_section_width {
            remaining
        } else {
            let widest = (p.min_section_width + SECTION_WIDTH_SPREAD).min(remaining);
            rng.next_int_inclusive(p.min_section_width as i64, widest as i64) as usize
        };

        if !heights.is_empty() {
            let variation = p.max_height_variation as i64;
            let delta = rng.next_int_inclusive(-variation, variation) as i32;
            current = current.saturating_add(delta).clamp(lo, hi);
            section += 1;
        }

        heights.extend(std::iter::repeat_n(current, run));
        section_ids.extend(std::iter::repeat_n(section, run));
    }

    (heights, section_ids)
}

/// Choose water sections.
///
/// Candidates are every section except the first and the last, visited left
/// to right. A candidate is only rolled for when it starts at least
/// [`MIN_WATER_SPACING`] columns after the previous water section ended. The
/// left edge counts as the end of a water section, so no water starts before
/// column [`MIN_WATER_SPACING`].
pub fn mark_water_sections(section_ids: &[usize], params: &SectionTerrainParams) -> Vec<bool> {
    let chance = params.validated().water_spawn_chance;
    let mut rng = SeededRng::derived(params.seed, WATER_STREAM);
    let mut water = vec![false; section_ids.len()];

    let spans = section_spans(section_ids);
    let Some(last_id) = spans.last().map(|&(id, _, _)| id) else {
        return water;
    };

    let mut last_water_end: i64 = 0;
    for &(id, start, end) in &spans {
        if id == 0 || id == last_id {
            continue;
        }
        if start as i64 - last_water_end >= MIN_WATER_SPACING && rng.chance(chance) {
            water[start..=end].fill(true);
            last_water_end = end as i64;
        }
    }
    water
}

/// Level the sections on both sides of every water section to its height.
///
/// Water sections are processed in ascending id order and each reads its
/// height from `heights` as given, so the outcome never depends on the order
/// in which banks were already levelled.
pub fn equalize_shorelines(heights: &[i32], section_ids: &[usize], water_mask: &[bool]) -> Vec<i32> {
    let mut out = heights.to_vec();
    for water_id in water_ids(section_ids, water_mask) {
        let Some(pos) = section_ids.iter().position(|&id| id == water_id) else {
            continue;
        };
        let water_height = heights[pos];
        for (h, &id) in out.iter_mut().zip(section_ids) {
            if id + 1 == water_id || id == water_id + 1 {
                *h = water_height;
            }
        }
    }
    out
}

/// Classify the top tile of every column.
///
/// A non-water neighbour "covers" a column when the column's height lies
/// within `[neighbour - dirt_depth, neighbour]`. The first and last columns
/// are always left and right corners; interior columns covered on one side
/// only become the corner facing the open side, and everything else is
/// [`TopTileType::Normal`].
pub fn classify_top_tiles(heights: &[i32], water_mask: &[bool], dirt_depth: i32) -> Vec<TopTileType> {
    let width = heights.len();
    let covered_by = |x: usize, n: usize| {
        !water_mask[n] && heights[x] >= heights[n] - dirt_depth && heights[x] <= heights[n]
    };

    (0..width)
        .map(|x| {
            if water_mask[x] {
                return TopTileType::Water;
            }
            if x == 0 {
                return TopTileType::LeftCorner;
            }
            if x == width - 1 {
                return TopTileType::RightCorner;
            }
            match (covered_by(x, x - 1), covered_by(x, x + 1)) {
                (false, true) => TopTileType::LeftCorner,
                (true, false) => TopTileType::RightCorner,
                // Both covered, or an isolated column.
                _ => TopTileType::Normal,
            }
        })
        .collect()
}

/// `(id, start, end)` for each run of equal ids.
fn section_spans(section_ids: &[usize]) -> Vec<(usize, usize, usize)> {
    let mut spans: Vec<(usize, usize, usize)> = Vec::new();
    for (x, &id) in section_ids.iter().enumerate() {
        match spans.last_mut() {
            Some(span) if span.0 == id => span.2 = x,
            _ => spans.push((id, x, x)),
        }
    }
    spans
}

fn water_ids(section_ids: &[usize], water_mask: &[bool]) -> Vec<usize> {
    let mut ids: Vec<usize> = section_ids
        .iter()
        .zip(water_mask)
        .filter(|&(_, &w)| w)
        .map(|(&id, _)| id)
        .collect();
    ids.dedup();
    ids
}
