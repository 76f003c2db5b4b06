//! Hex grid generation with per-cell occupancy.

use glam::Vec2;
use hashbrown::HashMap;

use super::{HexIslandClassifier, HexIslandParams, HexTerrainType, hex_to_world, select_tile};
use crate::rng::{HEX_BUILDING_STREAM, HEX_TILE_STREAM, Seed, SeededRng};

const MIN_TILE_SIZE: f32 = 0.01;

/// Errors that can occur during hex grid generation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HexGridError {
    /// The terrain catalog has no tile whose name contains the tag.
    #[error("no terrain tile matches `{tag}`")]
    MissingTile { tag: String },
}

/// Integer cell coordinate (column, row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexCoord {
    pub x: i32,
    pub y: i32,
}

impl HexCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// What currently stands on a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Occupant<H> {
    Terrain(H),
    Building(H),
}

impl<H> Occupant<H> {
    pub fn tile(&self) -> &H {
        match self {
            Occupant::Terrain(h) | Occupant::Building(h) => h,
        }
    }

    pub fn is_building(&self) -> bool {
        matches!(self, Occupant::Building(_))
    }
}

/// One grid cell. `terrain` is fixed at generation; only `occupant` may be
/// swapped afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexCell<H> {
    pub coord: HexCoord,
    pub terrain: HexTerrainType,
    pub occupant: Occupant<H>,
}

/// Parameters for [`generate_hex_grid`].
#[derive(Clone, Debug, PartialEq)]
pub struct HexGridParams {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Hex radius in world units.
    pub tile_size: f32,
    pub seed: Seed,
    pub island: HexIslandParams,
}

impl Default for HexGridParams {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            tile_size: 0.58,
            seed: 123,
            island: HexIslandParams::default(),
        }
    }
}

impl HexGridParams {
    /// Clamp out-of-range values to the nearest safe setting.
    pub fn validated(&self) -> Self {
        Self {
            grid_width: self.grid_width.max(1),
            grid_height: self.grid_height.max(1),
            tile_size: self.tile_size.max(MIN_TILE_SIZE),
            ..self.clone()
        }
    }
}

/// A classified hex grid keyed by coordinate.
#[derive(Clone, Debug)]
pub struct HexGrid<H> {
    width: usize,
    height: usize,
    tile_size: f32,
    cells: HashMap<HexCoord, HexCell<H>>,
}

impl<H> HexGrid<H> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, coord: HexCoord) -> Option<&HexCell<H>> {
        self.cells.get(&coord)
    }

    /// Coordinates in generation order: x-major, then y.
    pub fn coords(&self) -> impl Iterator<Item = HexCoord> + use<H> {
        let height = self.height as i32;
        (0..self.width as i32).flat_map(move |x| (0..height).map(move |y| HexCoord::new(x, y)))
    }

    /// Cells in generation order.
    pub fn cells(&self) -> impl Iterator<Item = &HexCell<H>> {
        self.coords().filter_map(|c| self.cells.get(&c))
    }

    pub fn count_terrain(&self, terrain: HexTerrainType) -> usize {
        self.cells.values().filter(|c| c.terrain == terrain).count()
    }

    pub fn building_count(&self) -> usize {
        self.cells.values().filter(|c| c.occupant.is_building()).count()
    }

    /// World-space centre of `coord`.
    pub fn world_position(&self, coord: HexCoord) -> Vec2 {
        hex_to_world(coord.x, coord.y, self.tile_size)
    }
}

impl<H: Clone> HexGrid<H> {
    /// Replace land cells with buildings.
    ///
    /// Cells are visited in generation order. Each non-water cell rolls
    /// once against `chance`; on success a building is drawn uniformly from
    /// `buildings` and replaces the cell's occupant. The terrain
    /// classification is left untouched. Returns the number of buildings
    /// placed; an empty `buildings` list places none.
    pub fn place_buildings(&mut self, chance: f64, buildings: &[H], seed: Seed) -> usize {
        if buildings.is_empty() {
            return 0;
        }
        let mut rng = SeededRng::derived(seed, HEX_BUILDING_STREAM);
        let coords: Vec<HexCoord> = self.coords().collect();
        let mut placed = 0;

        for coord in coords {
            let Some(cell) = self.cells.get_mut(&coord) else {
                continue;
            };
            if cell.terrain == HexTerrainType::Water || !rng.chance(chance) {
                continue;
            }
            let pick = rng.next_int(0, buildings.len() as i64) as usize;
            cell.occupant = Occupant::Building(buildings[pick].clone());
            placed += 1;
        }

        tracing::debug!(placed, chance, "placed hex buildings");
        placed
    }
}

/// Classify every cell and pick a terrain tile for it from `catalog`.
///
/// # Errors
///
/// Returns [`HexGridError::MissingTile`] when a classified terrain type has
/// no matching tile name in `catalog`.
pub fn generate_hex_grid<H: AsRef<str> + Clone>(
    params: &HexGridParams,
    catalog: &[H],
) -> Result<HexGrid<H>, HexGridError> {
    let params = params.validated();
    let classifier = HexIslandClassifier::new(
        params.grid_width,
        params.grid_height,
        params.seed,
        params.island,
    );
    let mut rng = SeededRng::derived(params.seed, HEX_TILE_STREAM);

    let mut grid = HexGrid {
        width: params.grid_width,
        height: params.grid_height,
        tile_size: params.tile_size,
        cells: HashMap::with_capacity(params.grid_width * params.grid_height),
    };

    for coord in grid.coords().collect::<Vec<_>>() {
        let terrain = classifier.classify(coord.x, coord.y);
        let tile = select_tile(catalog, terrain.tag(), &mut rng).ok_or_else(|| {
            HexGridError::MissingTile {
                tag: terrain.tag().to_string(),
            }
        })?;
        grid.cells.insert(
            coord,
            HexCell {
                coord,
                terrain,
                occupant: Occupant::Terrain(tile.clone()),
            },
        );
    }

    tracing::debug!(
        seed = params.seed,
        width = params.grid_width,
        height = params.grid_height,
        water = grid.count_terrain(HexTerrainType::Water),
        "generated hex grid"
    );
    Ok(grid)
}
