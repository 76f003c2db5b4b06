//! Tile catalogs and weighted tile selection.

use crate::rng::SeededRng;

/// Selection weight of a candidate whose name equals the requested tag.
pub const EXACT_MATCH_WEIGHT: f64 = 10.0;
/// Selection weight of a candidate whose name merely contains the tag.
pub const PARTIAL_MATCH_WEIGHT: f64 = 1.0;

/// Pick a tile whose name contains `tag`.
///
/// The tag is lowercased before matching. Exact matches carry
/// [`EXACT_MATCH_WEIGHT`], other matches [`PARTIAL_MATCH_WEIGHT`]. One draw
/// in `[0, total)` walks the cumulative weights in candidate order and takes
/// the first candidate whose running total reaches it; the last candidate is
/// the fallback. Returns `None`, without consuming randomness, when nothing
/// matches.
pub fn select_tile<'a, T: AsRef<str>>(
    candidates: &'a [T],
    tag: &str,
    rng: &mut SeededRng,
) -> Option<&'a T> {
    let tag = tag.to_lowercase();
    let matches: Vec<(&T, f64)> = candidates
        .iter()
        .filter_map(|c| {
            let name: &str = c.as_ref();
            if !name.contains(tag.as_str()) {
                return None;
            }
            let weight = if name == tag {
                EXACT_MATCH_WEIGHT
            } else {
                PARTIAL_MATCH_WEIGHT
            };
            Some((c, weight))
        })
        .collect();

    let (last, _) = *matches.last()?;
    let total: f64 = matches.iter().map(|(_, w)| w).sum();
    let draw = rng.next_uniform() * total;

    let mut cumulative = 0.0;
    for &(candidate, weight) in &matches {
        cumulative += weight;
        if draw <= cumulative {
            return Some(candidate);
        }
    }
    Some(last)
}

/// Bucket a tile name falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileCategory {
    Terrain,
    Unit,
    River,
    Path,
    Building,
}

impl TileCategory {
    /// Categorize by lowercase keyword; the first of unit, river, path and
    /// building found wins, anything else is terrain.
    pub fn of(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("unit") {
            TileCategory::Unit
        } else if lower.contains("river") {
            TileCategory::River
        } else if lower.contains("path") {
            TileCategory::Path
        } else if lower.contains("building") {
            TileCategory::Building
        } else {
            TileCategory::Terrain
        }
    }
}

/// Tile names sorted into categories, each in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileDatabase {
    pub terrain: Vec<String>,
    pub units: Vec<String>,
    pub rivers: Vec<String>,
    pub paths: Vec<String>,
    pub buildings: Vec<String>,
}

impl TileDatabase {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut db = Self::default();
        for name in names {
            let name = name.into();
            db.category_mut(TileCategory::of(&name)).push(name);
        }
        db
    }

    pub fn category(&self, category: TileCategory) -> &[String] {
        match category {
            TileCategory::Terrain => &self.terrain,
            TileCategory::Unit => &self.units,
            TileCategory::River => &self.rivers,
            TileCategory::Path => &self.paths,
            TileCategory::Building => &self.buildings,
        }
    }

    fn category_mut(&mut self, category: TileCategory) -> &mut Vec<String> {
        match category {
            TileCategory::Terrain => &mut self.terrain,
            TileCategory::Unit => &mut self.units,
            TileCategory::River => &mut self.rivers,
            TileCategory::Path => &mut self.paths,
            TileCategory::Building => &mut self.buildings,
        }
    }

    pub fn len(&self) -> usize {
        self.terrain.len() + self.units.len() + self.rivers.len() + self.paths.len() + self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_returns_none_without_drawing() {
        let mut rng = SeededRng::new(3);
        let tiles = ["sand", "dirt"];
        assert!(select_tile(&tiles, "grass", &mut rng).is_none());
        assert_eq!(rng.next_uniform(), SeededRng::new(3).next_uniform());
    }

    #[test]
    fn test_single_candidate_always_selected() {
        let mut rng = SeededRng::new(8);
        let tiles = ["water_deep".to_string()];
        for _ in 0..50 {
            assert_eq!(select_tile(&tiles, "water", &mut rng), Some(&tiles[0]));
        }
    }

    #[test]
    fn test_exact_match_favoured_ten_to_one() {
        let mut rng = SeededRng::new(42);
        let tiles = ["grass", "grass_flowers", "sand"];
        let trials = 11_000;
        let exact = (0..trials)
            .filter(|_| select_tile(&tiles, "grass", &mut rng) == Some(&"grass"))
            .count();
        let ratio = exact as f64 / trials as f64;
        assert!((ratio - 10.0 / 11.0).abs() < 0.02, "exact-match ratio {ratio}");
    }

    #[test]
    fn test_never_selects_non_matching() {
        let mut rng = SeededRng::new(1);
        let tiles = ["dirt", "sand_dune", "dirt_rocks", "sand"];
        for _ in 0..200 {
            let pick = select_tile(&tiles, "sand", &mut rng).unwrap();
            assert!(pick.contains("sand"), "picked {pick}");
        }
    }

    #[test]
    fn test_tag_is_lowercased() {
        let mut rng = SeededRng::new(0);
        let tiles = ["water"];
        assert_eq!(select_tile(&tiles, "WATER", &mut rng), Some(&"water"));
    }

    #[test]
    fn test_selection_deterministic() {
        let tiles = ["grass", "grass_a", "grass_b", "grass_c"];
        let mut a = SeededRng::new(9);
        let mut b = SeededRng::new(9);
        for _ in 0..100 {
            assert_eq!(select_tile(&tiles, "grass", &mut a), select_tile(&tiles, "grass", &mut b));
        }
    }

    #[test]
    fn test_categories_by_keyword() {
        assert_eq!(TileCategory::of("unit_archer"), TileCategory::Unit);
        assert_eq!(TileCategory::of("River_Straight"), TileCategory::River);
        assert_eq!(TileCategory::of("path_corner"), TileCategory::Path);
        assert_eq!(TileCategory::of("building_house"), TileCategory::Building);
        assert_eq!(TileCategory::of("grass_hill"), TileCategory::Terrain);
        // Earlier keywords win.
        assert_eq!(TileCategory::of("river_path"), TileCategory::River);
    }

    #[test]
    fn test_database_sorts_names() {
        let db = TileDatabase::from_names([
            "grass",
            "building_tower",
            "unit_knight",
            "sand",
            "path_end",
            "river_bend",
            "building_mill",
        ]);
        assert_eq!(db.terrain, ["grass", "sand"]);
        assert_eq!(db.buildings, ["building_tower", "building_mill"]);
        assert_eq!(db.category(TileCategory::Unit), ["unit_knight"]);
        assert_eq!(db.rivers.len(), 1);
        assert_eq!(db.paths.len(), 1);
        assert_eq!(db.len(), 7);
        assert!(TileDatabase::default().is_empty());
    }
}
