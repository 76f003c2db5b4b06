//! Deterministic procedural generation: seeded noise, heightmap pipelines,
//! splat maps, platformer section profiles and hex island grids.
//!
//! Every generator is a pure function of a seed and a parameter struct. Each
//! call builds its own random streams, so generators can run concurrently on
//! any number of threads and always reproduce the same output.

mod curve;
mod pipeline;
mod platformer;
mod rng;
mod splat;
#[cfg(test)]
mod test_log;

pub mod debug_viz;
pub mod heightmap;
pub mod hex;
pub mod noise;

pub use curve::{CurveError, HeightCurve, KeyframeCurve, LinearCurve};
pub use heightmap::{
    CurveRepair, Heightmap, HeightmapError, HeightmapParams, NormalizeRepair, apply_height_curve,
    generate_heightmap, normalize_heightmap, smooth_heightmap,
};
pub use hex::{
    HexCell, HexCoord, HexGrid, HexGridError, HexGridParams, HexIslandClassifier, HexIslandParams,
    HexTerrainType, Occupant, TileDatabase, classify_hex_cell, generate_hex_grid, hex_to_world,
    select_tile,
};
pub use pipeline::{SmoothingParams, TerrainArtifacts, TerrainPipelineParams, run_pipeline};
pub use platformer::{
    MIN_WATER_SPACING, Section, SectionTerrain, SectionTerrainParams, TileKind, TileLayer,
    TilePlacement, TopTileType, classify_top_tiles, equalize_shorelines, generate_section_heights,
    generate_section_terrain, mark_water_sections,
};
pub use rng::{
    FLAT_FALLBACK_STREAM, HEX_BUILDING_STREAM, HEX_TILE_STREAM, OCTAVE_JITTER_STREAM,
    SECTION_HEIGHT_STREAM, Seed, SeededRng, WATER_STREAM,
};
pub use splat::{
    SPLAT_LAYERS, SplatLayer, SplatMap, SplatThresholds, blend_weights, cell_slope,
    generate_splat_map, generate_splat_map_with,
};
