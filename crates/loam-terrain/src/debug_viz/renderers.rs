//! Debug renderers: heightmap, splat map, platformer profile and hex grid.

use super::image::DebugImage;
use crate::heightmap::Heightmap;
use crate::hex::{HexGrid, HexTerrainType, Occupant, is_offset_row};
use crate::platformer::{SectionTerrain, TileKind, TopTileType};
use crate::splat::{SplatLayer, SplatMap};

const GRASS: (u8, u8, u8) = (70, 160, 50);
const ROCK: (u8, u8, u8) = (130, 120, 110);
const SNOW: (u8, u8, u8) = (240, 240, 250);
const DIRT: (u8, u8, u8) = (120, 85, 50);
const WATER: (u8, u8, u8) = (30, 80, 200);
const SKY: (u8, u8, u8) = (150, 200, 240);
const BUILDING: (u8, u8, u8) = (200, 40, 40);

/// Map a normalized height `[0, 1]` to an RGB color.
///
/// Color bands: deep water → shallow water → beach → plains → mountains → snow.
pub fn height_to_color(normalized: f32) -> (u8, u8, u8) {
    let h = normalized.clamp(0.0, 1.0);
    if h < 0.2 {
        (0, 0, 128)
    } else if h < 0.3 {
        WATER
    } else if h < 0.33 {
        (220, 200, 130)
    } else if h < 0.55 {
        let t = (h - 0.33) / 0.22;
        (
            (30.0 + t * 80.0) as u8,
            (160.0 - t * 40.0) as u8,
            (30.0 + t * 20.0) as u8,
        )
    } else if h < 0.75 {
        let t = (h - 0.55) / 0.2;
        (
            (110.0 + t * 40.0) as u8,
            (120.0 - t * 50.0) as u8,
            (50.0 + t * 20.0) as u8,
        )
    } else {
        let t = ((h - 0.75) / 0.25).min(1.0);
        let base = (150.0 + t * 105.0) as u8;
        (base, base, base)
    }
}

/// One pixel per cell, colored by elevation band.
pub fn render_heightmap_debug(map: &Heightmap) -> DebugImage {
    let (width, height) = map.dimensions();
    let mut image = DebugImage::new(width as u32, height as u32);
    for y in 0..height {
        for x in 0..width {
            let (r, g, b) = height_to_color(map.get(x, y));
            image.set_pixel(x as u32, y as u32, r, g, b, 255);
        }
    }
    image
}

/// Mix the layer colors by their weights.
pub fn splat_color(weights: [f32; 3]) -> (u8, u8, u8) {
    let layers = [
        (SplatLayer::Grass, GRASS),
        (SplatLayer::Rock, ROCK),
        (SplatLayer::Snow, SNOW),
    ];
    let mut rgb = [0.0f32; 3];
    for (layer, color) in layers {
        let w = weights[layer.index()];
        rgb[0] += w * color.0 as f32;
        rgb[1] += w * color.1 as f32;
        rgb[2] += w * color.2 as f32;
    }
    let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    (channel(rgb[0]), channel(rgb[1]), channel(rgb[2]))
}

/// One pixel per cell with the blended layer color.
pub fn render_splat_debug(splat: &SplatMap) -> DebugImage {
    let mut image = DebugImage::new(splat.width() as u32, splat.height() as u32);
    for y in 0..splat.height() {
        for x in 0..splat.width() {
            let (r, g, b) = splat_color(splat.get(x, y));
            image.set_pixel(x as u32, y as u32, r, g, b, 255);
        }
    }
    image
}

/// Colour of a platformer tile.
pub fn tile_color(kind: TileKind) -> (u8, u8, u8) {
    match kind {
        TileKind::Top(TopTileType::Normal) => GRASS,
        TileKind::Top(TopTileType::LeftCorner) => (110, 190, 70),
        TileKind::Top(TopTileType::RightCorner) => (40, 130, 40),
        TileKind::Top(TopTileType::Water) => WATER,
        TileKind::Dirt => DIRT,
        TileKind::Sky => SKY,
    }
}

/// Side view of a platformer profile, one pixel per tile.
///
/// Row 0 is the top of the sky fill; tiles below y = 0 are not drawn.
pub fn render_profile_debug(terrain: &SectionTerrain, dirt_depth: i32, sky_fill_extra: i32) -> DebugImage {
    let top = (terrain.max_height() + sky_fill_extra.max(0)).max(0);
    let mut image = DebugImage::new(terrain.width() as u32, top as u32 + 1);

    for tile in terrain.paint(dirt_depth, sky_fill_extra) {
        if tile.y < 0 || tile.y > top {
            continue;
        }
        let (r, g, b) = tile_color(tile.kind);
        image.set_pixel(tile.x as u32, (top - tile.y) as u32, r, g, b, 255);
    }
    image
}

/// Colour of a hex terrain bucket.
pub fn hex_terrain_color(terrain: HexTerrainType) -> (u8, u8, u8) {
    match terrain {
        HexTerrainType::Water => WATER,
        HexTerrainType::Sand => (220, 200, 130),
        HexTerrainType::Dirt => DIRT,
        HexTerrainType::Grass => GRASS,
    }
}

/// Top-down view of a hex grid.
///
/// Every cell is a `cell_px` square; odd rows are shifted right by half a
/// cell to mimic the hex offset. Buildings are drawn in red.
pub fn render_hex_debug<H>(grid: &HexGrid<H>, cell_px: u32) -> DebugImage {
    let cell_px = cell_px.max(2);
    let half = cell_px / 2;
    let mut image = DebugImage::new(grid.width() as u32 * cell_px + half, grid.height() as u32 * cell_px);

    for cell in grid.cells() {
        let color = match cell.occupant {
            Occupant::Building(_) => BUILDING,
            Occupant::Terrain(_) => hex_terrain_color(cell.terrain),
        };
        let shift = if is_offset_row(cell.coord.y) { half } else { 0 };
        let px = cell.coord.x as u32 * cell_px + shift;
        let py = cell.coord.y as u32 * cell_px;
        image.fill_rect(px, py, cell_px, cell_px, color);
    }
    image
}
