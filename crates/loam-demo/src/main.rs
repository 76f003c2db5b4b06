//! Demo binary that runs every loam generator once and logs a summary.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p loam-demo -- --seed 7 --output previews` to also
//! write PNG previews of each result.

mod params;

use std::path::Path;

use clap::Parser;
use loam_config::{CliArgs, Config};
use loam_terrain::debug_viz::{
    DebugImage, VizError, render_heightmap_debug, render_hex_debug, render_profile_debug,
    render_splat_debug,
};
use loam_terrain::{
    HexTerrainType, SplatLayer, TileDatabase, TopTileType, generate_hex_grid,
    generate_section_terrain, run_pipeline,
};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("loam")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    if let Err(e) = loam_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let preview_dir = config
        .debug
        .export_previews
        .then_some(config.debug.preview_dir.as_path());
    if let Some(dir) = preview_dir
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        error!(dir = %dir.display(), "cannot create preview directory: {e}");
    }

    demonstrate_platformer(&config, preview_dir);
    demonstrate_heightmap(&config, preview_dir);
    demonstrate_hex_island(&config, preview_dir);
}

fn demonstrate_platformer(config: &Config, preview_dir: Option<&Path>) {
    let params = params::section_terrain_params(&config.platformer);
    let terrain = generate_section_terrain(&params);

    let sections = terrain.sections();
    let corners = terrain
        .top_tiles
        .iter()
        .filter(|t| matches!(t, TopTileType::LeftCorner | TopTileType::RightCorner))
        .count();
    info!(
        seed = params.seed,
        columns = terrain.width(),
        sections = sections.len(),
        water_sections = ?terrain.water_section_ids(),
        corners,
        "Platformer profile generated"
    );

    let tiles = terrain.paint(params.dirt_depth, config.platformer.sky_fill_extra);
    info!("Painted {} platformer tiles", tiles.len());

    export(preview_dir, "platformer.png", || {
        render_profile_debug(
            &terrain,
            params.dirt_depth,
            config.platformer.sky_fill_extra,
        )
    });
}

fn demonstrate_heightmap(config: &Config, preview_dir: Option<&Path>) {
    let params = params::pipeline_params(&config.heightmap);
    let artifacts = run_pipeline(&params);

    let (lo, hi) = artifacts.finished.min_max();
    let (width, height) = artifacts.finished.dimensions();
    let mut dominant = [0usize; 3];
    for y in 0..height {
        for x in 0..width {
            dominant[artifacts.splat.dominant_layer(x, y).index()] += 1;
        }
    }
    info!(
        resolution = width,
        min = lo,
        max = hi,
        mean = artifacts.finished.mean(),
        normalize_repair = ?artifacts.normalize_repair,
        curve_repair = ?artifacts.curve_repair,
        "Heightmap pipeline finished"
    );
    info!(
        grass = dominant[SplatLayer::Grass.index()],
        rock = dominant[SplatLayer::Rock.index()],
        snow = dominant[SplatLayer::Snow.index()],
        "Splat map dominant layers"
    );

    export(preview_dir, "heightmap_raw.png", || {
        render_heightmap_debug(&artifacts.raw)
    });
    export(preview_dir, "heightmap.png", || {
        render_heightmap_debug(&artifacts.finished)
    });
    export(preview_dir, "splat.png", || render_splat_debug(&artifacts.splat));
}

fn demonstrate_hex_island(config: &Config, preview_dir: Option<&Path>) {
    let hex = &config.hex;
    let tiles = TileDatabase::from_names(hex.terrain_tiles.iter().chain(&hex.building_tiles).cloned());
    let params = params::hex_grid_params(hex);

    let mut grid = match generate_hex_grid(&params, &tiles.terrain) {
        Ok(grid) => grid,
        Err(e) => {
            error!("Hex island generation failed: {e}");
            return;
        }
    };
    let buildings = grid.place_buildings(hex.building_chance, &tiles.buildings, hex.seed);

    info!(
        seed = params.seed,
        cells = grid.len(),
        water = grid.count_terrain(HexTerrainType::Water),
        sand = grid.count_terrain(HexTerrainType::Sand),
        dirt = grid.count_terrain(HexTerrainType::Dirt),
        grass = grid.count_terrain(HexTerrainType::Grass),
        buildings,
        "Hex island generated"
    );

    export(preview_dir, "hex_island.png", || render_hex_debug(&grid, 8));
}

/// Render and write a preview when previews are enabled.
fn export(preview_dir: Option<&Path>, name: &str, render: impl FnOnce() -> DebugImage) {
    let Some(dir) = preview_dir else {
        return;
    };
    let path = dir.join(name);
    let result: Result<(), VizError> = render().write_png(&path);
    match result {
        Ok(()) => info!("Wrote preview {}", path.display()),
        Err(e) => error!("Failed to write preview {}: {e}", path.display()),
    }
}
