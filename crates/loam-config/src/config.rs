//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 1D platformer profile settings.
    pub platformer: PlatformerConfig,
    /// Heightmap terrain settings.
    pub heightmap: HeightmapConfig,
    /// Hex island settings.
    pub hex: HexConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Platformer section profile configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlatformerConfig {
    pub seed: i64,
    /// Number of columns.
    pub width: usize,
    /// Dirt tiles below each surface tile.
    pub dirt_depth: i32,
    /// Sky rows painted above the tallest column.
    pub sky_fill_extra: i32,
    pub min_surface_height: i32,
    pub max_surface_height: i32,
    pub min_section_width: usize,
    pub max_height_variation: i32,
    /// Probability (0.0 - 1.0) that an eligible section becomes water.
    pub water_spawn_chance: f64,
}

/// Heightmap terrain configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeightmapConfig {
    pub seed: i64,
    /// Samples per side.
    pub resolution: usize,
    /// Noise feature size in samples (larger = broader hills).
    pub noise_scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub enable_smoothing: bool,
    pub smoothing_radius: usize,
    pub smoothing_iterations: usize,
    /// Final remap curve as `(time, value)` keys.
    pub height_curve: Vec<(f32, f32)>,
}

/// Hex island configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HexConfig {
    pub seed: i64,
    pub grid_width: usize,
    pub grid_height: usize,
    /// Hex radius in world units.
    pub tile_size: f32,
    /// Chance (0.0 - 1.0) that a land cell holds a building.
    pub building_chance: f64,
    /// Terrain tile names; each must contain one of water, sand, dirt or grass.
    pub terrain_tiles: Vec<String>,
    /// Building tile names.
    pub building_tiles: Vec<String>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write PNG previews of every generator's output.
    pub export_previews: bool,
    /// Directory the previews are written to.
    pub preview_dir: PathBuf,
}

// --- Default implementations ---

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 50,
            dirt_depth: 5,
            sky_fill_extra: 20,
            min_surface_height: 5,
            max_surface_height: 10,
            min_section_width: 3,
            max_height_variation: 2,
            water_spawn_chance: 0.4,
        }
    }
}

impl Default for HeightmapConfig {
    fn default() -> Self {
        Self {
            seed: 123,
            resolution: 513,
            noise_scale: 64.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.5,
            enable_smoothing: true,
            smoothing_radius: 1,
            smoothing_iterations: 1,
            height_curve: vec![(0.0, 0.0), (1.0, 1.0)],
        }
    }
}

impl Default for HexConfig {
    fn default() -> Self {
        let names = |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };
        Self {
            seed: 123,
            grid_width: 20,
            grid_height: 20,
            tile_size: 0.58,
            building_chance: 0.1,
            terrain_tiles: names(&["water", "sand", "sand_rocks", "dirt", "grass", "grass_forest"]),
            building_tiles: names(&["building_house", "building_mill", "building_tower"]),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            export_previews: false,
            preview_dir: PathBuf::from("previews"),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(ConfigError::read(&config_path))?;
            let config: Config =
                ron::from_str(&contents).map_err(ConfigError::parse(&config_path))?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::write(config_dir))?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::write(&config_path))?;
        Ok(())
    }

    /// Re-read `config.ron`: returns `Some(new_config)` if it differs from
    /// `self`, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents =
            std::fs::read_to_string(&config_path).map_err(ConfigError::read(&config_path))?;
        let new_config: Config =
            ron::from_str(&contents).map_err(ConfigError::parse(&config_path))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
