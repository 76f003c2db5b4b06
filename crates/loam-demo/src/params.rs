//! Conversion from persisted settings to generator parameters.

use loam_config::{HeightmapConfig, HexConfig, PlatformerConfig};
use loam_terrain::{
    HeightmapParams, HexGridParams, KeyframeCurve, SectionTerrainParams, SmoothingParams,
    TerrainPipelineParams,
};
use tracing::warn;

pub fn section_terrain_params(cfg: &PlatformerConfig) -> SectionTerrainParams {
    SectionTerrainParams {
        seed: cfg.seed,
        width: cfg.width,
        dirt_depth: cfg.dirt_depth,
        min_surface_height: cfg.min_surface_height,
        max_surface_height: cfg.max_surface_height,
        min_section_width: cfg.min_section_width,
        max_height_variation: cfg.max_height_variation,
        water_spawn_chance: cfg.water_spawn_chance,
    }
}

/// An invalid height curve is replaced by the linear curve.
pub fn pipeline_params(cfg: &HeightmapConfig) -> TerrainPipelineParams {
    let curve = KeyframeCurve::new(cfg.height_curve.clone()).unwrap_or_else(|e| {
        warn!(error = %e, "invalid height curve in config, using linear");
        KeyframeCurve::linear()
    });

    TerrainPipelineParams {
        heightmap: HeightmapParams {
            resolution: cfg.resolution,
            scale: cfg.noise_scale,
            octaves: cfg.octaves,
            persistence: cfg.persistence,
            lacunarity: cfg.lacunarity,
            seed: cfg.seed,
        },
        smoothing: cfg.enable_smoothing.then_some(SmoothingParams {
            radius: cfg.smoothing_radius,
            iterations: cfg.smoothing_iterations,
        }),
        curve,
        ..Default::default()
    }
}

pub fn hex_grid_params(cfg: &HexConfig) -> HexGridParams {
    HexGridParams {
        grid_width: cfg.grid_width,
        grid_height: cfg.grid_height,
        tile_size: cfg.tile_size,
        seed: cfg.seed,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_terrain::HeightCurve;

    #[test]
    fn test_default_configs_match_generator_defaults() {
        assert_eq!(
            section_terrain_params(&PlatformerConfig::default()),
            SectionTerrainParams::default()
        );
        assert_eq!(hex_grid_params(&HexConfig::default()), HexGridParams::default());
        assert_eq!(
            pipeline_params(&HeightmapConfig::default()).heightmap,
            HeightmapParams::default()
        );
    }

    #[test]
    fn test_smoothing_toggle() {
        let mut cfg = HeightmapConfig::default();
        assert!(pipeline_params(&cfg).smoothing.is_some());
        cfg.enable_smoothing = false;
        assert!(pipeline_params(&cfg).smoothing.is_none());
    }

    #[test]
    fn test_curve_from_config() {
        let cfg = HeightmapConfig {
            height_curve: vec![(0.0, 0.0), (1.0, 0.5)],
            ..Default::default()
        };
        let params = pipeline_params(&cfg);
        assert!((params.curve.evaluate(1.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_curve_falls_back_to_linear() {
        let cfg = HeightmapConfig {
            height_curve: vec![],
            ..Default::default()
        };
        assert_eq!(pipeline_params(&cfg).curve, KeyframeCurve::linear());
    }
}
