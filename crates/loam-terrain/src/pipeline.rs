//! End-to-end heightmap terrain generation.
//!
//! Runs raw fractal noise, normalization, optional smoothing and the final
//! curve in that order, then derives the splat map from the finished
//! heights. Every intermediate map is kept so callers can inspect, snapshot
//! or replay any stage.

use crate::curve::{HeightCurve, KeyframeCurve};
use crate::heightmap::{
    CurveRepair, Heightmap, HeightmapParams, NormalizeRepair, apply_height_curve_with_repair,
    generate_heightmap, normalize_with_repair, smooth_heightmap,
};
use crate::splat::{SplatMap, SplatThresholds, generate_splat_map_with};

/// Blur settings for the optional smoothing stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SmoothingParams {
    pub radius: usize,
    pub iterations: usize,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            radius: 1,
            iterations: 1,
        }
    }
}

/// Parameters for [`run_pipeline`].
#[derive(Clone, Debug)]
pub struct TerrainPipelineParams<C = KeyframeCurve> {
    pub heightmap: HeightmapParams,
    /// `None` skips the smoothing stage.
    pub smoothing: Option<SmoothingParams>,
    pub curve: C,
    pub splat: SplatThresholds,
}

impl Default for TerrainPipelineParams {
    fn default() -> Self {
        Self {
            heightmap: HeightmapParams::default(),
            smoothing: Some(SmoothingParams::default()),
            curve: KeyframeCurve::linear(),
            splat: SplatThresholds::default(),
        }
    }
}

/// Every artifact produced by one pipeline run.
#[derive(Clone, Debug)]
pub struct TerrainArtifacts {
    pub raw: Heightmap,
    pub normalized: Heightmap,
    pub smoothed: Option<Heightmap>,
    /// Output of the curve stage; the heights handed to terrain consumers.
    pub finished: Heightmap,
    pub splat: SplatMap,
    pub normalize_repair: NormalizeRepair,
    pub curve_repair: CurveRepair,
}

/// Run the full generation sequence for one seed.
pub fn run_pipeline<C: HeightCurve>(params: &TerrainPipelineParams<C>) -> TerrainArtifacts {
    let heightmap_params = params.heightmap.validated();
    let raw = generate_heightmap(&heightmap_params);
    let (normalized, normalize_repair) = normalize_with_repair(&raw, heightmap_params.seed);

    let smoothed = params
        .smoothing
        .map(|s| smooth_heightmap(&normalized, s.radius, s.iterations));

    let curve_input = smoothed.as_ref().unwrap_or(&normalized);
    let (finished, curve_repair) = apply_height_curve_with_repair(curve_input, &params.curve);
    let splat = generate_splat_map_with(&finished, &params.splat);

    tracing::info!(
        seed = heightmap_params.seed,
        resolution = heightmap_params.resolution,
        ?normalize_repair,
        ?curve_repair,
        "terrain pipeline finished"
    );

    TerrainArtifacts {
        raw,
        normalized,
        smoothed,
        finished,
        splat,
        normalize_repair,
        curve_repair,
    }
}
