//! Command-line argument parsing for the loam generators.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Loam command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "loam", about = "Deterministic procedural terrain generators")]
pub struct CliArgs {
    /// Seed applied to every generator.
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Platformer profile width in columns.
    #[arg(long)]
    pub width: Option<usize>,

    /// Heightmap resolution (samples per side).
    #[arg(long)]
    pub resolution: Option<usize>,

    /// Hex grid width in cells.
    #[arg(long)]
    pub grid_width: Option<usize>,

    /// Hex grid height in cells.
    #[arg(long)]
    pub grid_height: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write PNG previews into this directory.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.platformer.seed = seed;
            self.heightmap.seed = seed;
            self.hex.seed = seed;
        }
        if let Some(w) = args.width {
            self.platformer.width = w;
        }
        if let Some(r) = args.resolution {
            self.heightmap.resolution = r;
        }
        if let Some(w) = args.grid_width {
            self.hex.grid_width = w;
        }
        if let Some(h) = args.grid_height {
            self.hex.grid_height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref dir) = args.output {
            self.debug.export_previews = true;
            self.debug.preview_dir = dir.clone();
        }
    }
}
