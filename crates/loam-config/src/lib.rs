//! Settings layer for the loam generators.
//!
//! Generator parameters persist to disk as a RON file and can be overridden
//! from the command line via clap. Missing fields fall back to defaults and
//! unknown fields are ignored, so files written by older or newer builds
//! still load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, HeightmapConfig, HexConfig, PlatformerConfig};
pub use error::ConfigError;
