//! Debug visualization: 2D image rendering of generator output.
//!
//! Provides [`DebugImage`] and rendering functions for heightmaps, splat
//! maps, platformer profiles and hex grids. Images can be written to disk as
//! PNG previews to diagnose generation issues by eye.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{
    height_to_color, hex_terrain_color, render_heightmap_debug, render_hex_debug,
    render_profile_debug, render_splat_debug, splat_color, tile_color,
};

/// Errors that can occur while exporting a debug image.
#[derive(Debug, thiserror::Error)]
pub enum VizError {
    /// The output file could not be created or written.
    #[error("failed to write debug image: {0}")]
    Io(#[from] std::io::Error),
    /// The PNG encoder rejected the image.
    #[error("failed to encode PNG: {0}")]
    Encoding(#[from] png::EncodingError),
}
