//! Rendering
//!
//! The renderer only talks to a [`Canvas`]; [`RasterCanvas`] draws real
//! pixels and [`RecordingCanvas`] records the calls.

mod canvas;
mod commands;
mod raster;
mod scene_renderer;
pub mod transform;

pub use canvas::Canvas;
pub use commands::{DrawCommand, RecordingCanvas};
pub use raster::RasterCanvas;
pub use scene_renderer::{RenderOptions, SceneRenderer};

use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// An element referenced a bitmap the scene does not own
    #[error("Missing bitmap: {0}")]
    MissingBitmap(String),

    /// Encoding the raster failed
    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    /// IO error while writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
