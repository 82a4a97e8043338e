//! # Retro Art
//!
//! Promo image compositor and scene editor for retro game frontends.
//!
//! ## Features
//!
//! - **Scene Model**: typed, depth-ordered layers (images, wrapped text,
//!   star rating, player icon) with hit-testing and validated edits
//! - **Rendering**: any [`render::Canvas`] backend; an RGBA raster canvas
//!   is included for previews and export
//! - **Editor**: polled input loop with dragging, scaling, rotation,
//!   reordering and save
//! - **Layouts**: JSON, TOML or RON documents that round-trip every edit
//! - **Catalog & Playlists**: ROM metadata lookup and RetroArch `.lpl`
//!   generation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use retro_art::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let layout = LayoutConfig::load_lenient("layout.toml")?;
//!     let record = GameRecord::from_json_file("contra.json")?;
//!     let resolver = FileResolver::new().with_search_path("assets");
//!
//!     let scene = SceneBuilder::new(&layout, &record, &resolver).build()?;
//!     SceneRenderer::export(&scene, "contra.png")?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]

pub mod assets;
pub mod catalog;
pub mod config;
pub mod editor;
pub mod foundation;
pub mod input;
pub mod playlist;
pub mod render;
pub mod scene;
pub mod text;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        assets::{AssetResolver, FileResolver, MemoryResolver},
        catalog::{Catalog, GameRecord},
        config::{Config, EditorSettings, LayoutConfig},
        editor::{Editor, SaveTarget},
        foundation::math::{Point, Rect, Size},
        input::{InputEvent, InputSource, KeyCode, Modifiers, ScriptedInput},
        playlist::{PlaylistBuilder, PlaylistConfig},
        render::{Canvas, RasterCanvas, RenderOptions, SceneRenderer},
        scene::{Scene, SceneBuilder},
        text::Font,
    };
}
