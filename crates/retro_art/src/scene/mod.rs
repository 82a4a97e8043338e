//! Scene model
//!
//! A [`Scene`] is the layered promo image of one game: typed elements keyed
//! by name, each with a position, a depth and an optional bounding area.
//! It is built once by [`SceneBuilder`], mutated in place by the editor and
//! flattened back into a [`LayoutConfig`](crate::config::LayoutConfig).
//!
//! ## Element names
//!
//! Image and text elements take their slot names. The rating widget is
//! always [`RATING_ELEMENT`] and the player icon [`PLAYERS_ELEMENT`].

mod builder;
mod element;
pub mod players;
pub mod rating;
mod scene_graph;


pub use builder::{corner_position, SceneBuilder, PLAYER_ICON_MARGIN};
pub use element::{
    image_extent, scaled_size, ElementKind, ImageElement, PlayerIconElement, RatingElement,
    SceneElement, StarBitmaps, StarPaths, TextElement, Transform, DEFAULT_STAR_SIZE,
    MIN_FONT_SIZE, MIN_SCALE, STAR_SPACING,
};
pub use players::PlayerMode;
pub use rating::StarCounts;
pub use scene_graph::Scene;

use thiserror::Error;

/// Name of the star rating element
pub const RATING_ELEMENT: &str = "rating";

/// Name of the player icon element
pub const PLAYERS_ELEMENT: &str = "players";

/// Scene errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A mutation named an element the scene does not have
    #[error("Unknown element '{0}'")]
    UnknownElement(String),

    /// The layout produced no elements at all
    #[error("Scene has no elements")]
    Empty,
}
