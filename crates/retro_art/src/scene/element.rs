//! Scene elements
//!
//! Every element shares a position, a depth and an optional bounding area;
//! what it draws is described by its [`ElementKind`].

use super::players::PlayerMode;
use super::rating::StarCounts;
use crate::assets::BitmapKey;
use crate::config::Rgb;
use crate::foundation::math::{fit_factor, rotated_extent, scale_dimension, Point, Size};

/// Smallest scale factor any element can reach
pub const MIN_SCALE: f32 = 0.1;

/// Smallest font size a text element can reach
pub const MIN_FONT_SIZE: u32 = 1;

/// Star edge length used when no star bitmap could be loaded
pub const DEFAULT_STAR_SIZE: u32 = 24;

/// Horizontal gap between stars, in pixels
pub const STAR_SPACING: u32 = 5;

/// Scale factor plus rotation, with the scale floor enforced on every write
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    scale: f32,
    /// Rotation in degrees, counter-clockwise; normalised only when drawn
    pub rotation: i32,
}

impl Transform {
    /// Create a transform, clamping the scale to [`MIN_SCALE`]
    pub fn new(scale: f32, rotation: i32) -> Self {
        Self {
            scale: clamp_scale(scale),
            rotation,
        }
    }

    /// Current scale factor
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Replace the scale factor
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = clamp_scale(scale);
    }

    /// Adjust the scale factor by `delta`
    pub fn rescale(&mut self, delta: f32) {
        self.set_scale(self.scale + delta);
    }

    /// Adjust the rotation by `delta` degrees
    pub fn rotate(&mut self, delta: i32) {
        self.rotation = self.rotation.wrapping_add(delta);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(1.0, 0)
    }
}

// Thousandths keep repeated ±0.1 steps from drifting.
fn clamp_scale(scale: f32) -> f32 {
    if !scale.is_finite() {
        return MIN_SCALE;
    }
    ((scale * 1000.0).round() / 1000.0).max(MIN_SCALE)
}

/// Screen extent of a bitmap after fit-to-area, scale and rotation
pub fn image_extent(bitmap: Size, area: Option<Size>, transform: &Transform) -> Size {
    let scaled = scaled_size(bitmap, area, transform.scale());
    rotated_extent(scaled, transform.rotation)
}

/// Size of a bitmap after fit-to-area and scale, before rotation
pub fn scaled_size(bitmap: Size, area: Option<Size>, scale: f32) -> Size {
    let fit = area.map_or(1.0, |area| fit_factor(bitmap, area));
    let factor = fit * scale;
    Size::new(
        scale_dimension(bitmap.width, factor),
        scale_dimension(bitmap.height, factor),
    )
}

/// An image slot (logo, cover, wheel, screenshot, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    /// Decoded bitmap, `None` when no candidate path could be loaded
    pub bitmap: Option<BitmapKey>,
    /// Path the bitmap was loaded from
    pub source: Option<String>,
    /// Configured path
    pub path: Option<String>,
    /// Configured fallback path
    pub default: Option<String>,
    /// Scale and rotation
    pub transform: Transform,
}

/// A text slot filled from a game record field
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    /// Text to draw
    pub content: String,
    font_size: u32,
    /// Text color
    pub color: Rgb,
    /// Record field the content came from, when not the slot name
    pub field: Option<String>,
    /// Label prepended to the content
    pub prefix: Option<String>,
}

impl TextElement {
    /// Create a text element, clamping the font size to [`MIN_FONT_SIZE`]
    pub fn new(content: impl Into<String>, font_size: u32, color: Rgb) -> Self {
        Self {
            content: content.into(),
            font_size: font_size.max(MIN_FONT_SIZE),
            color,
            field: None,
            prefix: None,
        }
    }

    /// Font size in pixels
    pub const fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Adjust the font size, never dropping below [`MIN_FONT_SIZE`]
    pub fn resize(&mut self, delta: i32) {
        let size = i64::from(self.font_size) + i64::from(delta);
        self.font_size = u32::try_from(size.max(i64::from(MIN_FONT_SIZE))).unwrap_or(u32::MAX);
    }
}

/// Loaded star bitmaps, any of which may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarBitmaps {
    /// Full star
    pub full: Option<BitmapKey>,
    /// Half star
    pub half: Option<BitmapKey>,
    /// Empty star
    pub empty: Option<BitmapKey>,
}

/// Configured star image paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarPaths {
    /// Full star
    pub full: Option<String>,
    /// Half star
    pub half: Option<String>,
    /// Empty star
    pub empty: Option<String>,
}

/// Five-star rating widget
#[derive(Debug, Clone, PartialEq)]
pub struct RatingElement {
    score: f64,
    /// Star bitmaps
    pub stars: StarBitmaps,
    /// Configured star paths
    pub paths: StarPaths,
    /// Star scale; rotation is ignored
    pub transform: Transform,
}

impl RatingElement {
    /// Create a widget; the score is clamped to `[0, 5]`
    pub fn new(score: f64, stars: StarBitmaps, paths: StarPaths, scale: f32) -> Self {
        let score = if score.is_finite() { score.clamp(0.0, super::rating::MAX_SCORE) } else { 0.0 };
        Self {
            score,
            stars,
            paths,
            transform: Transform::new(scale, 0),
        }
    }

    /// Normalised score in `[0, 5]`
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Stars of each kind to draw
    pub fn star_counts(&self) -> StarCounts {
        StarCounts::from_score(self.score)
    }

    /// Edge size of one drawn star given the full star's bitmap size
    pub fn star_size(&self, reference: Option<Size>) -> Size {
        let base = reference.unwrap_or(Size::new(DEFAULT_STAR_SIZE, DEFAULT_STAR_SIZE));
        scaled_size(base, None, self.transform.scale())
    }

    /// Extent of the whole row of stars
    pub fn row_extent(&self, reference: Option<Size>) -> Size {
        let star = self.star_size(reference);
        let count = u32::from(super::rating::STAR_COUNT);
        let width = star
            .width
            .saturating_mul(count)
            .saturating_add(STAR_SPACING * (count - 1));
        Size::new(width, star.height)
    }
}

/// Player count icon
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerIconElement {
    /// Decoded icon, `None` when the chosen path could not be loaded
    pub bitmap: Option<BitmapKey>,
    /// Parsed player count
    pub count: u32,
    /// Which icon was chosen
    pub mode: PlayerMode,
    /// Configured single player icon path
    pub single: Option<String>,
    /// Configured multiplayer icon path
    pub multi: Option<String>,
    /// Scale and rotation
    pub transform: Transform,
    /// Position from the layout
    pub configured_position: Point,
    /// Where the icon was moved because it overflowed the canvas
    pub fallback_position: Option<Point>,
}

impl PlayerIconElement {
    /// Path of the icon matching [`Self::mode`]
    pub fn chosen_path(&self) -> Option<&str> {
        match self.mode {
            PlayerMode::Single => self.single.as_deref(),
            PlayerMode::Multi => self.multi.as_deref(),
        }
    }
}

/// What an element draws
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Bitmap slot
    Image(ImageElement),
    /// Text slot
    Text(TextElement),
    /// Star rating
    Rating(RatingElement),
    /// Player count icon
    PlayerIcon(PlayerIconElement),
}

impl ElementKind {
    /// Short kind name for logs
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::Text(_) => "text",
            Self::Rating(_) => "rating",
            Self::PlayerIcon(_) => "players",
        }
    }

    /// Scale and rotation, for the kinds that have them
    pub fn transform(&self) -> Option<&Transform> {
        match self {
            Self::Image(image) => Some(&image.transform),
            Self::Rating(rating) => Some(&rating.transform),
            Self::PlayerIcon(icon) => Some(&icon.transform),
            Self::Text(_) => None,
        }
    }

    /// Mutable scale and rotation
    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        match self {
            Self::Image(image) => Some(&mut image.transform),
            Self::Rating(rating) => Some(&mut rating.transform),
            Self::PlayerIcon(icon) => Some(&mut icon.transform),
            Self::Text(_) => None,
        }
    }

    /// Bitmap drawn by image-like elements
    pub const fn bitmap(&self) -> Option<BitmapKey> {
        match self {
            Self::Image(image) => image.bitmap,
            Self::PlayerIcon(icon) => icon.bitmap,
            Self::Text(_) | Self::Rating(_) => None,
        }
    }
}

/// One named member of a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneElement {
    /// Top-left corner on the canvas
    pub position: Point,
    /// Draw and selection priority; higher is on top
    pub depth: i32,
    /// Fit-to-area box for images, wrapping box for text
    pub area: Option<Size>,
    /// What the element draws
    pub kind: ElementKind,
}

impl SceneElement {
    /// Create an element; a negative depth is raised to zero
    pub fn new(position: Point, depth: i32, area: Option<Size>, kind: ElementKind) -> Self {
        if depth < 0 {
            log::warn!("Negative depth {} raised to 0", depth);
        }
        Self {
            position,
            depth: depth.max(0),
            area,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_scale_floor() {
        let mut transform = Transform::new(0.05, 0);
        assert_relative_eq!(transform.scale(), MIN_SCALE);

        transform.set_scale(1.0);
        for _ in 0..9 {
            transform.rescale(-0.1);
        }
        assert_relative_eq!(transform.scale(), 0.1);
        for _ in 0..100 {
            transform.rescale(-0.1);
        }
        assert_relative_eq!(transform.scale(), MIN_SCALE);

        transform.set_scale(f32::NAN);
        assert_relative_eq!(transform.scale(), MIN_SCALE);
    }

    #[test]
    fn test_font_size_floor() {
        let mut text = TextElement::new("Contra", 0, Rgb::WHITE);
        assert_eq!(text.font_size(), MIN_FONT_SIZE);
        text.resize(10);
        assert_eq!(text.font_size(), 11);
        text.resize(-100);
        assert_eq!(text.font_size(), MIN_FONT_SIZE);
    }

    #[test]
    fn test_image_extent_pipeline() {
        let bitmap = Size::new(400, 200);
        let transform = Transform::new(0.5, 90);
        // fit 400x200 into 200x200 -> 200x100, halve -> 100x50, quarter turn
        assert_eq!(image_extent(bitmap, Some(Size::new(200, 200)), &transform), Size::new(50, 100));
        assert_eq!(image_extent(bitmap, None, &Transform::default()), bitmap);
    }

    #[test]
    fn test_rating_row_extent() {
        let rating = RatingElement::new(7.0, StarBitmaps::default(), StarPaths::default(), 1.0);
        assert_relative_eq!(rating.score(), 5.0);
        assert_eq!(rating.row_extent(None), Size::new(24 * 5 + 5 * 4, 24));
        assert_eq!(rating.row_extent(Some(Size::new(10, 8))), Size::new(70, 8));

        let huge = RatingElement::new(3.0, StarBitmaps::default(), StarPaths::default(), 1.0);
        assert_eq!(huge.row_extent(Some(Size::new(u32::MAX / 2, 8))).width, u32::MAX);
    }

    #[test]
    fn test_negative_depth_is_raised_to_zero() {
        let text = ElementKind::Text(TextElement::new("x", 10, Rgb::WHITE));
        let element = SceneElement::new(Point::new(0, 0), -3, None, text);
        assert_eq!(element.depth, 0);
    }
}
