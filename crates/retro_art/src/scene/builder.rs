//! Scene construction from a layout document and a game record

use indexmap::IndexMap;

use super::element::{
    image_extent, ElementKind, ImageElement, PlayerIconElement, RatingElement, SceneElement,
    StarBitmaps, StarPaths, TextElement, Transform,
};
use super::players::{player_count, PlayerMode};
use super::rating::{normalize_score, parse_rating};
use super::{Scene, SceneError, PLAYERS_ELEMENT, RATING_ELEMENT};
use crate::assets::{AssetResolver, BitmapKey, BitmapStore};
use crate::catalog::GameRecord;
use crate::config::{ImageSlotConfig, LayoutConfig, PlayersConfig, RatingConfig, TextSlotConfig};
use crate::foundation::math::{Point, Rect, Size};
use crate::text::Font;

/// Gap between a repositioned player icon and the canvas corner
pub const PLAYER_ICON_MARGIN: i32 = 10;

/// Builds a [`Scene`] from a layout, a game record and an asset resolver
///
/// Missing assets leave their element imageless and missing record fields
/// read as empty text; the only construction error is a layout without any
/// element.
pub struct SceneBuilder<'a> {
    layout: &'a LayoutConfig,
    record: &'a GameRecord,
    resolver: &'a dyn AssetResolver,
    font: Option<Font>,
}

impl<'a> SceneBuilder<'a> {
    /// Start a builder
    pub fn new(layout: &'a LayoutConfig, record: &'a GameRecord, resolver: &'a dyn AssetResolver) -> Self {
        Self {
            layout,
            record,
            resolver,
            font: None,
        }
    }

    /// Use an already loaded font instead of the layout's font path
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Construct the scene
    pub fn build(self) -> Result<Scene, SceneError> {
        let mut bitmaps = BitmapStore::new();
        let mut elements: IndexMap<String, SceneElement> = IndexMap::new();

        for (name, slot) in &self.layout.images {
            let element = self.image_element(name, slot, &mut bitmaps);
            insert_unique(&mut elements, name, element);
        }

        for (name, slot) in &self.layout.texts {
            insert_unique(&mut elements, name, self.text_element(name, slot));
        }

        if let Some(rating) = &self.layout.rating {
            let element = self.rating_element(rating, &mut bitmaps);
            insert_unique(&mut elements, RATING_ELEMENT, element);
        }

        if let Some(players) = &self.layout.players {
            let element = self.player_element(players, &mut bitmaps);
            insert_unique(&mut elements, PLAYERS_ELEMENT, element);
        }

        let font = match self.font {
            Some(font) => font,
            None => Font::load_or_fallback(self.layout.font.path.as_deref()),
        };

        log::info!(
            "Built scene for '{}' with {} elements ({} bitmaps)",
            self.record.title(),
            elements.len(),
            bitmaps.len()
        );

        Scene::new(
            &self.layout.frame,
            font,
            self.layout.font.path.clone(),
            elements,
            bitmaps,
        )
    }

    fn load(&self, candidates: &[Option<&str>], bitmaps: &mut BitmapStore) -> Option<(String, BitmapKey)> {
        let (path, bitmap) = self.resolver.resolve_first(candidates)?;
        Some((path, bitmaps.insert(bitmap)))
    }

    fn image_element(&self, name: &str, slot: &ImageSlotConfig, bitmaps: &mut BitmapStore) -> SceneElement {
        let candidates = [
            self.record.asset_path(name),
            slot.path.as_deref(),
            slot.default.as_deref(),
        ];
        let loaded = self.load(&candidates, bitmaps);
        if loaded.is_none() {
            log::warn!("No image for slot '{}'; it will not be drawn", name);
        }
        let (source, bitmap) = loaded.unzip();

        let image = ImageElement {
            bitmap,
            source,
            path: slot.path.clone(),
            default: slot.default.clone(),
            transform: Transform::new(slot.size, slot.rotation),
        };
        SceneElement::new(slot.position(), slot.z, slot.area, ElementKind::Image(image))
    }

    fn text_element(&self, name: &str, slot: &TextSlotConfig) -> SceneElement {
        let field = slot.field.as_deref().unwrap_or(name);
        let value = self.record.text(field).trim();
        let content = match &slot.prefix {
            Some(prefix) if !value.is_empty() => format!("{}{}", prefix, value),
            _ => value.to_string(),
        };
        if content.is_empty() {
            log::debug!("Record has no '{}' for text slot '{}'", field, name);
        }

        let mut text = TextElement::new(content, slot.font_size, slot.color);
        text.field.clone_from(&slot.field);
        text.prefix.clone_from(&slot.prefix);
        SceneElement::new(Point::new(slot.x, slot.y), slot.z, slot.area, ElementKind::Text(text))
    }

    fn rating_element(&self, config: &RatingConfig, bitmaps: &mut BitmapStore) -> SceneElement {
        let raw = self.record.rating();
        let score = normalize_score(parse_rating(raw));
        log::debug!("Rating '{}' normalised to {}", raw, score);

        let mut star = |path: &Option<String>, kind: &str| {
            let key = self.load(&[path.as_deref()], bitmaps).map(|(_, key)| key);
            if key.is_none() {
                log::warn!("No {} star image; those stars will not be drawn", kind);
            }
            key
        };
        let stars = StarBitmaps {
            full: star(&config.star_full, "full"),
            half: star(&config.star_half, "half"),
            empty: star(&config.star_empty, "empty"),
        };
        let paths = StarPaths {
            full: config.star_full.clone(),
            half: config.star_half.clone(),
            empty: config.star_empty.clone(),
        };

        let rating = RatingElement::new(score, stars, paths, config.size);
        SceneElement::new(Point::new(config.x, config.y), config.z, None, ElementKind::Rating(rating))
    }

    fn player_element(&self, config: &PlayersConfig, bitmaps: &mut BitmapStore) -> SceneElement {
        let count = player_count(self.record.players());
        let mode = PlayerMode::from_count(count);
        let path = match mode {
            PlayerMode::Single => config.single.as_deref(),
            PlayerMode::Multi => config.multi.as_deref(),
        };
        let loaded = self.load(&[path], bitmaps);
        if loaded.is_none() {
            log::warn!("No {:?} player icon; it will not be drawn", mode);
        }
        let bitmap = loaded.map(|(_, key)| key);

        let transform = Transform::new(config.size, config.rotation);
        let configured_position = Point::new(config.x, config.y);
        let canvas = self.layout.frame.size();

        let fallback_position = bitmap
            .and_then(|key| bitmaps.get(key))
            .map(|bmp| image_extent(Size::new(bmp.width(), bmp.height()), config.area, &transform))
            .filter(|extent| Rect::new(configured_position, *extent).overflows(canvas))
            .map(|extent| corner_position(canvas, extent));
        if let Some(fallback) = fallback_position {
            log::info!(
                "Player icon at ({}, {}) overflows the canvas; moved to ({}, {})",
                configured_position.x,
                configured_position.y,
                fallback.x,
                fallback.y
            );
        }

        let icon = PlayerIconElement {
            bitmap,
            count,
            mode,
            single: config.single.clone(),
            multi: config.multi.clone(),
            transform,
            configured_position,
            fallback_position,
        };
        SceneElement::new(
            fallback_position.unwrap_or(configured_position),
            config.z,
            config.area,
            ElementKind::PlayerIcon(icon),
        )
    }
}

/// Bottom-right placement of an `extent` box with [`PLAYER_ICON_MARGIN`]
pub fn corner_position(canvas: Size, extent: Size) -> Point {
    let x = i64::from(canvas.width) - i64::from(extent.width) - i64::from(PLAYER_ICON_MARGIN);
    let y = i64::from(canvas.height) - i64::from(extent.height) - i64::from(PLAYER_ICON_MARGIN);
    Point::new(saturate(x), saturate(y))
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

fn insert_unique(elements: &mut IndexMap<String, SceneElement>, name: &str, element: SceneElement) {
    if elements.contains_key(name) {
        log::warn!(
            "Duplicate element name '{}' ({}); keeping the first one",
            name,
            element.kind.label()
        );
        return;
    }
    elements.insert(name.to_string(), element);
}
