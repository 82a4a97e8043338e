//! # Layout Configuration
//!
//! The layout document describes where every element of a promo image sits.
//! It is both the input of scene construction and the output of an editing
//! session, so every field a later construction needs is serialized back.
//!
//! ## Groups
//!
//! - `frame`: canvas size and background color
//! - `font`: font file used for text slots
//! - `images`: named image slots (`logo`, `cover`, `wheel`, `screenshot`, ...)
//! - `texts`: named text slots, filled from game record fields
//! - `rating`: star rating widget
//! - `players`: single/multi player icon
//!
//! ## Defaults
//!
//! Missing keys take the documented defaults below. [`LayoutConfig::load_lenient`]
//! additionally tolerates malformed groups and slots, replacing each broken
//! piece with its default instead of rejecting the whole document.

use super::{Config, ConfigError, ConfigFormat, Rgb};
use crate::foundation::math::{Point, Size};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Canvas settings. Defaults: 1280×720, black background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Background color
    pub color: Rgb,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            color: Rgb::BLACK,
        }
    }
}

impl FrameConfig {
    /// Canvas size
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Font settings. Default: no font file, built-in metrics only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// TrueType/OpenType font file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// One image slot. Defaults: origin, depth 0, scale 1.0, no rotation, no area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSlotConfig {
    /// Preferred image file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Fallback image file when `path` is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Depth (higher draws on top)
    pub z: i32,
    /// Explicit scale factor
    pub size: f32,
    /// Rotation in degrees, counter-clockwise
    pub rotation: i32,
    /// Fit-to-area box
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Size>,
}

impl Default for ImageSlotConfig {
    fn default() -> Self {
        Self {
            path: None,
            default: None,
            x: 0,
            y: 0,
            z: 0,
            size: 1.0,
            rotation: 0,
            area: None,
        }
    }
}

impl ImageSlotConfig {
    /// Slot placed at a position and depth
    pub fn at(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z, ..Self::default() }
    }

    /// Set the fit-to-area box
    pub fn with_area(mut self, width: u32, height: u32) -> Self {
        self.area = Some(Size::new(width, height));
        self
    }

    /// Set the preferred image path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the fallback image path
    pub fn with_default(mut self, path: impl Into<String>) -> Self {
        self.default = Some(path.into());
        self
    }

    /// Set the rotation
    pub fn with_rotation(mut self, degrees: i32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set the explicit scale factor
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Configured position
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One text slot. Defaults: origin, depth 0, 24 px white text, single line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSlotConfig {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Depth (higher draws on top)
    pub z: i32,
    /// Font size in pixels
    pub font_size: u32,
    /// Text color
    pub color: Rgb,
    /// Wrapping box
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Size>,
    /// Game record field to display; defaults to the slot name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Label prepended to non-empty content, e.g. `"Players: "`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl Default for TextSlotConfig {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            z: 0,
            font_size: 24,
            color: Rgb::WHITE,
            area: None,
            field: None,
            prefix: None,
        }
    }
}

impl TextSlotConfig {
    /// Slot placed at a position and depth
    pub fn at(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z, ..Self::default() }
    }

    /// Set the wrapping box
    pub fn with_area(mut self, width: u32, height: u32) -> Self {
        self.area = Some(Size::new(width, height));
        self
    }

    /// Set the font size
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Display a different record field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Prepend a label
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

/// Star rating widget. Defaults: origin, depth 0, scale 1.0, no star images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Depth (higher draws on top)
    pub z: i32,
    /// Star scale factor
    pub size: f32,
    /// Full star image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_full: Option<String>,
    /// Half star image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_half: Option<String>,
    /// Empty star image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_empty: Option<String>,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            z: 0,
            size: 1.0,
            star_full: None,
            star_half: None,
            star_empty: None,
        }
    }
}

/// Player count icon. Defaults: origin, depth 0, scale 1.0, no images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    /// Icon for one player
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single: Option<String>,
    /// Icon for two or more players
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi: Option<String>,
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Depth (higher draws on top)
    pub z: i32,
    /// Explicit scale factor
    pub size: f32,
    /// Rotation in degrees, counter-clockwise
    pub rotation: i32,
    /// Fit-to-area box
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Size>,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        Self {
            single: None,
            multi: None,
            x: 0,
            y: 0,
            z: 0,
            size: 1.0,
            rotation: 0,
            area: None,
        }
    }
}

/// # Complete Layout Document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Canvas settings
    pub frame: FrameConfig,
    /// Font settings
    pub font: FontConfig,
    /// Image slots in insertion order
    pub images: IndexMap<String, ImageSlotConfig>,
    /// Text slots in insertion order
    pub texts: IndexMap<String, TextSlotConfig>,
    /// Optional star rating widget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingConfig>,
    /// Optional player icon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<PlayersConfig>,
}

impl Config for LayoutConfig {}

impl LayoutConfig {
    /// A complete layout for a 1280×720 promo image
    ///
    /// Mirrors the classic arrangement: screenshot on the right, logo top
    /// left, cover and wheel bottom right, title/description on the left.
    pub fn standard() -> Self {
        let mut images = IndexMap::new();
        images.insert("screenshot".to_string(), ImageSlotConfig::at(832, 0, 0).with_area(448, 720));
        images.insert("logo".to_string(), ImageSlotConfig::at(20, 20, 1).with_area(300, 150));
        images.insert(
            "cover".to_string(),
            ImageSlotConfig::at(832, 400, 2).with_area(200, 300).with_rotation(-10),
        );
        images.insert("wheel".to_string(), ImageSlotConfig::at(1024, 540, 3).with_area(150, 150));

        let mut texts = IndexMap::new();
        texts.insert("title".to_string(), TextSlotConfig::at(20, 200, 4).with_font_size(36));
        texts.insert(
            "description".to_string(),
            TextSlotConfig::at(20, 260, 4).with_area(780, 380).with_font_size(20),
        );

        Self {
            frame: FrameConfig::default(),
            font: FontConfig::default(),
            images,
            texts,
            rating: Some(RatingConfig { x: 20, y: 660, z: 5, size: 1.0, ..RatingConfig::default() }),
            players: Some(PlayersConfig { x: 300, y: 660, z: 5, ..PlayersConfig::default() }),
        }
    }

    /// Load a layout, replacing malformed or missing pieces with defaults
    ///
    /// Only an unreadable file or a document that is not a key/value tree at
    /// all is an error; everything below the top level degrades per group
    /// (`frame`, `font`, `rating`, `players`) or per slot (`images.*`,
    /// `texts.*`).
    ///
    /// RON struct and tuple syntax, which is what [`Config::save_to_file`]
    /// writes, has no untyped map form; such documents are read strictly.
    pub fn load_lenient<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        let document: Value = match format.parse(&contents) {
            Ok(document) => document,
            Err(error) if format == ConfigFormat::Ron => {
                log::debug!("{:?} is not a plain RON map ({}), reading it strictly", path, error);
                return format.parse(&contents);
            }
            Err(error) => return Err(error),
        };
        Self::from_value_lenient(&document)
    }

    /// Lenient conversion from an already-parsed document
    pub fn from_value_lenient(document: &Value) -> Result<Self, ConfigError> {
        let Some(root) = document.as_object() else {
            return Err(ConfigError::Parse("layout document must be a table of groups".to_string()));
        };

        let frame = required_group::<FrameConfig>(root, "frame");
        let font = required_group::<FontConfig>(root, "font");
        let rating = optional_group::<RatingConfig>(root, "rating");
        let players = optional_group::<PlayersConfig>(root, "players");
        let images = slot_group::<ImageSlotConfig>(root, "images");
        let texts = slot_group::<TextSlotConfig>(root, "texts");

        Ok(Self { frame, font, images, texts, rating, players })
    }
}

fn report(error: &ConfigError) {
    log::warn!("Layout: {}; using default", error);
}

fn parse_key<T: for<'de> Deserialize<'de>>(key: &str, value: &Value) -> Result<T, ConfigError> {
    T::deserialize(value).map_err(|e| ConfigError::InvalidKey {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn required_group<T>(root: &serde_json::Map<String, Value>, key: &str) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    let Some(value) = root.get(key) else {
        report(&ConfigError::MissingKey(key.to_string()));
        return T::default();
    };
    parse_key(key, value).unwrap_or_else(|error| {
        report(&error);
        T::default()
    })
}

fn optional_group<T>(root: &serde_json::Map<String, Value>, key: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    let value = root.get(key)?;
    Some(parse_key(key, value).unwrap_or_else(|error| {
        report(&error);
        T::default()
    }))
}

fn slot_group<T>(root: &serde_json::Map<String, Value>, key: &str) -> IndexMap<String, T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    let mut slots = IndexMap::new();
    let Some(value) = root.get(key) else {
        return slots;
    };
    let Some(entries) = value.as_object() else {
        report(&ConfigError::InvalidKey {
            key: key.to_string(),
            reason: "expected a table of slots".to_string(),
        });
        return slots;
    };
    for (name, slot) in entries {
        let dotted = format!("{}.{}", key, name);
        let parsed = parse_key(&dotted, slot).unwrap_or_else(|error| {
            report(&error);
            T::default()
        });
        slots.insert(name.clone(), parsed);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let layout: LayoutConfig = serde_json::from_value(json!({
            "images": { "logo": { "x": 5 } },
            "texts": { "title": {} }
        }))
        .unwrap();

        assert_eq!(layout.frame, FrameConfig::default());
        let logo = &layout.images["logo"];
        assert_eq!(logo.x, 5);
        assert!((logo.size - 1.0).abs() < f32::EPSILON);
        assert_eq!(layout.texts["title"].font_size, 24);
        assert!(layout.rating.is_none());
    }

    #[test]
    fn test_lenient_falls_back_per_group_and_slot() {
        let document = json!({
            "frame": { "width": "wide" },
            "images": {
                "logo": { "x": 10, "y": 10 },
                "cover": { "x": [1, 2] }
            },
            "rating": { "size": 2.0 }
        });

        let layout = LayoutConfig::from_value_lenient(&document).unwrap();
        assert_eq!(layout.frame, FrameConfig::default());
        assert_eq!(layout.images["logo"].x, 10);
        assert_eq!(layout.images["cover"], ImageSlotConfig::default());
        assert_eq!(layout.images.get_index(0).map(|(k, _)| k.as_str()), Some("logo"));
        assert!((layout.rating.unwrap().size - 2.0).abs() < f32::EPSILON);
        assert!(layout.players.is_none());
    }

    #[test]
    fn test_lenient_rejects_non_table_document() {
        assert!(LayoutConfig::from_value_lenient(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_saved_layout_reloads_in_every_format() {
        let dir = std::env::temp_dir().join(format!("retro_art_layout_formats_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut layout = LayoutConfig::standard();
        layout.frame.color = Rgb::new(16, 16, 24);
        layout.font.path = Some("fonts/arcade.ttf".to_string());
        layout.texts["title"].prefix = Some("Now playing: ".to_string());

        for extension in ["json", "toml", "ron"] {
            let path = dir.join(format!("layout.{}", extension));
            layout.save_to_file(&path).unwrap();
            let loaded = LayoutConfig::load_lenient(&path).unwrap();
            assert_eq!(loaded, layout, "{} layout changed on reload", extension);
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_lenient_ron_map_still_degrades_per_slot() {
        let dir = std::env::temp_dir().join(format!("retro_art_layout_ron_map_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("layout.ron");
        std::fs::write(
            &path,
            r#"{ "images": { "logo": { "x": 12 }, "cover": { "x": "left" } } }"#,
        )
        .unwrap();

        let layout = LayoutConfig::load_lenient(&path).unwrap();
        assert_eq!(layout.images["logo"].x, 12);
        assert_eq!(layout.images["cover"], ImageSlotConfig::default());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_standard_layout_round_trips_through_toml() {
        let layout = LayoutConfig::standard();
        let text = ConfigFormat::Toml.render(&layout).unwrap();
        let back: LayoutConfig = ConfigFormat::Toml.parse(&text).unwrap();
        assert_eq!(back, layout);
    }
}
