//! The editable scene
//!
//! Elements are kept in an insertion-ordered map. `edit_order` is the same
//! set of names sorted by depth (stable on insertion order); it drives both
//! drawing (ascending) and hit-testing (descending), and is recomputed on
//! every depth change.

use indexmap::IndexMap;

use super::element::{image_extent, ElementKind, SceneElement};
use super::SceneError;
use crate::assets::{BitmapKey, BitmapStore};
use crate::config::{
    FontConfig, FrameConfig, ImageSlotConfig, LayoutConfig, PlayersConfig, RatingConfig, Rgb,
    TextSlotConfig,
};
use crate::foundation::math::{Point, Rect, Size};
use crate::text::{layout_text, Font};

/// Layered promo image for one game
#[derive(Debug)]
pub struct Scene {
    canvas: Size,
    background: Rgb,
    font: Font,
    font_path: Option<String>,
    elements: IndexMap<String, SceneElement>,
    edit_order: Vec<String>,
    selected: String,
    bitmaps: BitmapStore,
}

impl Scene {
    /// Assemble a scene; at least one element is required
    ///
    /// The initial selection is the lowest element in draw order.
    pub fn new(
        frame: &FrameConfig,
        font: Font,
        font_path: Option<String>,
        elements: IndexMap<String, SceneElement>,
        bitmaps: BitmapStore,
    ) -> Result<Self, SceneError> {
        let edit_order = sorted_by_depth(&elements);
        let selected = edit_order.first().cloned().ok_or(SceneError::Empty)?;

        log::debug!("Scene with {} elements, edit order {:?}", elements.len(), edit_order);

        Ok(Self {
            canvas: frame.size(),
            background: frame.color,
            font,
            font_path,
            elements,
            edit_order,
            selected,
            bitmaps,
        })
    }

    /// Canvas size
    pub const fn canvas(&self) -> Size {
        self.canvas
    }

    /// Background color
    pub const fn background(&self) -> Rgb {
        self.background
    }

    /// Font used by every text element
    pub const fn font(&self) -> &Font {
        &self.font
    }

    /// Bitmaps owned by the scene
    pub const fn bitmaps(&self) -> &BitmapStore {
        &self.bitmaps
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Never true for a constructed scene
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element by name
    pub fn element(&self, name: &str) -> Option<&SceneElement> {
        self.elements.get(name)
    }

    /// Elements in insertion order
    pub fn elements(&self) -> impl Iterator<Item = (&str, &SceneElement)> {
        self.elements.iter().map(|(name, element)| (name.as_str(), element))
    }

    /// Names sorted by depth, ties in insertion order
    pub fn edit_order(&self) -> &[String] {
        &self.edit_order
    }

    /// Elements bottom to top
    pub fn draw_order(&self) -> impl Iterator<Item = (&str, &SceneElement)> {
        self.edit_order
            .iter()
            .filter_map(|name| self.elements.get(name).map(|element| (name.as_str(), element)))
    }

    /// Name of the selected element
    pub fn selected(&self) -> &str {
        &self.selected
    }

    fn element_mut(&mut self, name: &str) -> Result<&mut SceneElement, SceneError> {
        self.elements
            .get_mut(name)
            .ok_or_else(|| SceneError::UnknownElement(name.to_string()))
    }

    /// Shift an element by a pixel delta
    pub fn move_element(&mut self, name: &str, dx: i32, dy: i32) -> Result<(), SceneError> {
        let element = self.element_mut(name)?;
        element.position = element.position.offset(dx, dy);
        Ok(())
    }

    /// Put an element's top-left corner at `position`
    pub fn set_position(&mut self, name: &str, position: Point) -> Result<(), SceneError> {
        self.element_mut(name)?.position = position;
        Ok(())
    }

    /// Adjust the scale of an element, never below the floor
    ///
    /// Text has no scale factor; its font size changes by the rounded delta.
    pub fn rescale(&mut self, name: &str, delta: f32) -> Result<(), SceneError> {
        let element = self.element_mut(name)?;
        match &mut element.kind {
            ElementKind::Text(text) => text.resize(delta.round() as i32),
            kind => {
                if let Some(transform) = kind.transform_mut() {
                    transform.rescale(delta);
                }
            }
        }
        Ok(())
    }

    /// Adjust the font size of a text element; other kinds are untouched
    pub fn resize_font(&mut self, name: &str, delta: i32) -> Result<(), SceneError> {
        if let ElementKind::Text(text) = &mut self.element_mut(name)?.kind {
            text.resize(delta);
        }
        Ok(())
    }

    /// Rotate an image or player icon; text and rating do not rotate
    pub fn rotate(&mut self, name: &str, delta_degrees: i32) -> Result<(), SceneError> {
        match &mut self.element_mut(name)?.kind {
            ElementKind::Image(image) => image.transform.rotate(delta_degrees),
            ElementKind::PlayerIcon(icon) => icon.transform.rotate(delta_degrees),
            ElementKind::Text(_) | ElementKind::Rating(_) => {}
        }
        Ok(())
    }

    /// Raise or lower an element, never below depth zero
    pub fn change_depth(&mut self, name: &str, delta: i32) -> Result<(), SceneError> {
        let element = self.element_mut(name)?;
        element.depth = element.depth.saturating_add(delta).max(0);
        let depth = element.depth;
        self.edit_order = sorted_by_depth(&self.elements);
        log::debug!("'{}' now at depth {}, edit order {:?}", name, depth, self.edit_order);
        Ok(())
    }

    /// Select the next element in edit order, wrapping around
    pub fn select_next(&mut self) -> &str {
        let current = self.edit_order.iter().position(|name| *name == self.selected);
        let next = current.map_or(0, |idx| (idx + 1) % self.edit_order.len());
        if let Some(name) = self.edit_order.get(next) {
            self.selected.clone_from(name);
        }
        &self.selected
    }

    /// Select an element by name
    pub fn select(&mut self, name: &str) -> Result<(), SceneError> {
        if !self.elements.contains_key(name) {
            return Err(SceneError::UnknownElement(name.to_string()));
        }
        self.selected = name.to_string();
        Ok(())
    }

    /// Topmost element whose on-screen box contains `point`
    pub fn hit_test(&self, point: Point) -> Option<&str> {
        self.edit_order
            .iter()
            .rev()
            .find(|name| self.element_rect(name).is_some_and(|rect| rect.contains(point)))
            .map(String::as_str)
    }

    /// Select the topmost element under `point`; a miss keeps the selection
    pub fn select_at(&mut self, point: Point) -> Option<&str> {
        let hit = self.hit_test(point)?.to_string();
        self.selected = hit;
        Some(&self.selected)
    }

    fn bitmap_size(&self, key: Option<BitmapKey>) -> Option<Size> {
        let bitmap = self.bitmaps.get(key?)?;
        let (width, height) = bitmap.dimensions();
        Some(Size::new(width, height))
    }

    /// Current on-screen box of an element
    ///
    /// `None` for imageless image slots and empty text, which draw nothing
    /// and cannot be hit.
    pub fn element_rect(&self, name: &str) -> Option<Rect> {
        let element = self.elements.get(name)?;
        let size = match &element.kind {
            ElementKind::Image(image) => {
                image_extent(self.bitmap_size(image.bitmap)?, element.area, &image.transform)
            }
            ElementKind::PlayerIcon(icon) => {
                image_extent(self.bitmap_size(icon.bitmap)?, element.area, &icon.transform)
            }
            ElementKind::Text(text) => {
                layout_text(&self.font, &text.content, text.font_size(), element.area).size
            }
            ElementKind::Rating(rating) => rating.row_extent(self.bitmap_size(rating.stars.full)),
        };
        (!size.is_empty()).then(|| Rect::new(element.position, size))
    }

    /// Flatten the scene back into a layout document
    ///
    /// Selection is not part of the layout. A player icon still sitting at
    /// its overflow fallback is written with its configured position so the
    /// next construction makes the same decision.
    pub fn to_layout(&self) -> LayoutConfig {
        let mut layout = LayoutConfig {
            frame: FrameConfig {
                width: self.canvas.width,
                height: self.canvas.height,
                color: self.background,
            },
            font: FontConfig { path: self.font_path.clone() },
            ..LayoutConfig::default()
        };

        for (name, element) in &self.elements {
            let SceneElement { position, depth, area, kind } = element;
            match kind {
                ElementKind::Image(image) => {
                    layout.images.insert(
                        name.clone(),
                        ImageSlotConfig {
                            path: image.path.clone(),
                            default: image.default.clone(),
                            x: position.x,
                            y: position.y,
                            z: *depth,
                            size: image.transform.scale(),
                            rotation: image.transform.rotation,
                            area: *area,
                        },
                    );
                }
                ElementKind::Text(text) => {
                    layout.texts.insert(
                        name.clone(),
                        TextSlotConfig {
                            x: position.x,
                            y: position.y,
                            z: *depth,
                            font_size: text.font_size(),
                            color: text.color,
                            area: *area,
                            field: text.field.clone(),
                            prefix: text.prefix.clone(),
                        },
                    );
                }
                ElementKind::Rating(rating) => {
                    layout.rating = Some(RatingConfig {
                        x: position.x,
                        y: position.y,
                        z: *depth,
                        size: rating.transform.scale(),
                        star_full: rating.paths.full.clone(),
                        star_half: rating.paths.half.clone(),
                        star_empty: rating.paths.empty.clone(),
                    });
                }
                ElementKind::PlayerIcon(icon) => {
                    let position = match icon.fallback_position {
                        Some(fallback) if fallback == *position => icon.configured_position,
                        _ => *position,
                    };
                    layout.players = Some(PlayersConfig {
                        single: icon.single.clone(),
                        multi: icon.multi.clone(),
                        x: position.x,
                        y: position.y,
                        z: *depth,
                        size: icon.transform.scale(),
                        rotation: icon.transform.rotation,
                        area: *area,
                    });
                }
            }
        }

        layout
    }
}

fn sorted_by_depth(elements: &IndexMap<String, SceneElement>) -> Vec<String> {
    let mut order: Vec<(&String, i32)> = elements.iter().map(|(name, e)| (name, e.depth)).collect();
    order.sort_by_key(|(_, depth)| *depth);
    order.into_iter().map(|(name, _)| name.clone()).collect()
}
