//! Scene renderer
//!
//! Turns a [`Scene`] into canvas calls. Rendering is a pure function of the
//! scene: clear, then every element bottom to top, then the selection
//! outline. A failing element is logged and skipped for that frame.

use std::path::Path;

use super::transform::{resize, transform_bitmap};
use super::{Canvas, RasterCanvas, RenderError};
use crate::assets::BitmapKey;
use crate::config::{EditorSettings, Rgb};
use crate::foundation::math::{Point, Size};
use crate::scene::{
    ElementKind, RatingElement, Scene, SceneElement, TextElement, Transform, STAR_SPACING,
};
use crate::text::layout_text;

/// Per-pass switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Draw the selection outline
    pub outlines: bool,
    /// Outline color
    pub outline_color: Rgb,
    /// Outline thickness in pixels
    pub outline_thickness: u32,
}

impl RenderOptions {
    /// Interactive pass: outline the selection
    pub const fn interactive() -> Self {
        Self {
            outlines: true,
            outline_color: Rgb::RED,
            outline_thickness: 2,
        }
    }

    /// Export pass: no outlines
    pub const fn export() -> Self {
        Self {
            outlines: false,
            ..Self::interactive()
        }
    }

    /// Interactive pass styled by editor settings
    pub const fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            outlines: true,
            outline_color: settings.outline_color,
            outline_thickness: settings.outline_thickness,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::interactive()
    }
}

/// Stateless scene renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneRenderer {
    options: RenderOptions,
}

impl SceneRenderer {
    /// Create a renderer with the given options
    pub const fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub const fn options(&self) -> RenderOptions {
        self.options
    }

    /// Draw the whole scene
    ///
    /// Only a failure to clear the canvas is returned; per-element failures
    /// are logged and that element is skipped.
    pub fn render(&self, scene: &Scene, canvas: &mut dyn Canvas) -> Result<(), RenderError> {
        canvas.clear(scene.background())?;

        for (name, element) in scene.draw_order() {
            if let Err(e) = draw_element(scene, element, canvas) {
                log::warn!("Skipping element '{}' this frame: {}", name, e);
            }
        }

        if self.options.outlines {
            let selected = scene.selected();
            if let Some(rect) = scene.element_rect(selected) {
                if let Err(e) = canvas.draw_rect(rect, self.options.outline_color, self.options.outline_thickness) {
                    log::warn!("Failed to outline '{}': {}", selected, e);
                }
            }
        }
        Ok(())
    }

    /// Render with outlines suppressed and write the pixels to `path`
    pub fn export<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<(), RenderError> {
        let mut canvas = RasterCanvas::new(scene.canvas());
        Self::new(RenderOptions::export()).render(scene, &mut canvas)?;
        canvas.save(path)
    }
}

fn draw_element(scene: &Scene, element: &SceneElement, canvas: &mut dyn Canvas) -> Result<(), RenderError> {
    match &element.kind {
        ElementKind::Image(image) => draw_bitmap(scene, image.bitmap, element, &image.transform, canvas),
        ElementKind::PlayerIcon(icon) => draw_bitmap(scene, icon.bitmap, element, &icon.transform, canvas),
        ElementKind::Text(text) => draw_text(scene, text, element, canvas),
        ElementKind::Rating(rating) => draw_rating(scene, rating, element.position, canvas),
    }
}

fn draw_bitmap(
    scene: &Scene,
    key: Option<BitmapKey>,
    element: &SceneElement,
    transform: &Transform,
    canvas: &mut dyn Canvas,
) -> Result<(), RenderError> {
    // imageless slots draw nothing
    let Some(key) = key else {
        return Ok(());
    };
    let bitmap = scene
        .bitmaps()
        .get(key)
        .ok_or_else(|| RenderError::MissingBitmap(format!("{:?}", key)))?;
    let drawn = transform_bitmap(bitmap, element.area, transform);
    canvas.blit(&drawn, element.position)
}

fn draw_text(
    scene: &Scene,
    text: &TextElement,
    element: &SceneElement,
    canvas: &mut dyn Canvas,
) -> Result<(), RenderError> {
    let layout = layout_text(scene.font(), &text.content, text.font_size(), element.area);
    let mut y = element.position.y;
    for line in &layout.lines {
        let position = Point::new(element.position.x, y);
        canvas.draw_text(scene.font(), line, position, text.font_size(), text.color)?;
        y = y.saturating_add(i32::try_from(layout.line_height).unwrap_or(i32::MAX));
    }
    Ok(())
}

fn draw_rating(
    scene: &Scene,
    rating: &RatingElement,
    origin: Point,
    canvas: &mut dyn Canvas,
) -> Result<(), RenderError> {
    let bitmaps = scene.bitmaps();
    let reference = rating
        .stars
        .full
        .and_then(|key| bitmaps.get(key))
        .map(|bitmap| Size::new(bitmap.width(), bitmap.height()));
    let star_size = rating.star_size(reference);
    let step = i32::try_from(star_size.width + STAR_SPACING).unwrap_or(i32::MAX);

    let counts = rating.star_counts();
    let sequence = std::iter::repeat(rating.stars.full)
        .take(usize::from(counts.full))
        .chain(std::iter::repeat(rating.stars.half).take(usize::from(counts.half)))
        .chain(std::iter::repeat(rating.stars.empty).take(usize::from(counts.empty)));

    let mut x = origin.x;
    for key in sequence {
        // a missing star image leaves a gap
        if let Some(bitmap) = key.and_then(|key| bitmaps.get(key)) {
            canvas.blit(&resize(bitmap, star_size), Point::new(x, origin.y))?;
        }
        x = x.saturating_add(step);
    }
    Ok(())
}
