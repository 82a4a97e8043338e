//! Canvas abstraction
//!
//! Defines the interface between the scene renderer and drawing backends.
//! Keeps the render contract independent of any particular 2D library.

use super::RenderError;
use crate::assets::Bitmap;
use crate::config::Rgb;
use crate::foundation::math::{Point, Rect, Size};
use crate::text::Font;

/// Backend-agnostic 2D drawing interface
pub trait Canvas {
    /// Drawing surface size
    fn size(&self) -> Size;

    /// Fill the whole surface with a color
    fn clear(&mut self, color: Rgb) -> Result<(), RenderError>;

    /// Alpha blend a bitmap with its top-left corner at `position`
    fn blit(&mut self, bitmap: &Bitmap, position: Point) -> Result<(), RenderError>;

    /// Draw one line of text with its top edge at `position.y`
    fn draw_text(
        &mut self,
        font: &Font,
        text: &str,
        position: Point,
        font_size: u32,
        color: Rgb,
    ) -> Result<(), RenderError>;

    /// Draw a rectangle outline, `thickness` pixels wide, inside `rect`
    fn draw_rect(&mut self, rect: Rect, color: Rgb, thickness: u32) -> Result<(), RenderError>;
}
