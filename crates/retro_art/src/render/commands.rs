//! Recorded draw commands
//!
//! [`RecordingCanvas`] captures what a render pass asked for instead of
//! producing pixels. Used by previews that only need geometry and by the
//! render order tests.

use super::{Canvas, RenderError};
use crate::assets::Bitmap;
use crate::config::Rgb;
use crate::foundation::math::{Point, Rect, Size};
use crate::text::Font;

/// One canvas call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// Surface cleared
    Clear(Rgb),
    /// Bitmap blitted
    Blit {
        /// Top-left corner
        position: Point,
        /// Bitmap size after all transforms
        size: Size,
    },
    /// Text line drawn
    Text {
        /// Line content
        text: String,
        /// Top-left corner of the line
        position: Point,
        /// Font size in pixels
        font_size: u32,
        /// Text color
        color: Rgb,
    },
    /// Outline drawn
    Rect {
        /// Outer rectangle
        rect: Rect,
        /// Outline color
        color: Rgb,
        /// Outline thickness
        thickness: u32,
    },
}

/// Canvas that records commands
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create a recording canvas of a given size
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Commands in the order they were issued
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget everything recorded so far
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Rgb) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn blit(&mut self, bitmap: &Bitmap, position: Point) -> Result<(), RenderError> {
        let (width, height) = bitmap.dimensions();
        self.commands.push(DrawCommand::Blit {
            position,
            size: Size::new(width, height),
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        _font: &Font,
        text: &str,
        position: Point,
        font_size: u32,
        color: Rgb,
    ) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            font_size,
            color,
        });
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, color: Rgb, thickness: u32) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Rect { rect, color, thickness });
        Ok(())
    }
}
