//! Editor tuning knobs

use super::{Config, Rgb};
use serde::{Deserialize, Serialize};

/// # Editor Settings
///
/// Step sizes for keyboard edits and the look of the selection outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Pixels moved per arrow key press
    pub move_step: i32,
    /// Scale change per precision key press
    pub scale_step: f32,
    /// Font size change per precision key press on text
    pub font_step: i32,
    /// Degrees rotated per precision key press
    pub rotation_step: i32,
    /// Selection outline color
    pub outline_color: Rgb,
    /// Selection outline thickness in pixels
    pub outline_thickness: u32,
}

impl EditorSettings {
    /// Create settings with the default steps
    pub fn new() -> Self {
        Self {
            move_step: 5,
            scale_step: 0.1,
            font_step: 1,
            rotation_step: 5,
            outline_color: Rgb::RED,
            outline_thickness: 2,
        }
    }

    /// Set the arrow key step
    pub fn with_move_step(mut self, step: i32) -> Self {
        self.move_step = step;
        self
    }

    /// Set the rotation step
    pub fn with_rotation_step(mut self, degrees: i32) -> Self {
        self.rotation_step = degrees;
        self
    }

    /// Set the selection outline look
    pub fn with_outline(mut self, color: Rgb, thickness: u32) -> Self {
        self.outline_color = color;
        self.outline_thickness = thickness;
        self
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EditorSettings {}
