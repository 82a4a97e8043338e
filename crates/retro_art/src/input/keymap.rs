//! Key bindings
//!
//! | Modifiers      | Key         | Command                   |
//! |----------------|-------------|---------------------------|
//! | none           | arrows      | move selection            |
//! | none           | Tab         | select next               |
//! | none           | Escape      | quit                      |
//! | Ctrl           | Up / Down   | scale (font size on text) |
//! | Ctrl           | Left / Right| rotate                    |
//! | Ctrl           | S           | save                      |
//! | Ctrl + Shift   | Up / Down   | depth                     |

use super::{KeyCode, Modifiers};

/// Edit requested by a key press; magnitudes come from the editor settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    /// Move the selection by this many steps on each axis
    Move {
        /// Horizontal steps
        dx: i32,
        /// Vertical steps
        dy: i32,
    },
    /// Cycle the selection
    SelectNext,
    /// Grow (+1) or shrink (-1) the selection
    Scale(i32),
    /// Rotate counter-clockwise (+1) or clockwise (-1)
    Rotate(i32),
    /// Raise (+1) or lower (-1) the selection
    Depth(i32),
    /// Write the layout and the raster
    Save,
    /// End the session
    Quit,
}

/// Command bound to a key press, `None` for unbound combinations
pub fn map_key(key: KeyCode, modifiers: Modifiers) -> Option<EditCommand> {
    let precision = Modifiers::CTRL;
    let depth = Modifiers::CTRL | Modifiers::SHIFT;

    if modifiers.is_empty() {
        return match key {
            KeyCode::Up => Some(EditCommand::Move { dx: 0, dy: -1 }),
            KeyCode::Down => Some(EditCommand::Move { dx: 0, dy: 1 }),
            KeyCode::Left => Some(EditCommand::Move { dx: -1, dy: 0 }),
            KeyCode::Right => Some(EditCommand::Move { dx: 1, dy: 0 }),
            KeyCode::Tab => Some(EditCommand::SelectNext),
            KeyCode::Escape => Some(EditCommand::Quit),
            _ => None,
        };
    }

    if modifiers == precision {
        return match key {
            KeyCode::Up => Some(EditCommand::Scale(1)),
            KeyCode::Down => Some(EditCommand::Scale(-1)),
            KeyCode::Left => Some(EditCommand::Rotate(1)),
            KeyCode::Right => Some(EditCommand::Rotate(-1)),
            KeyCode::S => Some(EditCommand::Save),
            _ => None,
        };
    }

    if modifiers == depth {
        return match key {
            KeyCode::Up => Some(EditCommand::Depth(1)),
            KeyCode::Down => Some(EditCommand::Depth(-1)),
            _ => None,
        };
    }

    None
}
