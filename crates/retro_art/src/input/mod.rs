//! Input events
//!
//! The editor is fed backend-neutral [`InputEvent`]s, polled once per frame
//! from an [`InputSource`]. Windowing backends translate their own events
//! into these; [`ScriptedInput`] replays a recorded list.

mod keymap;

pub use keymap::{map_key, EditCommand};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Key codes the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// S key
    S,
    /// Q key
    Q,
    /// Tab key
    Tab,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Any other key
    Other,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

bitflags! {
    /// Modifier keys held during a key press
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u8 {
        /// Control, the precision modifier
        const CTRL = 0b0001;
        /// Shift, combined with control for depth edits
        const SHIFT = 0b0010;
        /// Alt
        const ALT = 0b0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::empty()
    }
}

/// One input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Window closed or quit requested
    Quit,
    /// Pointer button pressed
    PointerPressed {
        /// Cursor x
        x: i32,
        /// Cursor y
        y: i32,
        /// Button
        button: MouseButton,
    },
    /// Pointer moved
    PointerMoved {
        /// Cursor x
        x: i32,
        /// Cursor y
        y: i32,
    },
    /// Pointer button released
    PointerReleased {
        /// Cursor x
        x: i32,
        /// Cursor y
        y: i32,
        /// Button
        button: MouseButton,
    },
    /// Key pressed
    KeyPressed {
        /// Key
        key: KeyCode,
        /// Modifiers held
        #[serde(default)]
        modifiers: Modifiers,
    },
}

impl InputEvent {
    /// Key press without modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self::KeyPressed { key, modifiers: Modifiers::empty() }
    }

    /// Key press with modifiers
    pub const fn key_with(key: KeyCode, modifiers: Modifiers) -> Self {
        Self::KeyPressed { key, modifiers }
    }
}

/// Source of input events, polled once per frame
pub trait InputSource {
    /// Every event that arrived since the last poll
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// Replays recorded events, one per frame, then quits
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    /// Replay these events
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Parse a RON list of events
    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        let events: Vec<InputEvent> = ron::from_str(text)?;
        Ok(Self::new(events))
    }

    /// Events not yet delivered
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        match self.events.pop_front() {
            Some(event) => vec![event],
            // an exhausted script ends the session
            None => vec![InputEvent::Quit],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_from_ron() {
        let script = r#"[
            KeyPressed(key: Tab),
            KeyPressed(key: Up, modifiers: "CTRL | SHIFT"),
            PointerPressed(x: 10, y: 20, button: Left),
            Quit,
        ]"#;
        let mut input = ScriptedInput::from_ron(script).unwrap();
        assert_eq!(input.remaining(), 4);
        assert_eq!(input.poll(), vec![InputEvent::key(KeyCode::Tab)]);
        assert_eq!(
            input.poll(),
            vec![InputEvent::key_with(KeyCode::Up, Modifiers::CTRL | Modifiers::SHIFT)]
        );
    }

    #[test]
    fn test_exhausted_script_quits() {
        let mut input = ScriptedInput::new([InputEvent::key(KeyCode::S)]);
        assert_eq!(input.poll().len(), 1);
        assert_eq!(input.poll(), vec![InputEvent::Quit]);
        assert_eq!(input.poll(), vec![InputEvent::Quit]);
    }
}
