//! Player count parsing for the player icon

use serde::{Deserialize, Serialize};

/// Which player icon a game gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerMode {
    /// One player
    Single,
    /// Two or more players
    Multi,
}

impl PlayerMode {
    /// Mode for a parsed player count
    pub const fn from_count(count: u32) -> Self {
        if count <= 1 {
            Self::Single
        } else {
            Self::Multi
        }
    }

    /// Mode for a free-form player string
    pub fn from_players(raw: &str) -> Self {
        Self::from_count(player_count(raw))
    }
}

/// Parse a free-form player count such as `"2"`, `"1-4"` or `"2 (alt)"`
///
/// A bare integer is taken as is. Otherwise the largest digit in the string
/// wins, and a string without digits counts as one player.
pub fn player_count(raw: &str) -> u32 {
    let trimmed = raw.trim();
    if let Ok(count) = trimmed.parse::<u32>() {
        return count;
    }
    trimmed.chars().filter_map(|c| c.to_digit(10)).max().unwrap_or(1)
}
