//! Routes into the game server shared by the continuation links.

use crate::game::GameData;

/// Opponent for a continuation of the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueMode {
    Ai,
    Friend,
}

impl ContinueMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContinueMode::Ai => "ai",
            ContinueMode::Friend => "friend",
        }
    }
}

/// Continue route keyed by the original game.
pub fn cont(data: &GameData, mode: ContinueMode) -> String {
    format!("/{}/continue/{}", data.id, mode.as_str())
}
