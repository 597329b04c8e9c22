//! Label lookup for panel text. Ships English defaults; a JSON object of
//! key/text pairs can override any of them.

use std::collections::HashMap;

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone)]
pub struct Trans {
    overrides: HashMap<String, String>,
}

impl Trans {
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: HashMap<String, String> =
            serde_json::from_str(json).context("translation file is not a JSON object of strings")?;
        Ok(Self { overrides })
    }

    /// Label for `key`, falling back to the key itself when it is unknown
    /// everywhere.
    pub fn noarg(&self, key: &str) -> String {
        if let Some(text) = self.overrides.get(key) {
            return text.clone();
        }
        default_text(key)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }
}

fn default_text(key: &str) -> Option<&'static str> {
    Some(match key {
        "flip_board" => "Flip board",
        "board_editor" => "Board editor",
        "continue_from_here" => "Continue from here",
        "open_study" => "Open study",
        "study" => "Study",
        "preferences" => "Preferences",
        "inline_notation" => "Inline notation",
        "computer_analysis" => "Computer analysis",
        "enable" => "Enable",
        "required_by_practice" => "Required by practice mode",
        "best_move_arrow" => "Best move arrow",
        "evaluation_gauge" => "Evaluation gauge",
        "infinite_analysis" => "Infinite analysis",
        "removes_depth_limit" => "Removes the depth limit",
        "multiple_lines" => "Multiple lines",
        "cpus" => "CPUs",
        "memory" => "Memory",
        "replay_mode" => "Replay mode",
        "fast" => "Fast",
        "slow" => "Slow",
        "realtime_replay" => "Realtime",
        "by_eval_loss" => "By eval loss",
        "delete" => "Delete",
        "delete_imported_game" => "Delete this imported game?",
        "play_machine" => "Play with the computer",
        "play_friend" => "Play with a friend",
        _ => return None,
    })
}
