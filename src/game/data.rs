use serde::{Deserialize, Serialize};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Where a game record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    Lobby,
    Friend,
    Ai,
    Import,
}

/// Variant of play. Continuation is only offered for standard chess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantKey {
    Standard,
    Chess960,
    KingOfTheHill,
    ThreeCheck,
    Antichess,
    Atomic,
}

impl VariantKey {
    pub fn key(&self) -> &'static str {
        match self {
            VariantKey::Standard => "standard",
            VariantKey::Chess960 => "chess960",
            VariantKey::KingOfTheHill => "kingOfTheHill",
            VariantKey::ThreeCheck => "threeCheck",
            VariantKey::Antichess => "antichess",
            VariantKey::Atomic => "atomic",
        }
    }
}

/// Server-side post-hoc analysis attached to a finished game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerAnalysis {
    /// Centipawn loss per ply, mainline order.
    pub cp_loss: Vec<u16>,
}

/// Metadata for the game under analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameData {
    pub id: String,
    pub source: Source,
    pub variant: VariantKey,
    /// User who imported the game, when `source` is `Import`.
    pub imported_by: Option<String>,
    /// Per-move clock readings in centiseconds, empty when not recorded.
    pub move_centis: Vec<u32>,
    pub analysis: Option<ServerAnalysis>,
    /// True for a local analysis board not backed by a played game.
    pub user_analysis: bool,
    /// Custom starting position, standard when absent.
    pub initial_fen: Option<String>,
}

impl GameData {
    pub fn root_fen(&self) -> String {
        self.initial_fen
            .clone()
            .unwrap_or_else(|| STARTING_FEN.to_string())
    }
}
