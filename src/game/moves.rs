use serde::{Deserialize, Serialize};
use shakmaty::{
    fen::Fen, san::San, uci::UciMove, CastlingMode, Chess, EnPassantMode, Position,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid move: {0}")]
    InvalidMove(String),
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),
}

/// One mainline move together with the position it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub san: String,
    pub uci: String,
    pub resulting_fen: String,
}

/// Builds a mainline from SAN moves, validating each against the position it
/// is played from.
pub fn mainline_from_sans(
    initial_fen: Option<&str>,
    sans: &[&str],
) -> Result<Vec<MoveRecord>, GameError> {
    let mut position: Chess = match initial_fen {
        Some(fen) => {
            let fen: Fen = fen
                .parse()
                .map_err(|e| GameError::InvalidFen(format!("{:?}", e)))?;
            fen.into_position(CastlingMode::Standard)
                .map_err(|e| GameError::InvalidFen(format!("{:?}", e)))?
        }
        None => Chess::default(),
    };

    let mut mainline = Vec::with_capacity(sans.len());
    for san_str in sans {
        let san: San = san_str
            .parse()
            .map_err(|_| GameError::InvalidMove(san_str.to_string()))?;
        let m = san
            .to_move(&position)
            .map_err(|_| GameError::InvalidMove(san_str.to_string()))?;

        let uci = UciMove::from_move(m.clone(), CastlingMode::Standard);
        position = position
            .play(m)
            .map_err(|e| GameError::InvalidMove(format!("{:?}", e)))?;

        mainline.push(MoveRecord {
            san: san_str.to_string(),
            uci: uci.to_string(),
            resulting_fen: Fen::from_position(&position, EnPassantMode::Legal).to_string(),
        });
    }
    Ok(mainline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_mainline_from_sans() {
        let mainline = mainline_from_sans(None, &["e4", "e5", "Nf3"]).unwrap();
        assert_eq!(mainline.len(), 3);
        assert_eq!(mainline[0].san, "e4");
        assert_eq!(mainline[0].uci, "e2e4");
        assert!(mainline[2].resulting_fen.contains(" b "));
    }

    #[test]
    fn rejects_illegal_moves() {
        assert!(mainline_from_sans(None, &["e5"]).is_err());
        assert!(mainline_from_sans(None, &["e4", "Ke7"]).is_err());
    }

    #[test]
    fn starts_from_a_custom_position() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
        let mainline = mainline_from_sans(Some(fen), &["e5"]).unwrap();
        assert_eq!(mainline[0].san, "e5");
    }

    #[test]
    fn rejects_garbage_fen() {
        assert!(mainline_from_sans(Some("not a fen"), &[]).is_err());
    }
}
