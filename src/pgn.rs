//! PGN text for the study-creation form.

use chrono::Local;

use crate::game::{GameData, MoveRecord};

/// Renders the mainline as tagged PGN movetext.
pub fn export(data: &GameData, mainline: &[MoveRecord]) -> String {
    let mut pgn = String::new();

    pgn.push_str("[Event \"Analysis board\"]\n");
    pgn.push_str("[Site \"Local\"]\n");
    pgn.push_str(&format!("[Date \"{}\"]\n", Local::now().format("%Y.%m.%d")));
    pgn.push_str(&format!("[Variant \"{}\"]\n", data.variant.key()));
    if let Some(fen) = &data.initial_fen {
        pgn.push_str("[SetUp \"1\"]\n");
        pgn.push_str(&format!("[FEN \"{}\"]\n", fen));
    }
    pgn.push_str("[Result \"*\"]\n");
    pgn.push('\n');

    for (i, record) in mainline.iter().enumerate() {
        if i % 2 == 0 {
            pgn.push_str(&format!("{}. ", i / 2 + 1));
        }
        pgn.push_str(&record.san);
        pgn.push(' ');
    }
    pgn.push('*');
    pgn.push('\n');

    pgn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{mainline_from_sans, Source, VariantKey};

    fn game(initial_fen: Option<String>) -> GameData {
        GameData {
            id: "abcd1234".to_string(),
            source: Source::Lobby,
            variant: VariantKey::Standard,
            imported_by: None,
            move_centis: Vec::new(),
            analysis: None,
            user_analysis: true,
            initial_fen,
        }
    }

    #[test]
    fn numbers_move_pairs() {
        let mainline = mainline_from_sans(None, &["e4", "e5", "Nf3"]).unwrap();
        let pgn = export(&game(None), &mainline);
        assert!(pgn.contains("1. e4 e5 2. Nf3 *"));
        assert!(pgn.contains("[Variant \"standard\"]"));
        assert!(!pgn.contains("[SetUp"));
    }

    #[test]
    fn custom_positions_carry_a_fen_tag() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
        let pgn = export(&game(Some(fen.to_string())), &[]);
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains(fen));
        assert!(pgn.ends_with("*\n"));
    }
}
