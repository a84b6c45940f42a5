//! SAN movetext replay with a lightweight regex-based parser.
//!
//! Puzzle APIs often describe the puzzle position as the game that led to it.
//! Replaying that movetext from the standard start yields the FEN the puzzle
//! begins from.

use std::sync::LazyLock;

use regex::Regex;
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{Chess, EnPassantMode, Position};

use crate::error::OracleError;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^}]*\}").unwrap());
static VARIATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static MOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O|O-O").unwrap()
});

/// Extract SAN moves from movetext (after removing headers, comments, variations).
pub fn extract_san_moves(movetext: &str) -> Vec<String> {
    let no_headers = HEADER_RE.replace_all(movetext, "");
    let no_comments = COMMENT_RE.replace_all(&no_headers, "");
    let no_variations = VARIATION_RE.replace_all(&no_comments, "");

    MOVE_RE
        .find_iter(&no_variations)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Replay movetext from the standard starting position and return the final FEN.
pub fn replay_movetext(movetext: &str) -> Result<String, OracleError> {
    let mut pos = Chess::default();

    for (ply, move_san) in extract_san_moves(movetext).iter().enumerate() {
        let san: San = move_san
            .parse()
            .map_err(|_| OracleError::InvalidNotation(move_san.clone()))?;
        let mv = san
            .to_move(&pos)
            .map_err(|_| OracleError::IllegalMove(format!("{move_san} at ply {}", ply + 1)))?;
        pos.play_unchecked(mv);
    }

    Ok(Fen::from_position(&pos, EnPassantMode::Legal).to_string())
}
