//! Canonical move notation.
//!
//! Puzzle solutions and oracle results are compared as plain strings, so every
//! move crossing the tracker boundary goes through UCI as produced here:
//! source square, destination square, optional lowercase promotion letter.
//! Castling is written as the king moving two squares (`e1g1`).

use std::fmt;

use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Move, Role, Square};

use crate::error::OracleError;

/// A move as proposed by a player, before the oracle has checked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square, promotion: Option<Role>) -> Self {
        Self { from, to, promotion }
    }

    /// Build a request from UI-style inputs: `"e7"`, `"e8"`, `Some("q")`.
    pub fn parse(from: &str, to: &str, promotion: Option<&str>) -> Result<Self, OracleError> {
        let from_sq = parse_square(from)?;
        let to_sq = parse_square(to)?;
        let promotion = match promotion.map(str::trim).filter(|p| !p.is_empty()) {
            Some(p) => Some(parse_promotion(p)?),
            None => None,
        };
        Ok(Self::new(from_sq, to_sq, promotion))
    }

    /// Parse canonical notation (`e2e4`, `a7a8q`).
    pub fn from_uci(uci: &str) -> Result<Self, OracleError> {
        let uci = uci.trim();
        if !uci.is_ascii() || !(4..=5).contains(&uci.len()) {
            return Err(OracleError::InvalidNotation(uci.to_string()));
        }
        let promotion = if uci.len() == 5 { Some(&uci[4..5]) } else { None };
        Self::parse(&uci[0..2], &uci[2..4], promotion)
            .map_err(|_| OracleError::InvalidNotation(uci.to_string()))
    }

    pub fn to_uci_move(self) -> UciMove {
        UciMove::Normal {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

/// Canonical notation for a legal move.
pub fn canonical(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}

fn parse_square(s: &str) -> Result<Square, OracleError> {
    s.trim()
        .to_ascii_lowercase()
        .parse::<Square>()
        .map_err(|_| OracleError::InvalidNotation(format!("bad square '{s}'")))
}

fn parse_promotion(s: &str) -> Result<Role, OracleError> {
    let mut chars = s.chars();
    let role = match (chars.next(), chars.next()) {
        (Some(c), None) => Role::from_char(c.to_ascii_lowercase()),
        _ => None,
    };
    match role {
        Some(r @ (Role::Queen | Role::Rook | Role::Bishop | Role::Knight)) => Ok(r),
        _ => Err(OracleError::InvalidNotation(format!("bad promotion '{s}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ui_inputs() {
        let req = MoveRequest::parse("E7", "e8", Some("Q")).unwrap();
        assert_eq!(req.from, Square::E7);
        assert_eq!(req.to, Square::E8);
        assert_eq!(req.promotion, Some(Role::Queen));
        assert_eq!(req.to_string(), "e7e8q");
    }

    #[test]
    fn test_empty_promotion_is_none() {
        let req = MoveRequest::parse("e2", "e4", Some("")).unwrap();
        assert_eq!(req.promotion, None);
        assert_eq!(req.to_string(), "e2e4");
    }

    #[test]
    fn test_from_uci() {
        assert_eq!(MoveRequest::from_uci("c8c1").unwrap().to_string(), "c8c1");
        assert_eq!(MoveRequest::from_uci("b2b1n").unwrap().promotion, Some(Role::Knight));
    }

    #[test]
    fn test_rejects_bad_notation() {
        assert!(MoveRequest::from_uci("e2").is_err());
        assert!(MoveRequest::from_uci("e2e9").is_err());
        assert!(MoveRequest::from_uci("e7e8k").is_err());
        assert!(MoveRequest::from_uci("e2e4e5").is_err());
        assert!(MoveRequest::parse("z1", "e4", None).is_err());
    }
}
