//! Rules oracle: legality, position transitions and terminal status.
//!
//! The oracle never stores a board. Callers own their positions and pass
//! them in, so any number of puzzle sessions can share one oracle.

use serde::{Deserialize, Serialize};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Position, Rank, Role};

use crate::error::OracleError;
use crate::notation::{self, MoveRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardStatus {
    pub turn: Side,
    pub in_check: bool,
    pub in_checkmate: bool,
    pub in_stalemate: bool,
    pub in_draw: bool,
}

/// Result of a legal move: the new position and the move's canonical notation.
#[derive(Debug, Clone)]
pub struct AppliedMove<P> {
    pub position: P,
    pub notation: String,
}

pub trait RulesOracle {
    type Position: Clone;

    /// Load a position from FEN.
    fn load(&self, fen: &str) -> Result<Self::Position, OracleError>;

    /// Check legality and produce the resulting position.
    fn apply_move(
        &self,
        position: &Self::Position,
        request: MoveRequest,
    ) -> Result<AppliedMove<Self::Position>, OracleError>;

    fn apply_notation(
        &self,
        position: &Self::Position,
        notation: &str,
    ) -> Result<AppliedMove<Self::Position>, OracleError> {
        let request = MoveRequest::from_uci(notation)?;
        self.apply_move(position, request)
    }

    fn status(&self, position: &Self::Position) -> BoardStatus;

    fn fen(&self, position: &Self::Position) -> String;
}

/// Standard chess rules backed by shakmaty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShakmatyOracle;

impl ShakmatyOracle {
    /// A pawn reaching the last rank without a chosen piece becomes a queen.
    fn with_default_promotion(position: &Chess, request: MoveRequest) -> MoveRequest {
        if request.promotion.is_some() {
            return request;
        }
        let is_pawn = position
            .board()
            .piece_at(request.from)
            .is_some_and(|p| p.role == Role::Pawn);
        let last_rank = matches!(request.to.rank(), Rank::First | Rank::Eighth);
        if is_pawn && last_rank {
            MoveRequest { promotion: Some(Role::Queen), ..request }
        } else {
            request
        }
    }
}

impl RulesOracle for ShakmatyOracle {
    type Position = Chess;

    fn load(&self, fen: &str) -> Result<Chess, OracleError> {
        let parsed: Fen = fen
            .trim()
            .parse()
            .map_err(|e| OracleError::InvalidPosition(format!("{fen}: {e}")))?;
        parsed
            .into_position::<Chess>(CastlingMode::Standard)
            .map_err(|e| OracleError::InvalidPosition(format!("{fen}: {e}")))
    }

    fn apply_move(
        &self,
        position: &Chess,
        request: MoveRequest,
    ) -> Result<AppliedMove<Chess>, OracleError> {
        let request = Self::with_default_promotion(position, request);
        let mv = request
            .to_uci_move()
            .to_move(position)
            .map_err(|_| OracleError::IllegalMove(request.to_string()))?;

        let notation = notation::canonical(&mv);
        let mut next = position.clone();
        next.play_unchecked(mv);

        Ok(AppliedMove { position: next, notation })
    }

    fn status(&self, position: &Chess) -> BoardStatus {
        let in_stalemate = position.is_stalemate();
        BoardStatus {
            turn: position.turn().into(),
            in_check: position.is_check(),
            in_checkmate: position.is_checkmate(),
            in_stalemate,
            in_draw: in_stalemate || position.is_insufficient_material(),
        }
    }

    fn fen(&self, position: &Chess) -> String {
        Fen::from_position(position, EnPassantMode::Legal).to_string()
    }
}
