/// Puzzle data model and ingestion

pub mod ingest;

use chess_core::Side;
use serde::{Deserialize, Serialize};

/// Which side plays `moves[0]` in a raw puzzle line.
///
/// Sources disagree on this, so every source states it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionConvention {
    /// `moves[0]` is the solver's first move (Lichess puzzle API).
    SolverFirst,
    /// `moves[0]` is the opponent's setup move, played before the solver
    /// gets the board (Lichess puzzle CSV database).
    OpponentFirst,
}

/// A puzzle as delivered by a puzzle source, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    pub id: String,
    /// FEN of the position `moves` starts from.
    pub starting_position: String,
    /// UCI moves.
    pub moves: Vec<String>,
    pub rating: Option<u32>,
    pub themes: Vec<String>,
    pub convention: SolutionConvention,
}

/// A validated puzzle.
///
/// `solution[0]` is always the solver's move; even indices are the solver's,
/// odd indices the scripted opponent replies. Every entry is canonical UCI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Puzzle {
    pub id: String,
    pub starting_position: String,
    pub solution: Vec<String>,
    pub solver_side: Side,
    pub rating: Option<u32>,
    pub themes: Vec<String>,
}

impl Puzzle {
    /// Solver's moves (even indices: 0, 2, 4, ...)
    pub fn solver_moves(&self) -> impl Iterator<Item = &str> {
        self.solution.iter().step_by(2).map(String::as_str)
    }

    /// Opponent's replies (odd indices: 1, 3, 5, ...)
    pub fn opponent_moves(&self) -> impl Iterator<Item = &str> {
        self.solution.iter().skip(1).step_by(2).map(String::as_str)
    }
}
