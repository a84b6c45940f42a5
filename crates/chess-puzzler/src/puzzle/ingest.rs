use chess_core::RulesOracle;

use crate::error::PuzzleError;
use crate::puzzle::{Puzzle, PuzzleDefinition, SolutionConvention};

impl Puzzle {
    /// Validate a raw definition and normalize it so that `solution[0]` is
    /// the solver's move.
    ///
    /// The whole line is replayed through the oracle; a puzzle whose line is
    /// not legal from its own starting position is rejected here rather than
    /// halfway through a solve.
    pub fn ingest<O: RulesOracle>(
        definition: PuzzleDefinition,
        oracle: &O,
    ) -> Result<Puzzle, PuzzleError> {
        let PuzzleDefinition {
            id,
            starting_position,
            moves,
            rating,
            themes,
            convention,
        } = definition;

        let malformed = |detail: String| PuzzleError::MalformedPuzzle(format!("{id}: {detail}"));

        if moves.is_empty() {
            return Err(malformed("solution sequence is empty".to_string()));
        }

        let mut position = oracle
            .load(&starting_position)
            .map_err(|e| malformed(e.to_string()))?;

        let mut moves = moves.into_iter();
        if convention == SolutionConvention::OpponentFirst {
            // Presence checked above.
            if let Some(setup) = moves.next() {
                position = oracle
                    .apply_notation(&position, &setup)
                    .map_err(|e| malformed(format!("setup move: {e}")))?
                    .position;
            }
        }

        let start = position.clone();
        let mut solution = Vec::new();
        for (ply, mv) in moves.enumerate() {
            let applied = oracle
                .apply_notation(&position, &mv)
                .map_err(|e| malformed(format!("ply {ply}: {e}")))?;
            solution.push(applied.notation);
            position = applied.position;
        }

        if solution.is_empty() {
            return Err(malformed("no solver move after the setup move".to_string()));
        }

        Ok(Puzzle {
            id,
            starting_position: oracle.fen(&start),
            solution,
            solver_side: oracle.status(&start).turn,
            rating,
            themes,
        })
    }
}
