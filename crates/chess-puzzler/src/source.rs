//! Puzzle source capability.

use std::future::Future;

use thiserror::Error;

use crate::puzzle::PuzzleDefinition;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleRequest {
    /// The source's puzzle of the day.
    Daily,
    /// Any puzzle the source picks.
    Next,
    ById(String),
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Puzzle not found: {0}")]
    NotFound(String),

    #[error("Puzzle request failed: {0}")]
    Request(String),

    #[error("Malformed puzzle data: {0}")]
    Malformed(String),
}

/// Anything that can hand out puzzle definitions.
///
/// A fetch is a single best-effort request; retrying is the caller's call.
pub trait PuzzleSource: Send + Sync {
    fn fetch_puzzle(
        &self,
        request: &PuzzleRequest,
    ) -> impl Future<Output = Result<PuzzleDefinition, SourceError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Puzzle, SolutionConvention};
    use chess_core::ShakmatyOracle;

    struct FixedSource(PuzzleDefinition);

    impl PuzzleSource for FixedSource {
        async fn fetch_puzzle(
            &self,
            request: &PuzzleRequest,
        ) -> Result<PuzzleDefinition, SourceError> {
            match request {
                PuzzleRequest::ById(id) if *id != self.0.id => Err(SourceError::NotFound(id.clone())),
                _ => Ok(self.0.clone()),
            }
        }
    }

    fn fixed() -> FixedSource {
        FixedSource(PuzzleDefinition {
            id: "abc".to_string(),
            starting_position: "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1".to_string(),
            moves: vec!["a1a8".to_string()],
            rating: Some(900),
            themes: vec!["backRankMate".to_string()],
            convention: SolutionConvention::SolverFirst,
        })
    }

    #[tokio::test]
    async fn test_fetch_and_ingest() {
        let source = fixed();
        let def = source.fetch_puzzle(&PuzzleRequest::Daily).await.unwrap();
        let puzzle = Puzzle::ingest(def, &ShakmatyOracle).unwrap();
        assert_eq!(puzzle.id, "abc");
        assert_eq!(puzzle.solution.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let source = fixed();
        let err = source
            .fetch_puzzle(&PuzzleRequest::ById("zzz".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }
}
