#![allow(dead_code)]

use chess_puzzler::chess_core::Side;
use chess_puzzler::{Puzzle, PuzzleDefinition, SolutionConvention, SolverSession};

/// Black to move: Rxc1+ Qxc1 Qe3.
pub const BACK_RANK_FEN: &str = "2r3k1/5ppp/8/8/8/q7/3Q1PPP/2R3K1 b - - 0 1";

/// Lichess database rows (the first move is the opponent's setup move).
pub const PUZZLE_CSV: &str = "\
PuzzleId,FEN,Moves,Rating,RatingDeviation,Popularity,NbPlays,Themes,GameUrl,OpeningTags
bk001,r5k1/5ppp/8/8/8/8/5PPP/6K1 w - - 0 1,g1h1 a8a1,799,80,90,1200,backRankMate mate mateIn1 oneMove,https://lichess.org/x,
sc002,r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR b KQkq - 3 3,d7d6 f3f7,650,75,95,5000,mate mateIn1 opening,https://lichess.org/y,
";

pub fn moves(line: &[&str]) -> Vec<String> {
    line.iter().map(|m| m.to_string()).collect()
}

pub fn session(line: &[&str]) -> SolverSession {
    SolverSession::new(moves(line)).expect("non-empty solution")
}

pub fn back_rank_puzzle() -> Puzzle {
    Puzzle {
        id: "backrank".to_string(),
        starting_position: BACK_RANK_FEN.to_string(),
        solution: moves(&["c8c1", "d2c1", "a3e3"]),
        solver_side: Side::Black,
        rating: Some(1400),
        themes: vec!["backRank".to_string()],
    }
}

pub fn definition(fen: &str, line: &[&str], convention: SolutionConvention) -> PuzzleDefinition {
    PuzzleDefinition {
        id: "fixture".to_string(),
        starting_position: fen.to_string(),
        moves: moves(line),
        rating: None,
        themes: vec![],
        convention,
    }
}
