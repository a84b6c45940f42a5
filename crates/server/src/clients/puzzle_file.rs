//! Local puzzle source reading the Lichess puzzle database CSV.
//!
//! Columns: `PuzzleId,FEN,Moves,Rating,RatingDeviation,Popularity,NbPlays,Themes,GameUrl,OpeningTags`.
//! `Moves` starts with the opponent's move that sets up the puzzle.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use chess_puzzler::{PuzzleDefinition, PuzzleRequest, PuzzleSource, SolutionConvention, SourceError};
use chrono::{Datelike, Utc};

pub struct PuzzleFile {
    puzzles: Vec<PuzzleDefinition>,
    next: AtomicUsize,
}

impl PuzzleFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SourceError::Request(format!("{}: {e}", path.display())))?;
        let file = Self::parse(&text)?;
        tracing::info!("Loaded {} puzzles from {}", file.len(), path.display());
        Ok(file)
    }

    pub fn parse(text: &str) -> Result<Self, SourceError> {
        let mut puzzles = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("PuzzleId,") {
                continue;
            }
            puzzles.push(parse_line(line).map_err(|e| {
                SourceError::Malformed(format!("line {}: {e}", line_no + 1))
            })?);
        }

        if puzzles.is_empty() {
            return Err(SourceError::Malformed("puzzle file has no puzzles".to_string()));
        }

        Ok(Self {
            puzzles,
            next: AtomicUsize::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    fn pick(&self, request: &PuzzleRequest) -> Result<&PuzzleDefinition, SourceError> {
        match request {
            PuzzleRequest::ById(id) => self
                .puzzles
                .iter()
                .find(|p| p.id == *id)
                .ok_or_else(|| SourceError::NotFound(id.clone())),
            PuzzleRequest::Daily => {
                let day = Utc::now().date_naive().num_days_from_ce().unsigned_abs() as usize;
                Ok(&self.puzzles[day % self.puzzles.len()])
            }
            PuzzleRequest::Next => {
                let i = self.next.fetch_add(1, Ordering::Relaxed);
                Ok(&self.puzzles[i % self.puzzles.len()])
            }
        }
    }
}

impl PuzzleSource for PuzzleFile {
    async fn fetch_puzzle(&self, request: &PuzzleRequest) -> Result<PuzzleDefinition, SourceError> {
        self.pick(request).cloned()
    }
}

fn parse_line(line: &str) -> Result<PuzzleDefinition, String> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 3 {
        return Err(format!("expected at least 3 columns, got {}", fields.len()));
    }

    let id = fields[0].trim();
    if id.is_empty() {
        return Err("empty PuzzleId".to_string());
    }

    let split_words = |s: Option<&&str>| -> Vec<String> {
        s.map(|s| s.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    };

    Ok(PuzzleDefinition {
        id: id.to_string(),
        starting_position: fields[1].trim().to_string(),
        moves: split_words(fields.get(2)),
        rating: fields.get(3).and_then(|r| r.trim().parse().ok()),
        themes: split_words(fields.get(7)),
        convention: SolutionConvention::OpponentFirst,
    })
}
