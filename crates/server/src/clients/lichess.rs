use std::time::Duration;

use chess_puzzler::chess_core::pgn;
use chess_puzzler::{PuzzleDefinition, PuzzleRequest, PuzzleSource, SolutionConvention, SourceError};
use reqwest::Client;
use serde_json::Value;

pub struct LichessClient {
    client: Client,
    base_url: String,
}

impl LichessClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent("ChessGate/1.0")
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Request(format!("Client build error: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, request: &PuzzleRequest) -> String {
        match request {
            PuzzleRequest::Daily => format!("{}/api/puzzle/daily", self.base_url),
            PuzzleRequest::Next => format!("{}/api/puzzle/next", self.base_url),
            PuzzleRequest::ById(id) => format!("{}/api/puzzle/{}", self.base_url, id),
        }
    }
}

impl PuzzleSource for LichessClient {
    /// One request, no retries. A timeout or non-2xx status is reported as is.
    async fn fetch_puzzle(&self, request: &PuzzleRequest) -> Result<PuzzleDefinition, SourceError> {
        let url = self.url(request);
        tracing::debug!("Fetching puzzle from {url}");

        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Request(format!("Request error: {e}")))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            let what = match request {
                PuzzleRequest::ById(id) => id.clone(),
                other => format!("{other:?}"),
            };
            return Err(SourceError::NotFound(what));
        }

        if !resp.status().is_success() {
            return Err(SourceError::Request(format!("HTTP {}", resp.status())));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| SourceError::Malformed(format!("Body parse error: {e}")))?;

        parse_puzzle_response(&data)
    }
}

/// Turn a Lichess puzzle API response into a puzzle definition.
///
/// `game.pgn` is the game up to the puzzle position; `puzzle.solution`
/// starts with the solver's move.
pub fn parse_puzzle_response(data: &Value) -> Result<PuzzleDefinition, SourceError> {
    let puzzle = data
        .get("puzzle")
        .ok_or_else(|| SourceError::Malformed("missing 'puzzle'".to_string()))?;

    let id = puzzle
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| SourceError::Malformed("missing 'puzzle.id'".to_string()))?
        .to_string();

    let moves: Vec<String> = puzzle
        .get("solution")
        .and_then(|v| v.as_array())
        .ok_or_else(|| SourceError::Malformed(format!("{id}: missing 'puzzle.solution'")))?
        .iter()
        .filter_map(|v| v.as_str().map(String::from))
        .collect();

    let movetext = data
        .get("game")
        .and_then(|g| g.get("pgn"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| SourceError::Malformed(format!("{id}: missing 'game.pgn'")))?;

    let starting_position = pgn::replay_movetext(movetext)
        .map_err(|e| SourceError::Malformed(format!("{id}: {e}")))?;

    let rating = puzzle
        .get("rating")
        .and_then(|v| v.as_u64())
        .map(|r| r as u32);

    let themes = puzzle
        .get("themes")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    Ok(PuzzleDefinition {
        id,
        starting_position,
        moves,
        rating,
        themes,
        convention: SolutionConvention::SolverFirst,
    })
}
