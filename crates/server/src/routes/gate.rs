use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use chess_puzzler::chess_core::{BoardStatus, MoveRequest, ShakmatyOracle, Side};
use chess_puzzler::{Outcome, PlayResult, Progress, Puzzle, PuzzleAttempt, PuzzleRequest, PuzzleSource};
use serde::{Deserialize, Serialize};

use crate::clients::GateSource;
use crate::config::Config;
use crate::error::AppError;
use crate::sessions::{GateSession, SessionStore};

#[derive(Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub puzzle_id: String,
    pub rating: Option<u32>,
    pub themes: Vec<String>,
    pub solver_side: Side,
    pub fen: String,
    pub status: BoardStatus,
    pub outcome: Outcome,
    pub progress: Progress,
    /// Scripted reply waiting to be played, if any.
    pub pending_reply: Option<String>,
    pub skipped: bool,
    pub unlocked: bool,
    pub reply_delay_ms: u64,
    pub revert_delay_ms: u64,
}

fn view(id: &str, session: &GateSession, config: &Config) -> SessionView {
    let attempt = &session.attempt;
    SessionView {
        session_id: id.to_string(),
        puzzle_id: session.puzzle.id.clone(),
        rating: session.puzzle.rating,
        themes: session.puzzle.themes.clone(),
        solver_side: session.puzzle.solver_side,
        fen: attempt.fen(),
        status: attempt.status(),
        outcome: attempt.outcome(),
        progress: attempt.progress(),
        pending_reply: attempt.session().next_opponent_reply().map(str::to_string),
        skipped: session.skipped,
        unlocked: session.unlocked(),
        reply_delay_ms: config.reply_delay_ms,
        revert_delay_ms: config.revert_delay_ms,
    }
}

#[derive(Deserialize)]
pub struct CreateSessionQuery {
    pub puzzle_id: Option<String>,
    #[serde(default)]
    pub daily: bool,
}

impl CreateSessionQuery {
    fn request(&self) -> PuzzleRequest {
        match (&self.puzzle_id, self.daily) {
            (Some(id), _) if !id.trim().is_empty() => PuzzleRequest::ById(id.trim().to_string()),
            (_, true) => PuzzleRequest::Daily,
            _ => PuzzleRequest::Next,
        }
    }
}

/// POST /api/gate/sessions?puzzle_id=K69di
/// Fetch a puzzle and open a gate session for it.
pub async fn create_session(
    Extension(store): Extension<SessionStore>,
    Extension(source): Extension<Arc<GateSource>>,
    Extension(config): Extension<Config>,
    Query(q): Query<CreateSessionQuery>,
) -> Result<Json<SessionView>, AppError> {
    let pruned = store.prune(config.session_ttl)?;
    if pruned > 0 {
        tracing::info!("Pruned {} idle gate sessions", pruned);
    }

    let definition = source.fetch_puzzle(&q.request()).await?;
    let puzzle = Puzzle::ingest(definition, &ShakmatyOracle)?;
    let attempt = PuzzleAttempt::new(ShakmatyOracle, &puzzle)?;

    let session = GateSession::new(puzzle, attempt);
    let id = store.insert(session)?;
    tracing::info!(session = %id, "Opened gate session");

    store.with_session(&id, |s| Ok(Json(view(&id, s, &config))))
}

/// GET /api/gate/sessions/{id}
pub async fn get_session(
    Extension(store): Extension<SessionStore>,
    Extension(config): Extension<Config>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    store.with_session(&id, |s| Ok(Json(view(&id, s, &config))))
}

#[derive(Deserialize)]
pub struct MoveBody {
    pub from: String,
    pub to: String,
    pub promotion: Option<String>,
}

#[derive(Serialize)]
pub struct MoveResponse {
    pub result: PlayResult,
    pub session: SessionView,
}

/// POST /api/gate/sessions/{id}/moves
/// Play a solver move. A wrong move stays on the board until /retry.
pub async fn play_move(
    Extension(store): Extension<SessionStore>,
    Extension(config): Extension<Config>,
    Path(id): Path<String>,
    Json(body): Json<MoveBody>,
) -> Result<Json<MoveResponse>, AppError> {
    let request = MoveRequest::parse(&body.from, &body.to, body.promotion.as_deref())?;

    store.with_session(&id, |s| {
        let result = s.attempt.play(request)?;
        tracing::debug!(session = %id, played = %result.played, outcome = ?result.outcome, "Gate move");
        if s.unlocked() {
            tracing::info!(session = %id, puzzle = %s.puzzle.id, "Gate puzzle solved");
        }
        Ok(Json(MoveResponse {
            result,
            session: view(&id, s, &config),
        }))
    })
}

#[derive(Serialize)]
pub struct ReplyResponse {
    pub played: String,
    pub session: SessionView,
}

/// POST /api/gate/sessions/{id}/reply
/// Play the scripted opponent reply.
pub async fn play_reply(
    Extension(store): Extension<SessionStore>,
    Extension(config): Extension<Config>,
    Path(id): Path<String>,
) -> Result<Json<ReplyResponse>, AppError> {
    store.with_session(&id, |s| {
        let played = s.attempt.play_opponent_reply()?;
        if s.unlocked() {
            tracing::info!(session = %id, puzzle = %s.puzzle.id, "Gate puzzle solved");
        }
        Ok(Json(ReplyResponse {
            played,
            session: view(&id, s, &config),
        }))
    })
}

/// POST /api/gate/sessions/{id}/retry
pub async fn retry(
    Extension(store): Extension<SessionStore>,
    Extension(config): Extension<Config>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    store.with_session(&id, |s| {
        s.attempt.retry()?;
        Ok(Json(view(&id, s, &config)))
    })
}

/// POST /api/gate/sessions/{id}/reset
pub async fn reset(
    Extension(store): Extension<SessionStore>,
    Extension(config): Extension<Config>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    store.with_session(&id, |s| {
        s.attempt.reset();
        Ok(Json(view(&id, s, &config)))
    })
}

/// POST /api/gate/sessions/{id}/skip
/// Skip straight to the portfolio.
pub async fn skip(
    Extension(store): Extension<SessionStore>,
    Extension(config): Extension<Config>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    store.with_session(&id, |s| {
        s.skipped = true;
        tracing::info!(session = %id, "Gate skipped");
        Ok(Json(view(&id, s, &config)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(puzzle_id: Option<&str>, daily: bool) -> CreateSessionQuery {
        CreateSessionQuery {
            puzzle_id: puzzle_id.map(String::from),
            daily,
        }
    }

    #[test]
    fn test_request_selection() {
        assert_eq!(query(None, false).request(), PuzzleRequest::Next);
        assert_eq!(query(None, true).request(), PuzzleRequest::Daily);
        assert_eq!(
            query(Some(" K69di "), true).request(),
            PuzzleRequest::ById("K69di".to_string())
        );
        assert_eq!(query(Some(""), false).request(), PuzzleRequest::Next);
    }
}
