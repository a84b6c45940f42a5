use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chess_puzzler::chess_core::OracleError;
use chess_puzzler::{PuzzleError, SourceError};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl From<PuzzleError> for AppError {
    fn from(e: PuzzleError) -> Self {
        match e {
            PuzzleError::PuzzleAlreadyResolved
            | PuzzleError::NoReplyPending
            | PuzzleError::AwaitingOpponentReply => AppError::Conflict(e.to_string()),
            PuzzleError::MalformedPuzzle(_) => AppError::BadGateway(e.to_string()),
            PuzzleError::Oracle(inner) => inner.into(),
        }
    }
}

impl From<OracleError> for AppError {
    fn from(e: OracleError) -> Self {
        match e {
            OracleError::IllegalMove(_) | OracleError::InvalidNotation(_) => {
                AppError::BadRequest(e.to_string())
            }
            OracleError::InvalidPosition(_) | OracleError::NothingToUndo => {
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::NotFound(_) => AppError::NotFound(e.to_string()),
            SourceError::Request(_) | SourceError::Malformed(_) => {
                AppError::BadGateway(e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::BadGateway(msg) => {
                tracing::warn!("Puzzle source error: {msg}");
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Anyhow(e) => {
                tracing::error!("Unexpected error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(json!({ "detail": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(e: AppError) -> StatusCode {
        e.into_response().status()
    }

    #[test]
    fn test_tracker_errors_are_conflicts() {
        assert_eq!(status_of(PuzzleError::PuzzleAlreadyResolved.into()), StatusCode::CONFLICT);
        assert_eq!(status_of(PuzzleError::NoReplyPending.into()), StatusCode::CONFLICT);
        assert_eq!(status_of(PuzzleError::AwaitingOpponentReply.into()), StatusCode::CONFLICT);
    }

    #[test]
    fn test_illegal_move_is_bad_request() {
        let e = PuzzleError::Oracle(OracleError::IllegalMove("e2e5".to_string()));
        assert_eq!(status_of(e.into()), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_source_errors() {
        assert_eq!(
            status_of(SourceError::NotFound("x".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(SourceError::Request("timeout".to_string()).into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(PuzzleError::MalformedPuzzle("empty".to_string()).into()),
            StatusCode::BAD_GATEWAY
        );
    }
}
