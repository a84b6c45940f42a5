pub mod clients;
pub mod config;
pub mod error;
pub mod routes;
pub mod sessions;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::clients::GateSource;
use crate::config::Config;
use crate::sessions::SessionStore;

/// Build the HTTP router with its shared state.
pub fn app(config: Config, source: GateSource, store: SessionStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(routes::health::health_check))
        // Puzzle gate
        .route("/api/gate/sessions", post(routes::gate::create_session))
        .route("/api/gate/sessions/{id}", get(routes::gate::get_session))
        .route("/api/gate/sessions/{id}/moves", post(routes::gate::play_move))
        .route("/api/gate/sessions/{id}/reply", post(routes::gate::play_reply))
        .route("/api/gate/sessions/{id}/retry", post(routes::gate::retry))
        .route("/api/gate/sessions/{id}/reset", post(routes::gate::reset))
        .route("/api/gate/sessions/{id}/skip", post(routes::gate::skip))
        // Shared state
        .layer(Extension(store))
        .layer(Extension(Arc::new(source)))
        .layer(Extension(config))
        .layer(cors)
}
