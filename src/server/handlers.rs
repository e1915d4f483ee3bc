use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};
use serde::Serialize;

use super::{AppState, format::format_news};
use crate::app::collector::{CollectorState, RefreshStats};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub state: CollectorState,
    pub stats: RefreshStats,
}

/// GET /news - the most recent stories as plain text, rendered from the
/// snapshot current at request time
pub async fn news(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format_news(&state.recent_news()),
    )
}

/// GET /health - refresh loop state and counters
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        state: state.collector.state().await,
        stats: state.collector.stats().await,
    })
}
