//! HTTP request handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::sse::sse_stream;
use super::types::{AnswerRequest, ErrorResponse, ProfileRequest, QueuedResponse};
use super::AppState;
use crate::runtime::GameSnapshot;
use crate::state_machine::{CompanyProfile, Event};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Snapshot of the running game
        .route("/api/game", get(get_game))
        // Player actions
        .route("/api/game/profile", post(submit_profile))
        .route("/api/game/answer", post(submit_answer))
        .route("/api/game/restart", post(restart_game))
        // Live updates
        .route("/api/game/stream", get(stream_game))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

async fn get_game(State(state): State<AppState>) -> Json<GameSnapshot> {
    Json(state.game.snapshot())
}

async fn submit_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    if req.name.trim().is_empty() || req.industry.trim().is_empty() || req.mission.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "name, industry and mission are all required".to_string(),
        ));
    }

    let profile = CompanyProfile {
        name: req.name,
        industry: req.industry,
        mission: req.mission,
    };
    state
        .game
        .send_event(Event::ProfileSubmitted { profile })
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(QueuedResponse { queued: true }))
}

async fn submit_answer(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::BadRequest("an answer cannot be empty".to_string()));
    }

    state
        .game
        .send_event(Event::AnswerSubmitted { text: req.text })
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(QueuedResponse { queued: true }))
}

async fn restart_game(
    State(state): State<AppState>,
) -> Result<Json<QueuedResponse>, AppError> {
    state
        .game
        .send_event(Event::RestartRequested)
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(QueuedResponse { queued: true }))
}

async fn stream_game(State(state): State<AppState>) -> impl IntoResponse {
    sse_stream(state.game.snapshot(), state.game.subscribe())
}

async fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
