use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use parley_core::{Error, SessionSummary};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

const DEFAULT_SESSION_ID: &str = "default";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ClearRequest {
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error wrapper mapping the core taxonomy onto HTTP statuses:
/// 400 for validation, 500 for configuration/provider/session errors.
///
/// Error detail is surfaced verbatim (demo posture; a production
/// deployment would redact before responding).
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Request rejected: {}", self.0);
        }
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let session_id = payload
        .session_id
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    let response = state.manager.send(&session_id, &payload.message).await?;

    Ok(Json(ChatResponse {
        response,
        session_id,
    }))
}

pub async fn clear_handler(
    State(state): State<AppState>,
    Json(payload): Json<ClearRequest>,
) -> Json<ClearResponse> {
    let session_id = payload
        .session_id
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    state.manager.clear(&session_id).await;

    Json(ClearResponse { success: true })
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn sessions_handler(State(state): State<AppState>) -> Json<Vec<SessionSummary>> {
    Json(state.manager.sessions().await)
}
