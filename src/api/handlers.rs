//! API request handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::chat::Turn;

use super::error::ApiResult;
use super::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Request to send a chat message.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message text.
    pub message: String,
}

/// Response carrying the generated reply.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Confirmation message response.
#[derive(Debug, Serialize)]
pub struct ConfirmationResponse {
    pub message: String,
}

/// One history entry as returned by the history endpoint.
#[derive(Debug, Serialize)]
pub struct HistoryTurn {
    pub role: String,
    pub message: String,
    pub timestamp: String,
}

impl From<Turn> for HistoryTurn {
    fn from(turn: Turn) -> Self {
        Self {
            role: turn.role,
            message: turn.message,
            timestamp: turn.timestamp,
        }
    }
}

/// Full history response.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryTurn>,
}

/// Send a chat message and return the generated reply.
///
/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let response = state.chat.send_message(&req.message).await?;
    Ok(Json(ChatResponse { response }))
}

/// Clear the conversation and start a new session.
///
/// POST /api/chat/new
pub async fn new_chat(State(state): State<AppState>) -> ApiResult<Json<ConfirmationResponse>> {
    state.chat.clear().await?;
    Ok(Json(ConfirmationResponse {
        message: "Chat history cleared, new session started.".to_string(),
    }))
}

/// Fetch the full conversation history in append order.
///
/// GET /api/history
pub async fn history(State(state): State<AppState>) -> ApiResult<Json<HistoryResponse>> {
    let turns = state.chat.history().await?;
    let history = turns.into_iter().map(HistoryTurn::from).collect();
    Ok(Json(HistoryResponse { history }))
}

/// Delete the conversation history.
///
/// POST /api/history/delete
///
/// Same effect as starting a new session; kept as a separate operation for
/// interface symmetry.
pub async fn delete_history(
    State(state): State<AppState>,
) -> ApiResult<Json<ConfirmationResponse>> {
    state.chat.clear().await?;
    Ok(Json(ConfirmationResponse {
        message: "Chat history deleted.".to_string(),
    }))
}
