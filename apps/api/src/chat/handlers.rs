use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::LoadedResume;
use crate::models::chat::ChatTurn;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: Uuid,
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub turns: usize,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub turns: Vec<ChatTurn>,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub session_id: Uuid,
    pub summary: String,
}

/// POST /api/v1/chat
/// Answers one question against the session's resume and appends both
/// turns to the transcript. The user turn is recorded before the answer
/// is attempted, so a failed remote call still leaves the question in
/// the history.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    // Take a handle on the resume and release the lock before the
    // (possibly remote) answer computation.
    let resume: Arc<LoadedResume> = {
        let mut sessions = state.sessions.write().await;
        let session = sessions
            .get_mut(&req.session_id)
            .ok_or_else(|| session_not_found(req.session_id))?;
        session.history.push(ChatTurn::user(message));
        Arc::clone(&session.resume)
    };

    let answer = state
        .responder
        .answer(&resume, message)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    let turns = {
        let mut sessions = state.sessions.write().await;
        let session = sessions
            .get_mut(&req.session_id)
            .ok_or_else(|| session_not_found(req.session_id))?;
        session.history.push(ChatTurn::assistant(answer.clone()));
        session.history.len()
    };

    debug!(session_id = %req.session_id, turns, "chat turn answered");
    Ok(Json(ChatResponse { answer, turns }))
}

/// GET /api/v1/chat/:session_id/history
pub async fn handle_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, AppError> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(HistoryResponse {
        session_id,
        turns: session.history.clone(),
    }))
}

/// GET /api/v1/resume/:session_id/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SummaryResponse>, AppError> {
    let resume = {
        let sessions = state.sessions.read().await;
        let session = sessions
            .get(&session_id)
            .ok_or_else(|| session_not_found(session_id))?;
        Arc::clone(&session.resume)
    };

    let summary = state
        .responder
        .summarize(&resume)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    Ok(Json(SummaryResponse { session_id, summary }))
}

fn session_not_found(session_id: Uuid) -> AppError {
    AppError::NotFound(format!("session {session_id} not found"))
}
