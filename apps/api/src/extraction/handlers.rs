use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{load_resume, RawDocument};
use crate::models::resume::ResumeRecord;
use crate::state::{AppState, ChatSession};

#[derive(Serialize)]
pub struct ResumeSessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub record: ResumeRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_warning: Option<String>,
}

/// POST /api/v1/resume
/// Accepts a multipart PDF upload under the field name "file", ingests it
/// and opens a chat session. A resume whose text layer cannot be decoded
/// still gets a session; the response carries the warning.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeSessionResponse>, AppError> {
    let mut document: Option<RawDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        if field.name() == Some("file") {
            let source = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
            document = Some(RawDocument::from_upload(source, data.to_vec()));
        }
    }

    let document = document
        .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;
    if document.data.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    let (resume, warning) = load_resume(document);
    let session = ChatSession::new(resume, warning.map(|e| e.to_string()));
    let response = ResumeSessionResponse {
        session_id: session.id,
        created_at: session.created_at,
        record: session.resume.record.clone(),
        extraction_warning: session.extraction_warning.clone(),
    };

    // Decoded fine but matched nothing answerable, or did not decode at
    // all. Either way the session only has the canned fallback to offer.
    if session.resume.knowledge.is_empty() {
        warn!(session_id = %session.id, "no answerable fields were extracted");
    }

    info!(session_id = %session.id, "resume session created");
    state.sessions.write().await.insert(session.id, session);

    Ok(Json(response))
}

/// GET /api/v1/resume/:session_id
pub async fn handle_get_record(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ResumeSessionResponse>, AppError> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(ResumeSessionResponse {
        session_id,
        created_at: session.created_at,
        record: session.resume.record.clone(),
        extraction_warning: session.extraction_warning.clone(),
    }))
}

/// DELETE /api/v1/resume/:session_id
/// Drops the session, its resume and its transcript together.
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .write()
        .await
        .remove(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    info!(%session_id, "session ended");
    Ok(StatusCode::NO_CONTENT)
}

fn session_not_found(session_id: Uuid) -> AppError {
    AppError::NotFound(format!("session {session_id} not found"))
}
