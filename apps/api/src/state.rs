use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::chat::responder::Responder;
use crate::extraction::LoadedResume;
use crate::models::chat::ChatTurn;

/// In-memory session map. Sessions exist only for the lifetime of the
/// process; ending one drops its resume and transcript together.
pub type SessionStore = Arc<RwLock<HashMap<Uuid, ChatSession>>>;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub responder: Arc<Responder>,
}

/// One uploaded resume and its running conversation. The resume itself is
/// immutable and shared; only the transcript grows.
pub struct ChatSession {
    pub id: Uuid,
    pub resume: Arc<LoadedResume>,
    pub history: Vec<ChatTurn>,
    pub created_at: DateTime<Utc>,
    /// Set when the text layer could not be decoded and the record is
    /// running on empty text.
    pub extraction_warning: Option<String>,
}

impl ChatSession {
    pub fn new(resume: LoadedResume, extraction_warning: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            resume: Arc::new(resume),
            history: Vec::new(),
            created_at: Utc::now(),
            extraction_warning,
        }
    }
}
