pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat_handlers;
use crate::extraction::handlers as resume_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resume",
            post(resume_handlers::handle_upload_resume),
        )
        .route(
            "/api/v1/resume/:session_id",
            get(resume_handlers::handle_get_record).delete(resume_handlers::handle_end_session),
        )
        .route(
            "/api/v1/resume/:session_id/summary",
            get(chat_handlers::handle_summary),
        )
        // Chat API
        .route("/api/v1/chat", post(chat_handlers::handle_chat))
        .route(
            "/api/v1/chat/:session_id/history",
            get(chat_handlers::handle_history),
        )
        // Scanned resume PDFs routinely exceed axum's 2 MB default body cap.
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(state)
}
