mod chat;
mod config;
mod errors;
mod extraction;
mod knowledge;
mod llm_client;
mod models;
mod routes;
mod state;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::responder::{Responder, ResponderConfig};
use crate::config::Config;
use crate::extraction::{load_resume, RawDocument};
use crate::routes::build_router;
use crate::state::{AppState, ChatSession};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Tracing targets use the crate name, which has no hyphens.
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{crate_target}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting portfolio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the responder (remote generation only with a credential)
    let responder = Responder::new(ResponderConfig {
        credential: config.gemini_api_key.clone(),
        model_name: config.gemini_model.clone(),
        temperature: config.gemini_temperature,
        timeout: Duration::from_secs(config.llm_timeout_secs),
    });
    if responder.remote_enabled() {
        info!("Remote generation enabled (model: {})", config.gemini_model);
    } else {
        info!("GEMINI_API_KEY not set; queries are answered from extracted fields only");
    }

    // Build app state
    let state = AppState {
        sessions: Arc::new(RwLock::new(HashMap::new())),
        responder: Arc::new(responder),
    };

    // Optionally preload the portfolio owner's resume as a ready session
    if let Some(path) = &config.resume_path {
        preload_resume(&state, path).await;
    }

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Loads the resume at `path` into a session at startup so the service is
/// answerable before any upload. A missing or unreadable file is logged
/// and skipped rather than failing the boot.
async fn preload_resume(state: &AppState, path: &Path) {
    match RawDocument::from_path(path) {
        Ok(document) => {
            let (resume, warning) = load_resume(document);
            let session = ChatSession::new(resume, warning.map(|e| e.to_string()));
            let id = session.id;
            state.sessions.write().await.insert(id, session);
            info!(session_id = %id, path = %path.display(), "preloaded resume session");
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read preload resume");
        }
    }
}
