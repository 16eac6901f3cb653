//! HTTP routes

pub mod ask;
pub mod chat;
pub mod context;
pub mod resources;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Allowance for multipart framing and text fields on top of the file limit
const FORM_OVERHEAD: usize = 1024 * 1024;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    let body_limit = max_upload_size.saturating_add(FORM_OVERHEAD);

    Router::new()
        // Chat with optional file
        .route(
            "/chat",
            post(chat::chat).layer(DefaultBodyLimit::max(body_limit)),
        )
        // Questions over the prepared context
        .route("/ask", post(ask::ask).layer(DefaultBodyLimit::max(max_upload_size)))
        .route(
            "/ask-upload",
            post(ask::ask_upload).layer(DefaultBodyLimit::max(body_limit)),
        )
        // Static resources
        .route("/api/resources", get(resources::list_resources))
        // Context cache
        .route("/api/context/refresh", post(context::refresh_context))
        // Info
        .route("/api/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "faculty-assist",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Faculty help-desk assistant backed by Gemini",
        "endpoints": {
            "POST /chat": "Chat with an optional image, PDF, DOCX or text file",
            "POST /ask": "Ask a question over the prepared faculty context",
            "POST /ask-upload": "Analyse an uploaded file, optionally guided by a question",
            "GET /api/resources": "List curated resource links",
            "POST /api/context/refresh": "Drop the cached context",
            "GET /health": "Liveness",
            "GET /ready": "Readiness after context warm-up"
        }
    }))
}
