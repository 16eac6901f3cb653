//! HTTP server for the assistant

pub mod routes;
pub mod state;
pub mod upload;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use state::AppState;

/// Assistant HTTP server
pub struct AssistServer {
    config: AppConfig,
    state: AppState,
}

impl AssistServer {
    /// Create a server backed by Gemini
    pub async fn new(config: AppConfig) -> Result<Self> {
        let state = AppState::new(config.clone()).await?;
        Ok(Self { config, state })
    }

    /// Create a server around prepared state
    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config().clone(),
            state,
        }
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = build_router(self.state.clone())?;

        tracing::info!("Starting assistant server on http://{}", addr);
        tracing::info!("Serving client files from {}", self.config.server.static_dir.display());

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        tokio::spawn(warm_up(self.state.clone()));

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// Build the router with all routes
pub fn build_router(state: AppState) -> Result<Router> {
    let server = &state.config().server;
    let cors = cors_layer(&server.cors_origin)?;
    let client = serve_client(&server.static_dir);
    let api = routes::api_routes(server.max_upload_size);

    Ok(Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness))
        .merge(api)
        .fallback_service(client)
        .with_state(state)
        // Middleware layers (order matters - applied bottom to top)
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

fn serve_client(static_dir: &Path) -> ServeDir {
    ServeDir::new(static_dir)
}

fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origin.trim() == "*" {
        return Ok(cors.allow_origin(Any));
    }

    let origin = HeaderValue::from_str(origin.trim())
        .map_err(|e| Error::Config(format!("Invalid CORS origin '{}': {}", origin, e)))?;
    Ok(cors.allow_origin(origin))
}

/// Build the context once at startup, then mark the server ready
async fn warm_up(state: AppState) {
    tracing::info!("Preparing initial context...");
    match state.context_provider().context().await {
        Ok(context) => tracing::info!(
            "Context ready: sources {:?}",
            context.sources()
        ),
        Err(e) => tracing::error!("Initial context preparation failed: {}", e),
    }
    state.set_ready(true);
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Readiness check endpoint
async fn readiness(state: axum::extract::State<AppState>) -> StatusCode {
    if state.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
