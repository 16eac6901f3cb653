//! Assistant server binary
//!
//! Run with: cargo run -p faculty-assist --bin faculty-assist-server

use faculty_assist::{config::AppConfig, server::AssistServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "faculty_assist=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        tracing::error!("Set GEMINI_API_KEY in the environment or the config file");
        std::process::exit(1);
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - Model: {}", config.gemini.model);
    tracing::info!("  - Upload limit: {} bytes", config.server.max_upload_size);
    tracing::info!("  - Data directory: {}", config.knowledge.data_dir.display());
    tracing::info!("  - Context cache: {}", config.knowledge.cache_context);

    let server = AssistServer::new(config).await?;

    println!("\nServer starting...");
    println!("  Client: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /chat           - Chat with optional file");
    println!("  POST /ask            - Ask over the faculty context");
    println!("  POST /ask-upload     - Analyse an uploaded file");
    println!("  GET  /api/resources  - Resource links");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
