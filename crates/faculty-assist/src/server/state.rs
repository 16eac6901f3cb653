//! Application state for the assistant server

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::context::{CachedContextProvider, ContextBuilder, ContextProvider, LiveContextProvider};
use crate::error::{Error, Result};
use crate::ingestion::WebScraper;
use crate::providers::{GeminiClient, GenerativeModel};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Text and vision model
    model: Arc<dyn GenerativeModel>,
    /// Background context for `/ask`
    context_provider: Arc<dyn ContextProvider>,
    /// Set once the startup warm-up finished
    ready: RwLock<bool>,
}

impl AppState {
    /// Create state backed by Gemini
    pub async fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;

        let model = Arc::new(GeminiClient::new(&config.gemini)?);
        tracing::info!("Gemini client initialized (model: {})", model.model());

        Self::with_model(config, model).await
    }

    /// Create state around an existing model, choosing the context provider
    /// from `knowledge.cache_context`
    pub async fn with_model(config: AppConfig, model: Arc<dyn GenerativeModel>) -> Result<Self> {
        let builder = ContextBuilder::new(
            config.knowledge.clone(),
            Arc::clone(&model),
            WebScraper::default(),
        );

        let context_provider: Arc<dyn ContextProvider> = if config.knowledge.cache_context {
            tracing::info!("Context cache enabled; refresh with POST /api/context/refresh");
            Arc::new(CachedContextProvider::new(builder))
        } else {
            Arc::new(LiveContextProvider::new(builder))
        };

        Self::with_providers(config, model, context_provider).await
    }

    /// Create state from explicit collaborators
    pub async fn with_providers(
        config: AppConfig,
        model: Arc<dyn GenerativeModel>,
        context_provider: Arc<dyn ContextProvider>,
    ) -> Result<Self> {
        for dir in [&config.server.upload_dir, &config.knowledge.data_dir] {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                Error::Config(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                model,
                context_provider,
                ready: RwLock::new(false),
            }),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn model(&self) -> &Arc<dyn GenerativeModel> {
        &self.inner.model
    }

    pub fn context_provider(&self) -> &Arc<dyn ContextProvider> {
        &self.inner.context_provider
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}
