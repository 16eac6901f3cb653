//! Context providers: rebuild-per-call and cached

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::builder::ContextBuilder;
use crate::error::Result;
use crate::types::PreparedContext;

/// Source of the prepared context used by `/ask`
#[async_trait]
pub trait ContextProvider: Send + Sync {
    /// Current context, building it if needed
    async fn context(&self) -> Result<Arc<PreparedContext>>;

    /// Drop any stored context so the next call rebuilds
    async fn invalidate(&self);

    /// Whether built contexts are reused across calls
    fn is_cached(&self) -> bool;
}

/// Rebuilds the full context on every call
pub struct LiveContextProvider {
    builder: ContextBuilder,
}

impl LiveContextProvider {
    pub fn new(builder: ContextBuilder) -> Self {
        Self { builder }
    }
}

#[async_trait]
impl ContextProvider for LiveContextProvider {
    async fn context(&self) -> Result<Arc<PreparedContext>> {
        Ok(Arc::new(self.builder.build().await?))
    }

    async fn invalidate(&self) {}

    fn is_cached(&self) -> bool {
        false
    }
}

/// Keeps the first successful build until invalidated
pub struct CachedContextProvider {
    builder: ContextBuilder,
    // Held across the build so concurrent cold callers build once.
    cached: Mutex<Option<Arc<PreparedContext>>>,
}

impl CachedContextProvider {
    pub fn new(builder: ContextBuilder) -> Self {
        Self {
            builder,
            cached: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ContextProvider for CachedContextProvider {
    async fn context(&self) -> Result<Arc<PreparedContext>> {
        let mut cached = self.cached.lock().await;
        if let Some(context) = cached.as_ref() {
            return Ok(Arc::clone(context));
        }

        let context = Arc::new(self.builder.build().await?);
        *cached = Some(Arc::clone(&context));
        Ok(context)
    }

    async fn invalidate(&self) {
        let mut cached = self.cached.lock().await;
        if cached.take().is_some() {
            tracing::info!("Context cache invalidated");
        }
    }

    fn is_cached(&self) -> bool {
        true
    }
}
