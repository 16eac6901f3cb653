//! Context cache management

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::server::state::AppState;

/// POST /api/context/refresh - Drop the cached context
pub async fn refresh_context(State(state): State<AppState>) -> Json<Value> {
    let provider = state.context_provider();
    provider.invalidate().await;

    Json(json!({
        "refreshed": true,
        "cached": provider.is_cached(),
    }))
}
