//! Resource listing endpoint

use axum::Json;
use chrono::Utc;

use crate::resources::CATALOG;
use crate::types::ResourcesResponse;

/// GET /api/resources - The resource table and the time of the response
pub async fn list_resources() -> Json<ResourcesResponse> {
    Json(ResourcesResponse {
        resources: &CATALOG,
        last_updated: Utc::now(),
    })
}
