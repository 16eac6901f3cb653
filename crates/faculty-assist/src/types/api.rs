//! Request and response bodies of the HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resources::ResourceCatalog;

/// Response of `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Body of `POST /ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
}

/// Response of `POST /ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub question: String,
    pub answer: String,
    pub sources: Vec<String>,
}

/// Response of `POST /ask-upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskUploadResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub content: String,
}

/// Response of `GET /api/resources`
#[derive(Debug, Clone, Serialize)]
pub struct ResourcesResponse {
    pub resources: &'static ResourceCatalog,
    pub last_updated: DateTime<Utc>,
}
