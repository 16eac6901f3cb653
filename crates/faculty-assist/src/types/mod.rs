//! Core types for the assistant

pub mod api;
pub mod content;
pub mod context;
pub mod upload;

pub use api::{AskRequest, AskResponse, AskUploadResponse, ChatResponse, ResourcesResponse};
pub use content::{ChatPrompt, ExtractedContent, PromptPart};
pub use context::{DocumentSummary, ImageSummary, PreparedContext};
pub use upload::{MediaType, UploadedFile};
