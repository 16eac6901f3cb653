//! faculty-assist: help-desk backend for an engineering faculty
//!
//! Forwards chat messages, questions and uploaded files (images, PDF, DOCX,
//! plain text) to Gemini, attaches curated resource links when a message
//! touches admission, tuition or curriculum topics, and answers questions
//! over a context built from sample documents and the faculty website.

pub mod config;
pub mod context;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod resources;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{ExtractedContent, MediaType, PreparedContext, UploadedFile};
