//! Extracted file content and prompt parts

use serde::{Deserialize, Serialize};

use super::upload::MediaType;

/// Content produced from one uploaded or sample file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedContent {
    /// Image passed to the model unchanged
    Image {
        /// Base64 of the raw bytes
        data: String,
        /// Declared MIME type
        mime_type: String,
    },
    /// Text pulled out of a document
    Text {
        /// Kind of document the text came from
        media_type: MediaType,
        /// Extracted text
        content: String,
    },
}

impl ExtractedContent {
    /// Text content, if this is not an image
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            Self::Image { .. } => None,
        }
    }
}

/// One part of a prompt sent to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptPart {
    /// Text segment
    Text(String),
    /// Inline binary data (images)
    InlineData { mime_type: String, data: String },
}

/// Ordered prompt parts for a single model call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatPrompt {
    parts: Vec<PromptPart>,
}

impl ChatPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text part
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(PromptPart::Text(text.into()));
        self
    }

    /// Append an inline data part
    pub fn inline_data(mut self, mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        self.parts.push(PromptPart::InlineData {
            mime_type: mime_type.into(),
            data: data.into(),
        });
        self
    }

    pub fn parts(&self) -> &[PromptPart] {
        &self.parts
    }
}
