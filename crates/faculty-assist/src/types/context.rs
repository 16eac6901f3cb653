//! Prepared background context for `/ask`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;

/// Marker listed in `sources` for the scraped page
pub const WEBSITE_SOURCE: &str = "website";

/// Vision analysis of one sample image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub description: String,
    pub content: String,
}

/// Extracted text of one sample document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub content: String,
}

/// Composite context built from sample images, documents and the website
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedContext {
    pub images: BTreeMap<String, ImageSummary>,
    pub documents: BTreeMap<String, DocumentSummary>,
    pub website: Option<String>,
}

impl PreparedContext {
    /// Keys that contributed data, followed by the website marker
    pub fn sources(&self) -> Vec<String> {
        self.images
            .keys()
            .chain(self.documents.keys())
            .cloned()
            .chain(std::iter::once(WEBSITE_SOURCE.to_string()))
            .collect()
    }

    /// Render as the reference text sent with each question
    pub fn render(&self) -> Result<String> {
        let images = serde_json::to_string(&self.images)?;
        let documents = serde_json::to_string(&self.documents)?;
        let website = self.website.as_deref().unwrap_or("null");

        Ok(format!(
            "ข้อมูลจากรูปภาพ:\n{}\n\nข้อมูลจากเอกสาร:\n{}\n\nข้อมูลจากเว็บไซต์:\n{}",
            images, documents, website
        ))
    }
}
