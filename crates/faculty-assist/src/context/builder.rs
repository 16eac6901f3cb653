//! Sequential context assembly from sample files and the website

use std::sync::Arc;
use std::time::Instant;

use crate::config::KnowledgeConfig;
use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::ingestion::{FileExtractor, WebScraper};
use crate::providers::{GenerationOptions, GenerativeModel};
use crate::types::{DocumentSummary, ImageSummary, PreparedContext};

/// Builds a `PreparedContext` from the knowledge manifest
pub struct ContextBuilder {
    knowledge: KnowledgeConfig,
    model: Arc<dyn GenerativeModel>,
    scraper: WebScraper,
}

impl ContextBuilder {
    pub fn new(knowledge: KnowledgeConfig, model: Arc<dyn GenerativeModel>, scraper: WebScraper) -> Self {
        Self {
            knowledge,
            model,
            scraper,
        }
    }

    /// Analyse images, extract documents, then scrape the website.
    ///
    /// Missing files are skipped, unreadable documents are skipped with a
    /// warning and a failed fetch leaves `website` empty. A failed vision
    /// call fails the whole build.
    pub async fn build(&self) -> Result<PreparedContext> {
        let start = Instant::now();
        let mut context = PreparedContext::default();

        for image in &self.knowledge.images {
            let path = self.knowledge.resolve(&image.file);
            if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
                tracing::debug!("Sample image '{}' not found at {}", image.key, path.display());
                continue;
            }

            let data = tokio::fs::read(&path).await?;
            let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &data);
            let prompt = PromptBuilder::build_vision_prompt(None, &image.mime_type, &encoded);
            let analysis = self
                .model
                .generate(&prompt, &GenerationOptions::default())
                .await?;

            context.images.insert(
                image.key.clone(),
                ImageSummary {
                    description: image.description.clone(),
                    content: analysis,
                },
            );
        }

        for document in &self.knowledge.documents {
            let path = self.knowledge.resolve(&document.file);
            if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
                tracing::debug!("Sample document '{}' not found at {}", document.key, path.display());
                continue;
            }

            match FileExtractor::extract_pdf_file(&path).await {
                Ok(content) => {
                    context.documents.insert(
                        document.key.clone(),
                        DocumentSummary {
                            doc_type: "pdf".to_string(),
                            content,
                        },
                    );
                }
                Err(e) => {
                    tracing::warn!("Skipping sample document '{}': {}", document.key, e);
                }
            }
        }

        context.website = match self.scraper.fetch_text(&self.knowledge.website_url).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("Website context unavailable: {}", e);
                None
            }
        };

        tracing::info!(
            "Context built in {:.1}s: {} images, {} documents, website {}",
            start.elapsed().as_secs_f64(),
            context.images.len(),
            context.documents.len(),
            if context.website.is_some() { "ok" } else { "missing" }
        );

        Ok(context)
    }
}
