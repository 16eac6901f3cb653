//! Chat endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::time::Instant;

use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::ingestion::FileExtractor;
use crate::providers::GenerationOptions;
use crate::resources::{find_relevant_resources, format_resource_links, CATALOG};
use crate::server::state::AppState;
use crate::server::upload::read_upload_form;
use crate::types::{ChatResponse, ExtractedContent, UploadedFile};

/// POST /chat - Answer a message, optionally about an uploaded file
pub async fn chat(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ChatResponse>> {
    let start = Instant::now();
    let server = &state.config().server;

    let mut form = read_upload_form(&mut multipart, &server.upload_dir, server.max_upload_size).await?;
    let message = form.field("message").unwrap_or("").to_string();

    let extracted = match form.file.take() {
        Some(file) => Some(extract_and_discard(file).await?),
        None => None,
    };

    tracing::info!(
        "Chat: \"{}\" (file: {})",
        message,
        match &extracted {
            Some(ExtractedContent::Image { mime_type, .. }) => mime_type.as_str(),
            Some(ExtractedContent::Text { media_type, .. }) => media_type.mime(),
            None => "none",
        }
    );

    let gemini = &state.config().gemini;
    let options = GenerationOptions::chat().with_sampling(gemini.temperature, gemini.top_p);
    let prompt = PromptBuilder::build_chat_prompt(&message, extracted.as_ref());
    let mut response = state.model().generate(&prompt, &options).await?;

    let resources = find_relevant_resources(&CATALOG, &message);
    if let Some(links) = format_resource_links(&resources) {
        response.push_str(&links);
    }

    tracing::info!(
        "Chat answered in {}ms ({} resource links)",
        start.elapsed().as_millis(),
        resources.len()
    );

    Ok(Json(ChatResponse { response }))
}

/// Extract a file and drop it, removing it from the upload directory
/// whether or not extraction succeeded
pub(crate) async fn extract_and_discard(file: UploadedFile) -> Result<ExtractedContent> {
    FileExtractor::extract(&file).await
}
