//! Question endpoints over the prepared context and uploaded files

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use std::time::Instant;

use super::chat::extract_and_discard;
use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::providers::GenerationOptions;
use crate::server::state::AppState;
use crate::server::upload::{read_upload_form, FILE_FIELD};
use crate::types::{AskRequest, AskResponse, AskUploadResponse, ExtractedContent};

/// POST /ask - Answer a question using the prepared context
pub async fn ask(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>> {
    let request = match payload {
        Ok(Json(request)) => request,
        // Non-JSON bodies carry no question
        Err(JsonRejection::MissingJsonContentType(_)) => {
            return Err(Error::MissingField("question"))
        }
        Err(rejection) => return Err(Error::InvalidRequest(rejection.body_text())),
    };

    let question = request
        .question
        .filter(|q| !q.trim().is_empty())
        .ok_or(Error::MissingField("question"))?;

    let start = Instant::now();
    tracing::info!("Ask: \"{}\"", question);

    let context = state.context_provider().context().await?;
    let prompt = PromptBuilder::build_ask_prompt(&question, &context.render()?);

    let answer = state
        .model()
        .generate(&prompt, &GenerationOptions::default())
        .await?;

    tracing::info!("Ask answered in {}ms", start.elapsed().as_millis());

    Ok(Json(AskResponse {
        question,
        answer,
        sources: context.sources(),
    }))
}

/// POST /ask-upload - Describe or extract an uploaded file
pub async fn ask_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AskUploadResponse>> {
    let server = &state.config().server;
    let mut form = read_upload_form(&mut multipart, &server.upload_dir, server.max_upload_size).await?;

    let file = form.file.take().ok_or(Error::MissingField(FILE_FIELD))?;
    let question = form.field("question").map(str::to_string);

    let content = match extract_and_discard(file).await? {
        ExtractedContent::Image { data, mime_type } => {
            let prompt = PromptBuilder::build_vision_prompt(question.as_deref(), &mime_type, &data);
            state
                .model()
                .generate(&prompt, &GenerationOptions::default())
                .await?
        }
        ExtractedContent::Text { content, .. } => content,
    };

    Ok(Json(AskUploadResponse { question, content }))
}
