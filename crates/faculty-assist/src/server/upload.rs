//! Multipart form reading with upload validation

use axum::extract::Multipart;
use std::collections::HashMap;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::types::{MediaType, UploadedFile};

/// Name of the multipart field carrying the file
pub const FILE_FIELD: &str = "file";

/// Parsed multipart form: at most one stored file plus text fields
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Text field value, if present and not blank
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

/// Read a multipart form, streaming the `file` field into `upload_dir`.
///
/// The declared media type is checked before any bytes are stored and the
/// size limit while streaming; a rejected or half-written file is removed
/// as soon as the error propagates.
pub async fn read_upload_form(
    multipart: &mut Multipart,
    upload_dir: &Path,
    max_size: usize,
) -> Result<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidUpload(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name != FILE_FIELD {
            let value = field
                .text()
                .await
                .map_err(|e| Error::InvalidUpload(format!("Failed to read field '{}': {}", name, e)))?;
            form.fields.insert(name, value);
            continue;
        }

        // An empty file input is sent as a part with no filename.
        let filename = field.file_name().unwrap_or("").trim().to_string();
        if filename.is_empty() {
            while field
                .chunk()
                .await
                .map_err(|e| Error::InvalidUpload(format!("Failed to read field '{}': {}", name, e)))?
                .is_some()
            {}
            tracing::debug!("Ignoring file field without a filename");
            continue;
        }

        if form.file.is_some() {
            return Err(Error::InvalidUpload("Only one file may be uploaded".to_string()));
        }

        let declared = field.content_type().unwrap_or("").to_string();
        let media_type = MediaType::from_mime(&declared)?;

        let (file, path) = tempfile::Builder::new()
            .prefix("upload-")
            .tempfile_in(upload_dir)?
            .into_parts();
        let mut file = tokio::fs::File::from_std(file);
        let mut size = 0usize;

        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| Error::InvalidUpload(format!("Failed to read '{}': {}", filename, e)))?
        {
            size += chunk.len();
            if size > max_size {
                tracing::warn!("Rejected '{}': larger than {} bytes", filename, max_size);
                return Err(Error::UploadTooLarge { limit: max_size });
            }
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        tracing::info!(
            "Received file: {} ({}, {} bytes)",
            filename,
            media_type.mime(),
            size
        );
        form.file = Some(UploadedFile::new(path, filename, media_type, size as u64));
    }

    Ok(form)
}
