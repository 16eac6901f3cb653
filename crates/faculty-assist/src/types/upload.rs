//! Uploaded files and their declared media types

use serde::{Deserialize, Serialize};
use std::path::Path;
use tempfile::TempPath;

use crate::error::{Error, Result};

/// Media types accepted for upload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// WebP image
    Webp,
    /// PDF document
    Pdf,
    /// Word document (.docx)
    Docx,
    /// Plain text
    PlainText,
}

impl MediaType {
    /// Parse a declared MIME type, ignoring parameters such as `charset`
    pub fn from_mime(mime: &str) -> Result<Self> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/jpeg" => Ok(Self::Jpeg),
            "image/png" => Ok(Self::Png),
            "image/webp" => Ok(Self::Webp),
            "application/pdf" => Ok(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Ok(Self::Docx)
            }
            "text/plain" => Ok(Self::PlainText),
            _ => Err(Error::UnsupportedMediaType(mime.to_string())),
        }
    }

    /// Canonical MIME string
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::PlainText => "text/plain",
        }
    }

    /// Whether the content goes to the model as inline image data
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Jpeg | Self::Png | Self::Webp)
    }
}

/// A file received with a request, stored in the upload directory.
///
/// The backing file is removed when this value is dropped, whichever way
/// the request ends.
#[derive(Debug)]
pub struct UploadedFile {
    path: TempPath,
    filename: String,
    media_type: MediaType,
    size: u64,
}

impl UploadedFile {
    /// Wrap a stored upload
    pub fn new(path: TempPath, filename: String, media_type: MediaType, size: u64) -> Self {
        Self {
            path,
            filename,
            media_type,
            size,
        }
    }

    /// Stored location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name the client gave the file
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Declared media type
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }
}
