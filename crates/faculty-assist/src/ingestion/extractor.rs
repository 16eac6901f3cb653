//! Multi-format upload extraction

use base64::Engine;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{ExtractedContent, MediaType, UploadedFile};

/// Turns stored files into model-ready content
pub struct FileExtractor;

impl FileExtractor {
    /// Extract an uploaded file according to its declared media type
    pub async fn extract(file: &UploadedFile) -> Result<ExtractedContent> {
        let data = tokio::fs::read(file.path()).await?;
        tracing::debug!(
            "Extracting '{}' ({}, {} bytes)",
            file.filename(),
            file.media_type().mime(),
            data.len()
        );
        Self::extract_bytes(file.filename(), file.media_type(), data).await
    }

    /// Extract in-memory content
    pub async fn extract_bytes(
        filename: &str,
        media_type: MediaType,
        data: Vec<u8>,
    ) -> Result<ExtractedContent> {
        if media_type.is_image() {
            return Ok(ExtractedContent::Image {
                data: base64::engine::general_purpose::STANDARD.encode(&data),
                mime_type: media_type.mime().to_string(),
            });
        }

        let name = filename.to_string();
        let content = tokio::task::spawn_blocking(move || match media_type {
            MediaType::Pdf => Self::parse_pdf(&name, &data),
            MediaType::Docx => Self::parse_docx(&name, &data),
            _ => Ok(Self::parse_text(&data)),
        })
        .await
        .map_err(|e| Error::extraction(filename, format!("parser aborted: {}", e)))??;

        Ok(ExtractedContent::Text {
            media_type,
            content,
        })
    }

    /// Read and extract a PDF from disk
    pub async fn extract_pdf_file(path: &Path) -> Result<String> {
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());

        let label = name.clone();
        tokio::task::spawn_blocking(move || Self::parse_pdf(&name, &data))
            .await
            .map_err(|e| Error::extraction(label, format!("parser aborted: {}", e)))?
    }

    /// Whole-document PDF text
    pub fn parse_pdf(filename: &str, data: &[u8]) -> Result<String> {
        let raw = match pdf_extract::extract_text_from_mem(data) {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!("pdf-extract found no text in '{}', trying fallback", filename);
                Self::extract_pdf_text_fallback(filename, data)?
            }
            Err(e) => {
                tracing::warn!("pdf-extract failed on '{}': {}, trying fallback", filename, e);
                Self::extract_pdf_text_fallback(filename, data)?
            }
        };

        let content = clean_text(&raw);
        if content.is_empty() {
            return Err(Error::extraction(
                filename,
                "No text content could be extracted from PDF",
            ));
        }
        Ok(content)
    }

    /// Scan page content streams for text-showing operators
    fn extract_pdf_text_fallback(filename: &str, data: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::extraction(filename, format!("Failed to load PDF: {}", e)))?;

        let mut text = String::new();
        for (page_num, page_id) in doc.get_pages() {
            match doc.get_page_content(page_id) {
                Ok(content) => {
                    let page_text = text_from_content_stream(&content);
                    if !page_text.is_empty() {
                        text.push_str(&page_text);
                        text.push('\n');
                    }
                }
                Err(e) => {
                    tracing::debug!("No content for page {} of '{}': {}", page_num, filename, e);
                }
            }
        }

        if text.trim().is_empty() {
            return Err(Error::extraction(
                filename,
                "PDF appears to be image-based or has no extractable text",
            ));
        }
        Ok(text)
    }

    /// Raw paragraph text of a DOCX, tables included
    pub fn parse_docx(filename: &str, data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data).map_err(|e| Error::extraction(filename, e.to_string()))?;

        let mut lines = Vec::new();
        for child in &doc.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(p) => lines.push(paragraph_text(p)),
                docx_rs::DocumentChild::Table(table) => collect_table_text(table, &mut lines),
                _ => {}
            }
        }

        Ok(lines.join("\n").trim_end().to_string())
    }

    /// Plain text, invalid UTF-8 replaced
    pub fn parse_text(data: &[u8]) -> String {
        String::from_utf8_lossy(data).into_owned()
    }
}

fn paragraph_text(p: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &p.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    docx_rs::RunChild::Text(t) => text.push_str(&t.text),
                    docx_rs::RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }
    text
}

fn collect_table_text(table: &docx_rs::Table, lines: &mut Vec<String>) {
    for row in &table.rows {
        let docx_rs::TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                match content {
                    docx_rs::TableCellContent::Paragraph(p) => lines.push(paragraph_text(p)),
                    docx_rs::TableCellContent::Table(inner) => collect_table_text(inner, lines),
                    _ => {}
                }
            }
        }
    }
}

/// Text between `BT`/`ET` from `Tj`/`TJ` string operands
fn text_from_content_stream(content: &[u8]) -> String {
    let stream = String::from_utf8_lossy(content);
    let mut text = String::new();
    let mut in_text_block = false;

    for line in stream.lines().map(str::trim) {
        match line {
            "BT" => in_text_block = true,
            "ET" => {
                in_text_block = false;
                text.push(' ');
            }
            _ if in_text_block && (line.ends_with("Tj") || line.ends_with("TJ")) => {
                if let (Some(start), Some(end)) = (line.find('('), line.rfind(')')) {
                    if start < end {
                        let decoded = line[start + 1..end]
                            .replace("\\(", "(")
                            .replace("\\)", ")")
                            .replace("\\n", "\n")
                            .replace("\\\\", "\\");
                        text.push_str(&decoded);
                    }
                }
            }
            _ => {}
        }
    }

    text.trim().to_string()
}

/// Drop NULs and ligatures, trim lines and remove blank ones
fn clean_text(raw: &str) -> String {
    raw.replace('\0', "")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB00}', "ff")
        .replace('\u{00A0}', " ")
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
