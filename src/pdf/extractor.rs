//! PDF text extraction
//!
//! [`TextExtractor`] is the seam between the request handler and whatever
//! turns PDF bytes into text. [`MupdfExtractor`] is the production backend.

use async_trait::async_trait;
use mupdf::{Document, TextPageOptions};
use thiserror::Error;

const PDF_MIME: &str = "application/pdf";

/// Text extraction errors
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to load PDF: {0}")]
    LoadError(String),
    #[error("Failed to extract text from page {page}: {message}")]
    PageError { page: usize, message: String },
    #[error("MuPDF error: {0}")]
    MuPdfError(String),
    #[error("Extraction task failed: {0}")]
    TaskError(String),
}

impl From<mupdf::Error> for ExtractionError {
    fn from(e: mupdf::Error) -> Self {
        ExtractionError::MuPdfError(e.to_string())
    }
}

/// Converts a PDF byte buffer into plain text, one `\n` per text line
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, pdf: Vec<u8>) -> Result<String, ExtractionError>;
}

/// MuPDF-backed extractor
///
/// MuPDF's context is not thread-safe, so every call opens its own
/// document on a blocking thread and drops it before returning.
#[derive(Debug, Clone, Copy, Default)]
pub struct MupdfExtractor;

impl MupdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_blocking(data: &[u8]) -> Result<String, ExtractionError> {
        let doc = Document::from_bytes(data, PDF_MIME)
            .map_err(|e| ExtractionError::LoadError(e.to_string()))?;
        let page_count = doc.page_count()?;

        let mut text = String::new();
        for index in 0..page_count {
            let page_err = |e: mupdf::Error| ExtractionError::PageError {
                page: index as usize + 1,
                message: e.to_string(),
            };

            let page = doc.load_page(index).map_err(page_err)?;
            let page_text = page
                .to_text_page(TextPageOptions::empty())
                .and_then(|text_page| text_page.to_text())
                .map_err(page_err)?;

            text.push_str(&page_text);
            if !page_text.ends_with('\n') {
                text.push('\n');
            }
        }

        tracing::debug!(pages = page_count, chars = text.len(), "Extracted PDF text");
        Ok(text)
    }
}

#[async_trait]
impl TextExtractor for MupdfExtractor {
    async fn extract_text(&self, pdf: Vec<u8>) -> Result<String, ExtractionError> {
        // Offload to blocking task since MuPDF operations are CPU-bound
        tokio::task::spawn_blocking(move || Self::extract_blocking(&pdf))
            .await
            .map_err(|e| ExtractionError::TaskError(e.to_string()))?
    }
}
