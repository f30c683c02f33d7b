//! PDF text extraction.
//!
//! Pages are read in order. Within a page every run of whitespace collapses to
//! a single space, so text fragments are space-joined; pages are then joined
//! with newlines and the whole document is trimmed. `pdf_extract` can panic on
//! malformed input instead of returning an error, so the call runs under
//! `catch_unwind` and both outcomes map to `TextExtractionError`.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to extract text from PDF: {reason}")]
pub struct TextExtractionError {
    reason: String,
}

impl TextExtractionError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Extracts the page-ordered plain text of a PDF held in memory.
///
/// An empty string is a valid result (scanned or image-only documents); the
/// caller decides whether that is acceptable.
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String, TextExtractionError> {
    let pages = extract_pages(bytes)?;
    Ok(join_pages(&pages))
}

fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, TextExtractionError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));
    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(TextExtractionError::new(e.to_string())),
        Err(_) => Err(TextExtractionError::new(
            "parser panicked on malformed document",
        )),
    }
}

fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
