//! PDF text extraction with a two-decoder chain.
//!
//! `pdf-extract` is tried first, page by page. If it errors out or yields
//! nothing but whitespace, the stream is decoded again from the start with
//! `lopdf`. Only when both decoders come up empty does the loader report an
//! `ExtractionError`; the caller keeps going with an empty text layer.

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
#[error("no text layer could be extracted from '{document}'")]
pub struct ExtractionError {
    pub document: String,
}

/// Extracts the text layer of a PDF byte stream, pages joined by newlines.
pub fn extract_pdf_text(data: &[u8], source: &str) -> Result<String, ExtractionError> {
    match primary_text(data) {
        Ok(text) if !text.trim().is_empty() => {
            debug!(source, chars = text.len(), "primary decoder extracted text");
            return Ok(text);
        }
        Ok(_) => warn!(source, "primary decoder produced no text, trying fallback"),
        Err(e) => warn!(source, "primary decoder failed ({e}), trying fallback"),
    }

    match fallback_text(data) {
        Ok(text) if !text.trim().is_empty() => {
            debug!(source, chars = text.len(), "fallback decoder extracted text");
            Ok(text)
        }
        Ok(_) => Err(ExtractionError {
            document: source.to_string(),
        }),
        Err(e) => {
            warn!(source, "fallback decoder failed ({e})");
            Err(ExtractionError {
                document: source.to_string(),
            })
        }
    }
}

// pdf-extract walks pages itself and already isolates per-page content
// failures; only document-level errors surface here.
fn primary_text(data: &[u8]) -> Result<String, pdf_extract::OutputError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(data)?;
    Ok(pages.join("\n"))
}

// A page lopdf cannot decode contributes an empty string; the rest of the
// document is still used.
fn fallback_text(data: &[u8]) -> Result<String, lopdf::Error> {
    let document = lopdf::Document::load_mem(data)?;
    let pages: Vec<String> = document
        .get_pages()
        .keys()
        .map(|page| document.extract_text(&[*page]).unwrap_or_default())
        .collect();
    Ok(pages.join("\n"))
}
