//! Resume PDF text extraction.
//!
//! `extract_text` reports failures as `ExtractError`; the upload path goes
//! through `extract_text_or_empty`, which never fails and degrades to `""`.

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

const PDF_MAGIC: &[u8] = b"%PDF";
const HEADER_SEARCH_LEN: usize = 1024;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("not a PDF document")]
    NotPdf,

    #[error("PDF parse error: {0}")]
    Parse(String),

    #[error("PDF extraction aborted: {0}")]
    Aborted(String),
}

/// Extracts text from every page in document order.
/// Pages with no extractable text contribute nothing.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    if !has_pdf_header(bytes) {
        return Err(ExtractError::NotPdf);
    }

    // pdf-extract panics on some malformed inputs instead of returning an error.
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|panic| ExtractError::Aborted(panic_message(panic.as_ref())))?
        .map_err(|e| ExtractError::Parse(e.to_string()))?;

    Ok(join_pages(pages))
}

/// Readers accept the `%PDF` marker anywhere in the first kilobyte, so a BOM
/// or leading junk does not disqualify a document.
fn has_pdf_header(bytes: &[u8]) -> bool {
    bytes[..bytes.len().min(HEADER_SEARCH_LEN)]
        .windows(PDF_MAGIC.len())
        .any(|w| w == PDF_MAGIC)
}

/// Concatenates page texts without separators, skipping blank pages.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pages
        .into_iter()
        .filter(|page| !page.as_ref().trim().is_empty())
        .fold(String::new(), |mut text, page| {
            text.push_str(page.as_ref());
            text
        })
}

/// Runs extraction on the blocking pool and absorbs every failure into an
/// empty string.
pub async fn extract_text_or_empty(bytes: Bytes) -> String {
    let size = bytes.len();
    let result = tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| ExtractError::Aborted(e.to_string()))
        .and_then(|r| r);

    match result {
        Ok(text) => {
            if text.trim().is_empty() {
                info!("PDF parsed but contained no extractable text ({size} bytes)");
            }
            text
        }
        Err(e) => {
            warn!("Error reading PDF ({size} bytes): {e}");
            String::new()
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic in PDF library".to_string())
}
