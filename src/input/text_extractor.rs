//! Text extraction from uploaded resume documents

use crate::error::{IntakeError, Result};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(IntakeError::Io)?;
        extract_from_bytes(&bytes)
    }
}

/// Extract plain text from an in-memory PDF payload.
///
/// Pages are visited in ascending order and their text runs concatenated;
/// layout is discarded entirely. The result is whitespace-normalized: runs of
/// whitespace collapse to a single space and the blob carries no leading or
/// trailing whitespace. Fails if the payload is not a parseable PDF.
pub fn extract_from_bytes(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| IntakeError::PdfExtraction(format!("Failed to extract text: {}", e)))?;
    Ok(normalize_whitespace(&text))
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_page_and_line_breaks() {
        let raw = "First page line one\nline two\n\nSecond page  text \n";
        assert_eq!(
            normalize_whitespace(raw),
            "First page line one line two Second page text"
        );
    }

    #[test]
    fn test_normalize_trims_edges() {
        assert_eq!(normalize_whitespace("  hello world  "), "hello world");
        assert_eq!(normalize_whitespace("\n\t\n"), "");
    }

    #[test]
    fn test_unparseable_payload_is_an_extraction_error() {
        let err = extract_from_bytes(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, IntakeError::PdfExtraction(_)));
    }
}
