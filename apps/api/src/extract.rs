//! Text source — turns an uploaded document into a `SourceText`.
//!
//! Supports PDF uploads (via `pdf-extract`, fully in memory) and plain text.
//! Paragraphs are split on blank lines; empty paragraphs are dropped so the
//! engine only ever sees non-empty ones.

use tracing::info;

use crate::errors::AppError;
use crate::layout::locate::SourceText;

/// Extracts paragraphs from an uploaded PDF.
pub fn from_pdf_bytes(bytes: &[u8]) -> Result<SourceText, AppError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extract(format!("failed to extract text from PDF: {e}")))?;
    let text = from_plain_text(&raw);
    info!(
        paragraphs = text.paragraphs.len(),
        "extracted text from PDF upload"
    );
    if text.is_empty() {
        return Err(AppError::Extract(
            "PDF contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}

/// Splits plain text into paragraphs on blank lines.
///
/// Single newlines inside a paragraph are kept as part of the paragraph
/// (they count as whitespace to the flow engine and the locator).
pub fn from_plain_text(raw: &str) -> SourceText {
    let paragraphs: Vec<String> = raw
        .split("\n\n")
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
        .collect();
    SourceText::new(paragraphs)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_splits_on_blank_lines() {
        let text = from_plain_text("First paragraph.\n\nSecond paragraph.\n\nThird.");
        assert_eq!(
            text.paragraphs,
            vec!["First paragraph.", "Second paragraph.", "Third."]
        );
    }

    #[test]
    fn test_plain_text_skips_empty_paragraphs() {
        let text = from_plain_text("One.\n\n\n\n   \n\nTwo.");
        assert_eq!(text.paragraphs, vec!["One.", "Two."]);
    }

    #[test]
    fn test_plain_text_keeps_single_newlines_within_paragraph() {
        let text = from_plain_text("line one\nline two\n\nnext");
        assert_eq!(text.paragraphs, vec!["line one\nline two", "next"]);
    }

    #[test]
    fn test_plain_text_empty_input() {
        let text = from_plain_text("");
        assert!(text.is_empty());
    }

    #[test]
    fn test_pdf_garbage_bytes_is_extract_error() {
        let result = from_pdf_bytes(b"not a pdf at all");
        assert!(matches!(result, Err(AppError::Extract(_))));
    }
}
