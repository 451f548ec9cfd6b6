//! Text Extractor: turns uploaded document bytes into plain text.
//!
//! Never fails: unreadable pages are skipped and a document that cannot be
//! parsed at all yields an empty string. Callers decide what "too little
//! text" means.

use std::sync::Arc;

use tracing::warn;

pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> String;
}

/// PDF extractor backed by `pdf-extract`.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        let text = match pdf_extract::extract_text_from_mem_by_pages(bytes) {
            Ok(pages) => pages.concat(),
            Err(e) => {
                warn!("Per-page PDF extraction failed, retrying whole document: {e}");
                pdf_extract::extract_text_from_mem(bytes).unwrap_or_else(|e| {
                    warn!("PDF extraction error: {e}");
                    String::new()
                })
            }
        };
        text.trim().to_string()
    }
}

/// Runs `extractor` on the blocking pool. The PDF parser can panic on
/// malformed input; a panicked extraction counts as an empty document.
pub async fn extract_text(extractor: Arc<dyn TextExtractor>, bytes: bytes::Bytes) -> String {
    match tokio::task::spawn_blocking(move || extractor.extract(&bytes)).await {
        Ok(text) => text,
        Err(e) => {
            warn!("PDF extraction aborted: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PanickingExtractor;

    impl TextExtractor for PanickingExtractor {
        fn extract(&self, _bytes: &[u8]) -> String {
            panic!("malformed xref table");
        }
    }

    struct FixedExtractor(&'static str);

    impl TextExtractor for FixedExtractor {
        fn extract(&self, _bytes: &[u8]) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_garbage_bytes_yield_empty_text() {
        let text = PdfTextExtractor.extract(b"definitely not a pdf");
        assert_eq!(text, "");
    }

    #[test]
    fn test_empty_upload_yields_empty_text() {
        assert_eq!(PdfTextExtractor.extract(&[]), "");
    }

    #[tokio::test]
    async fn test_extract_text_swallows_parser_panic() {
        let text = extract_text(Arc::new(PanickingExtractor), bytes::Bytes::from_static(b"%PDF-1.4")).await;
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_extract_text_returns_extractor_output() {
        let text = extract_text(Arc::new(FixedExtractor("Education")), bytes::Bytes::new()).await;
        assert_eq!(text, "Education");
    }
}
