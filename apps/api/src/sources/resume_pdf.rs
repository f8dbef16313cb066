//! Resume text extraction from an uploaded PDF.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("uploaded resume is empty")]
    Empty,

    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("PDF extraction task failed: {0}")]
    Task(String),
}

/// Turns an uploaded resume document into plain text.
#[async_trait]
pub trait ResumeSource: Send + Sync {
    async fn extract_text(&self, document: Bytes) -> Result<String, ExtractError>;
}

/// `pdf-extract` backed source. Parsing is CPU-bound and runs on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfResumeSource;

#[async_trait]
impl ResumeSource for PdfResumeSource {
    async fn extract_text(&self, document: Bytes) -> Result<String, ExtractError> {
        if document.is_empty() {
            return Err(ExtractError::Empty);
        }

        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&document)
                .map_err(|e| ExtractError::Pdf(e.to_string()))
        })
        .await
        // pdf-extract panics on some malformed inputs; a JoinError carries the panic.
        .map_err(|e| ExtractError::Task(e.to_string()))??;

        debug!(
            "Extracted resume text ({} chars): {:?}",
            text.len(),
            text.chars().take(200).collect::<String>()
        );
        Ok(normalize_line_endings(&text))
    }
}

/// PDF text often carries `\r\n` or lone `\r`; the core is strictly `\n`-separated.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_upload_is_rejected() {
        let err = PdfResumeSource.extract_text(Bytes::new()).await.unwrap_err();
        assert!(matches!(err, ExtractError::Empty));
    }

    #[tokio::test]
    async fn test_non_pdf_bytes_fail_cleanly() {
        let result = PdfResumeSource
            .extract_text(Bytes::from_static(b"definitely not a pdf"))
            .await;
        assert!(matches!(
            result,
            Err(ExtractError::Pdf(_)) | Err(ExtractError::Task(_))
        ));
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
    }
}
