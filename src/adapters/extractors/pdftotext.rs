//! PDF extraction through poppler's `pdftotext` binary.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use crate::domain::errors::{RetrievalError, RetrievalResult};
use crate::domain::models::DocumentRef;
use crate::domain::ports::TextExtractor;

/// Form feed emitted by pdftotext after every page.
const PAGE_BREAK: char = '\u{c}';

/// Extracts PDF text by running `pdftotext -enc UTF-8 <file> -`.
#[derive(Debug, Clone)]
pub struct PdftotextExtractor {
    binary: String,
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self {
            binary: "pdftotext".to_string(),
        }
    }
}

impl PdftotextExtractor {
    /// Use a specific `pdftotext` executable instead of the one on `PATH`.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl TextExtractor for PdftotextExtractor {
    #[tracing::instrument(skip_all, fields(document = %document))]
    async fn extract(&self, document: &DocumentRef) -> RetrievalResult<String> {
        if !tokio::fs::try_exists(document.as_path())
            .await
            .unwrap_or(false)
        {
            return Err(RetrievalError::extraction(
                document.as_str(),
                "file does not exist",
            ));
        }

        let output = Command::new(&self.binary)
            .arg("-enc")
            .arg("UTF-8")
            .arg(document.as_path())
            .arg("-")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                RetrievalError::extraction(
                    document.as_str(),
                    format!("failed to run {} (is poppler installed?): {e}", self.binary),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RetrievalError::extraction(
                document.as_str(),
                format!("{} exited with {}: {}", self.binary, output.status, stderr.trim()),
            ));
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        let text = join_pages(&raw);
        if text.trim().is_empty() {
            tracing::warn!("pdftotext produced no text");
        } else {
            tracing::debug!(chars = text.chars().count(), "extracted pdf text");
        }

        Ok(text)
    }
}

/// Rewrite pdftotext output as page texts concatenated in order, each page
/// terminated by a newline.
fn join_pages(raw: &str) -> String {
    let body = raw.strip_suffix(PAGE_BREAK).unwrap_or(raw);
    if body.is_empty() {
        return String::new();
    }

    let mut text = String::with_capacity(body.len() + 1);
    for page in body.split(PAGE_BREAK) {
        text.push_str(page);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_terminates_each_page() {
        assert_eq!(join_pages("first\n\u{c}second\n\u{c}"), "first\n\nsecond\n\n");
        assert_eq!(join_pages("one\u{c}two"), "one\ntwo\n");
    }

    #[test]
    fn test_join_pages_empty_output() {
        assert_eq!(join_pages(""), "");
        assert_eq!(join_pages("\u{c}"), "");
    }

    #[test]
    fn test_join_pages_keeps_blank_pages() {
        assert_eq!(join_pages("a\u{c}\u{c}b\u{c}"), "a\n\nb\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.pdf");

        let err = PdftotextExtractor::default()
            .extract(&DocumentRef::new(path.to_string_lossy()))
            .await
            .unwrap_err();

        assert!(matches!(err, RetrievalError::Extraction { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let err = PdftotextExtractor::with_binary("docqa-no-such-pdftotext")
            .extract(&DocumentRef::new(path.to_string_lossy()))
            .await
            .unwrap_err();

        assert!(matches!(err, RetrievalError::Extraction { .. }));
        assert!(err.to_string().contains("poppler"));
    }
}
