//! UTF-8 text file extractor.

use async_trait::async_trait;

use crate::domain::errors::{RetrievalError, RetrievalResult};
use crate::domain::models::DocumentRef;
use crate::domain::ports::TextExtractor;

/// Reads a text or markdown file verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, document: &DocumentRef) -> RetrievalResult<String> {
        let bytes = tokio::fs::read(document.as_path())
            .await
            .map_err(|e| RetrievalError::extraction(document.as_str(), e.to_string()))?;

        String::from_utf8(bytes).map_err(|e| {
            RetrievalError::extraction(document.as_str(), format!("not valid UTF-8: {e}"))
        })
    }
}
