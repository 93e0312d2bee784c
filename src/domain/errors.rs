//! Domain errors for the retrieval engine.

use thiserror::Error;

/// Errors that can occur while extracting, indexing, searching, or answering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetrievalError {
    /// Source document is unreadable, corrupted, or in an unsupported format.
    #[error("Extraction failed for {document}: {reason}")]
    Extraction { document: String, reason: String },

    /// Invalid parameters (chunking, top-k) or an embedding model mismatch.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream embedding failure: timeout, quota, malformed input.
    #[error("Embedding service error: {0}")]
    EmbeddingService(String),

    /// A persisted record failed its alignment or dimension check.
    #[error("Cache record for {document} is corrupt: {reason}")]
    CacheCorruption { document: String, reason: String },

    /// Completion call failed; no answer is produced.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Cache store I/O or encoding failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Search was requested before any chunks were loaded.
    #[error("No embeddings loaded for {0}; process the document first")]
    NoDocumentLoaded(String),
}

pub type RetrievalResult<T> = Result<T, RetrievalError>;

impl RetrievalError {
    /// Shorthand for an [`RetrievalError::Extraction`] error.
    pub fn extraction(document: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Extraction {
            document: document.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`RetrievalError::CacheCorruption`] error.
    pub fn corruption(document: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CacheCorruption {
            document: document.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the caller may retry the whole operation.
    ///
    /// Only upstream embedding failures qualify. Extraction and configuration
    /// errors need the input fixed, and generation failures are surfaced as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::EmbeddingService(_))
    }
}

impl From<std::io::Error> for RetrievalError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for RetrievalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
