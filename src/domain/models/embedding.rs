//! Embedding domain models
//!
//! Document references, persisted cache records, and ranked search hits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::domain::errors::{RetrievalError, RetrievalResult};

/// Opaque identifier of a source document, usually a filesystem path.
///
/// Used verbatim as the cache key: two spellings of the same file are two
/// distinct references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentRef(String);

impl DocumentRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// File name without directory or extension, `"document"` if there is none.
    pub fn file_stem(&self) -> String {
        self.as_path()
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("document")
            .to_string()
    }

    /// Lowercased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.as_path()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DocumentRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Persisted chunks and vectors for one document.
///
/// Never mutated in place: a rebuild writes a whole new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Reference the record was built from (`pdf_path` in older files)
    #[serde(alias = "pdf_path")]
    pub document_reference: DocumentRef,

    /// Chunks in document order
    pub chunks: Vec<String>,

    /// One vector per chunk, index-aligned with `chunks`
    pub embeddings: Vec<Vec<f32>>,

    /// Embedding model identifier
    pub model: String,

    /// Vector length; inferred from the first vector when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CacheRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        document_reference: DocumentRef,
        chunks: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        model: impl Into<String>,
        dimension: usize,
    ) -> Self {
        Self {
            document_reference,
            chunks,
            embeddings,
            model: model.into(),
            dimension: Some(dimension),
            chunk_size: None,
            overlap: None,
            created_at: Some(Utc::now()),
        }
    }

    /// Record the chunking policy that produced the chunks.
    pub fn with_chunking(mut self, chunk_size: usize, overlap: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self.overlap = Some(overlap);
        self
    }

    /// Declared dimension, or the length of the first vector for older records.
    pub fn effective_dimension(&self) -> Option<usize> {
        self.dimension
            .or_else(|| self.embeddings.first().map(Vec::len))
    }

    /// Check the chunk/embedding alignment, vector lengths, and that every
    /// component is finite.
    ///
    /// A failing record is never truncated to the shorter side; the caller
    /// must rebuild it from source.
    pub fn validate(&self) -> RetrievalResult<()> {
        if self.chunks.len() != self.embeddings.len() {
            return Err(RetrievalError::corruption(
                self.document_reference.as_str(),
                format!(
                    "{} chunks but {} embeddings",
                    self.chunks.len(),
                    self.embeddings.len()
                ),
            ));
        }

        if let Some(dimension) = self.effective_dimension() {
            if let Some((index, vector)) = self
                .embeddings
                .iter()
                .enumerate()
                .find(|(_, v)| v.len() != dimension)
            {
                return Err(RetrievalError::corruption(
                    self.document_reference.as_str(),
                    format!(
                        "embedding {} has {} dimensions, expected {}",
                        index,
                        vector.len(),
                        dimension
                    ),
                ));
            }
        }

        if let Some(index) = self
            .embeddings
            .iter()
            .position(|v| v.iter().any(|x| !x.is_finite()))
        {
            return Err(RetrievalError::corruption(
                self.document_reference.as_str(),
                format!("embedding {index} has a non-finite component"),
            ));
        }

        Ok(())
    }
}

/// A chunk returned by similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// Position of the chunk in the document
    pub index: usize,

    /// Chunk text
    pub text: String,

    /// Cosine similarity to the query, in [-1, 1]
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(chunks: usize, vectors: &[usize]) -> CacheRecord {
        CacheRecord::new(
            DocumentRef::new("docs/manual.pdf"),
            (0..chunks).map(|i| format!("chunk {i}")).collect(),
            vectors.iter().map(|len| vec![0.5; *len]).collect(),
            "text-embedding-3-small",
            3,
        )
    }

    #[test]
    fn test_document_ref_stem_and_extension() {
        let doc = DocumentRef::new("/tmp/reports/Annual Report.PDF");
        assert_eq!(doc.file_stem(), "Annual Report");
        assert_eq!(doc.extension().as_deref(), Some("pdf"));

        let bare = DocumentRef::new("");
        assert_eq!(bare.file_stem(), "document");
        assert_eq!(bare.extension(), None);
    }

    #[test]
    fn test_valid_record() {
        assert!(record(2, &[3, 3]).validate().is_ok());
        assert!(record(0, &[]).validate().is_ok());
    }

    #[test]
    fn test_misaligned_record_is_corrupt() {
        let err = record(3, &[3, 3]).validate().unwrap_err();
        assert!(matches!(err, RetrievalError::CacheCorruption { .. }));
    }

    #[test]
    fn test_wrong_dimension_is_corrupt() {
        let err = record(2, &[3, 4]).validate().unwrap_err();
        assert!(matches!(err, RetrievalError::CacheCorruption { .. }));
    }

    #[test]
    fn test_non_finite_component_is_corrupt() {
        let mut with_nan = record(2, &[3, 3]);
        with_nan.embeddings[1][2] = f32::NAN;
        assert!(matches!(
            with_nan.validate(),
            Err(RetrievalError::CacheCorruption { .. })
        ));

        let json = r#"{
            "document_reference": "big.pdf",
            "chunks": ["a", "b"],
            "embeddings": [[0.5, 0.0], [1e39, 0.0]],
            "model": "text-embedding-3-small"
        }"#;
        let overflowed: CacheRecord = serde_json::from_str(json).unwrap();
        assert!(overflowed.embeddings[1][0].is_infinite());
        assert!(matches!(
            overflowed.validate(),
            Err(RetrievalError::CacheCorruption { .. })
        ));
    }

    #[test]
    fn test_legacy_record_deserializes() {
        let json = r#"{
            "pdf_path": "resume.pdf",
            "chunks": ["a", "b"],
            "embeddings": [[1.0, 0.0], [0.0, 1.0]],
            "model": "text-embedding-3-small"
        }"#;

        let record: CacheRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.document_reference.as_str(), "resume.pdf");
        assert_eq!(record.dimension, None);
        assert_eq!(record.effective_dimension(), Some(2));
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_record_serializes_document_reference_key() {
        let value = serde_json::to_value(record(1, &[3])).unwrap();
        assert_eq!(value["document_reference"], "docs/manual.pdf");
        assert_eq!(value["dimension"], 3);
        assert!(value.get("pdf_path").is_none());
    }
}
