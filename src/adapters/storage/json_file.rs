//! JSON file implementation of [`EmbeddingStore`].
//!
//! One pretty-printed file per document at
//! `<directory>/<file_stem>_embeddings.json`. Saves write a sibling temp file
//! and rename it over the target, so readers never observe a half-written
//! record and an aborted save leaves the previous record in place.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::errors::{RetrievalError, RetrievalResult};
use crate::domain::models::{CacheRecord, DocumentRef};
use crate::domain::ports::EmbeddingStore;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Directory of JSON cache records.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    directory: PathBuf,
}

impl JsonFileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the record for `document`.
    ///
    /// Documents sharing a file stem share a path; `load` tells them apart by
    /// the reference stored inside the record.
    pub fn record_path(&self, document: &DocumentRef) -> PathBuf {
        self.directory
            .join(format!("{}_embeddings.json", document.file_stem()))
    }

    fn temp_path(&self, target: &Path) -> PathBuf {
        let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        target.with_file_name(format!(".{name}.{}.{n}.tmp", std::process::id()))
    }
}

#[async_trait]
impl EmbeddingStore for JsonFileStore {
    async fn load(&self, document: &DocumentRef) -> RetrievalResult<Option<CacheRecord>> {
        let path = self.record_path(document);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RetrievalError::Storage(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }
        };

        let record: CacheRecord = serde_json::from_slice(&bytes)
            .map_err(|e| RetrievalError::corruption(document.as_str(), e.to_string()))?;

        if record.document_reference != *document {
            tracing::debug!(
                path = %path.display(),
                stored = %record.document_reference,
                requested = %document,
                "cache file belongs to another document"
            );
            return Ok(None);
        }

        Ok(Some(record))
    }

    async fn save(&self, record: &CacheRecord) -> RetrievalResult<()> {
        tokio::fs::create_dir_all(&self.directory).await.map_err(|e| {
            RetrievalError::Storage(format!(
                "failed to create cache directory {}: {e}",
                self.directory.display()
            ))
        })?;

        let path = self.record_path(&record.document_reference);
        let temp = self.temp_path(&path);
        let json = serde_json::to_vec_pretty(record)?;

        if let Err(e) = tokio::fs::write(&temp, &json).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(RetrievalError::Storage(format!(
                "failed to write {}: {e}",
                temp.display()
            )));
        }

        if let Err(e) = tokio::fs::rename(&temp, &path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(RetrievalError::Storage(format!(
                "failed to move record into {}: {e}",
                path.display()
            )));
        }

        tracing::info!(
            document = %record.document_reference,
            chunks = record.chunks.len(),
            path = %path.display(),
            "saved embeddings"
        );
        Ok(())
    }
}
