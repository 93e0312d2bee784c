use async_trait::async_trait;

use crate::domain::errors::RetrievalResult;
use crate::domain::models::{CacheRecord, DocumentRef};

/// Repository interface for persisted embedding cache records
///
/// One record per distinct document reference. Records are replaced whole,
/// never patched.
#[async_trait]
pub trait EmbeddingStore: Send + Sync {
    /// Load the record for exactly this reference
    ///
    /// # Returns
    /// * `Ok(Some(record))` - A record exists; it has not been validated yet
    /// * `Ok(None)` - Cache miss (not an error)
    /// * `Err(CacheCorruption)` - The record exists but cannot be decoded
    /// * `Err(Storage)` - The record exists but cannot be read
    async fn load(&self, document: &DocumentRef) -> RetrievalResult<Option<CacheRecord>>;

    /// Persist a record, overwriting any previous one for the same reference
    async fn save(&self, record: &CacheRecord) -> RetrievalResult<()>;
}
