//! Text extraction port.

use async_trait::async_trait;

use crate::domain::errors::RetrievalResult;
use crate::domain::models::DocumentRef;

/// Turns a source document into one string of all page texts in order.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the text of `document`.
    ///
    /// Unreadable, corrupt, or unsupported sources yield
    /// [`RetrievalError::Extraction`](crate::domain::errors::RetrievalError::Extraction).
    async fn extract(&self, document: &DocumentRef) -> RetrievalResult<String>;
}
