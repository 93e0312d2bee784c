//! Batched embedding of chunks and queries.

use std::sync::Arc;

use crate::domain::errors::{RetrievalError, RetrievalResult};
use crate::domain::ports::EmbeddingProvider;

/// Default number of texts per provider call.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Embeds ordered texts through an [`EmbeddingProvider`] in fixed-size batches.
///
/// Batch boundaries never change the output: batch N's vectors are appended
/// after batch N-1's. The first failing batch aborts the whole call, so a
/// caller never sees fewer vectors than texts.
pub struct Embedder {
    provider: Arc<dyn EmbeddingProvider>,
    batch_size: usize,
}

impl Embedder {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, batch_size: usize) -> RetrievalResult<Self> {
        if batch_size == 0 {
            return Err(RetrievalError::Configuration(
                "embedding batch_size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            provider,
            batch_size,
        })
    }

    pub fn with_defaults(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Provider name for diagnostics.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Model identifier stored with every record built by this embedder.
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    pub fn dimension(&self) -> usize {
        self.provider.dimension()
    }

    /// Effective batch size, capped by what the provider accepts per call.
    pub fn batch_size(&self) -> usize {
        self.batch_size.min(self.provider.max_batch_size().max(1))
    }

    /// Embed every text, preserving order.
    pub async fn embed_all(&self, texts: &[String]) -> RetrievalResult<Vec<Vec<f32>>> {
        let total = texts.len();
        let batch_size = self.batch_size();
        let mut embeddings = Vec::with_capacity(total);

        for (batch, items) in texts.chunks(batch_size).enumerate() {
            let vectors = self.provider.embed_batch(items).await?;
            if vectors.len() != items.len() {
                return Err(RetrievalError::EmbeddingService(format!(
                    "provider {} returned {} vectors for a batch of {}",
                    self.provider.name(),
                    vectors.len(),
                    items.len()
                )));
            }
            embeddings.extend(vectors);

            tracing::debug!(
                batch,
                processed = embeddings.len(),
                total,
                "embedded batch"
            );
        }

        Ok(embeddings)
    }

    /// Embed a single query string.
    pub async fn embed_query(&self, query: &str) -> RetrievalResult<Vec<f32>> {
        let mut vectors = self.provider.embed_batch(&[query.to_string()]).await?;
        match (vectors.pop(), vectors.is_empty()) {
            (Some(vector), true) => Ok(vector),
            _ => Err(RetrievalError::EmbeddingService(format!(
                "provider {} did not return exactly one vector for the query",
                self.provider.name()
            ))),
        }
    }
}
