//! Per-document index: build or adopt a cache record, then search it.
//!
//! [`Indexer`] owns the extract → chunk → embed → save pipeline and the
//! cache-hit path. [`DocumentIndex`] is the loaded, immutable result that
//! answers similarity queries.

use std::sync::Arc;

use crate::domain::errors::{RetrievalError, RetrievalResult};
use crate::domain::models::{CacheRecord, DocumentRef, ScoredChunk};
use crate::domain::ports::{EmbeddingStore, TextExtractor};
use crate::infrastructure::vector::{rank_top_k, Chunker};
use crate::services::embedder::Embedder;

/// Where a [`DocumentIndex`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexSource {
    /// Adopted from a persisted record
    Cache,
    /// Extracted, chunked, and embedded by this process
    Built,
}

/// Chunks and vectors of one document, held in memory for searching.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentIndex {
    document: DocumentRef,
    chunks: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    model: String,
    dimension: usize,
    source: IndexSource,
}

impl DocumentIndex {
    /// Build an index from a record.
    ///
    /// The record should already have passed [`CacheRecord::validate`];
    /// `fallback_dimension` is used when the record does not declare one and
    /// has no vectors.
    pub fn from_record(record: CacheRecord, fallback_dimension: usize) -> Self {
        let dimension = record.effective_dimension().unwrap_or(fallback_dimension);
        Self {
            document: record.document_reference,
            chunks: record.chunks,
            embeddings: record.embeddings,
            model: record.model,
            dimension,
            source: IndexSource::Cache,
        }
    }

    pub fn document(&self) -> &DocumentRef {
        &self.document
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    pub const fn source(&self) -> IndexSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Embed `query` and return the `top_k` most similar chunks.
    ///
    /// Returns `min(top_k, len())` hits, highest score first, equal scores in
    /// document order.
    #[tracing::instrument(skip(self, embedder, query), fields(document = %self.document))]
    pub async fn search(
        &self,
        embedder: &Embedder,
        query: &str,
        top_k: usize,
    ) -> RetrievalResult<Vec<ScoredChunk>> {
        if top_k == 0 {
            return Err(RetrievalError::Configuration(
                "top_k must be at least 1".to_string(),
            ));
        }
        if self.is_empty() {
            return Err(RetrievalError::NoDocumentLoaded(self.document.to_string()));
        }
        if embedder.model() != self.model {
            return Err(RetrievalError::Configuration(format!(
                "query model {} does not match model {} used for {}",
                embedder.model(),
                self.model,
                self.document
            )));
        }

        let query_vector = embedder.embed_query(query).await?;
        let hits = self.rank(&query_vector, top_k)?;

        tracing::info!(results = hits.len(), "search complete");
        Ok(hits)
    }

    /// Rank the stored chunks against an already-embedded query.
    pub fn rank(&self, query_vector: &[f32], top_k: usize) -> RetrievalResult<Vec<ScoredChunk>> {
        if query_vector.len() != self.dimension {
            return Err(RetrievalError::Configuration(format!(
                "query vector has {} dimensions, {} was indexed with {}",
                query_vector.len(),
                self.document,
                self.dimension
            )));
        }

        Ok(rank_top_k(query_vector, &self.embeddings, top_k)
            .into_iter()
            .map(|(index, score)| ScoredChunk {
                index,
                text: self.chunks[index].clone(),
                score,
            })
            .collect())
    }
}

/// Builds [`DocumentIndex`]es, reusing persisted records when they are valid.
pub struct Indexer {
    extractor: Arc<dyn TextExtractor>,
    store: Arc<dyn EmbeddingStore>,
    chunker: Chunker,
    embedder: Arc<Embedder>,
}

impl Indexer {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        store: Arc<dyn EmbeddingStore>,
        chunker: Chunker,
        embedder: Arc<Embedder>,
    ) -> Self {
        Self {
            extractor,
            store,
            chunker,
            embedder,
        }
    }

    pub fn embedder(&self) -> &Embedder {
        &self.embedder
    }

    pub const fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Load `document` from the cache, or build and save it.
    ///
    /// With `force_recreate` false a valid cached record is adopted without
    /// touching the extractor or embedding provider. A corrupt record, or one
    /// built with a different model or dimension, is rebuilt from source once.
    /// Nothing is saved unless every chunk was embedded.
    #[tracing::instrument(skip_all, fields(document = %document, force_recreate = force_recreate))]
    pub async fn process(
        &self,
        document: &DocumentRef,
        force_recreate: bool,
    ) -> RetrievalResult<DocumentIndex> {
        if !force_recreate {
            match self.load_cached(document).await {
                Ok(Some(index)) => {
                    tracing::info!(chunks = index.len(), "loaded embeddings from cache");
                    return Ok(index);
                }
                Ok(None) => {}
                Err(RetrievalError::CacheCorruption { reason, .. }) => {
                    tracing::warn!(%reason, "cached embeddings are corrupt, rebuilding");
                }
                Err(e) => return Err(e),
            }
        }

        self.build(document).await
    }

    /// Cached index for `document`, or `None` when it has to be rebuilt.
    async fn load_cached(&self, document: &DocumentRef) -> RetrievalResult<Option<DocumentIndex>> {
        let Some(record) = self.store.load(document).await? else {
            tracing::info!("no cached embeddings");
            return Ok(None);
        };

        record.validate()?;

        if record.model != self.embedder.model() {
            tracing::warn!(
                cached_model = %record.model,
                model = %self.embedder.model(),
                "cached embeddings use another model, rebuilding"
            );
            return Ok(None);
        }

        if let Some(dimension) = record.effective_dimension() {
            if dimension != self.embedder.dimension() {
                tracing::warn!(
                    cached_dimension = dimension,
                    dimension = self.embedder.dimension(),
                    "cached embeddings have another dimension, rebuilding"
                );
                return Ok(None);
            }
        }

        let chunking = self.chunker.config();
        if record.chunk_size.is_some_and(|size| size != chunking.chunk_size)
            || record.overlap.is_some_and(|overlap| overlap != chunking.overlap)
        {
            tracing::warn!(
                cached_chunk_size = ?record.chunk_size,
                cached_overlap = ?record.overlap,
                chunk_size = chunking.chunk_size,
                overlap = chunking.overlap,
                "cached chunks use another chunking policy, force a rebuild to apply it"
            );
        }

        Ok(Some(DocumentIndex::from_record(
            record,
            self.embedder.dimension(),
        )))
    }

    async fn build(&self, document: &DocumentRef) -> RetrievalResult<DocumentIndex> {
        let text = self.extractor.extract(document).await?;
        let chunks = self.chunker.chunk(&text);
        let embeddings = self.embedder.embed_all(&chunks).await?;

        let config = self.chunker.config();
        let record = CacheRecord::new(
            document.clone(),
            chunks,
            embeddings,
            self.embedder.model(),
            self.embedder.dimension(),
        )
        .with_chunking(config.chunk_size, config.overlap);
        record.validate()?;

        self.store.save(&record).await?;

        tracing::info!(chunks = record.chunks.len(), "processed document");
        let mut index = DocumentIndex::from_record(record, self.embedder.dimension());
        index.source = IndexSource::Built;
        Ok(index)
    }
}
