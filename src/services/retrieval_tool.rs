//! Agent-facing retrieval facade.
//!
//! Composes the indexer, an engine registry, and a completion provider into
//! the three operations exposed to callers: `process`, `search_content`, and
//! `answer`.

use std::sync::Arc;

use crate::adapters::completion::{OpenAiCompletionConfig, OpenAiCompletionProvider};
use crate::adapters::embeddings::{OpenAiEmbeddingConfig, OpenAiEmbeddingProvider};
use crate::adapters::extractors::ExtensionExtractor;
use crate::adapters::storage::JsonFileStore;
use crate::domain::errors::{RetrievalError, RetrievalResult};
use crate::domain::models::{ChunkingConfig, Config, DocumentRef, ScoredChunk};
use crate::domain::ports::{CompletionProvider, CompletionRequest};
use crate::infrastructure::vector::Chunker;
use crate::services::document_index::{DocumentIndex, Indexer};
use crate::services::embedder::Embedder;
use crate::services::engine_registry::{EngineRegistry, EvictionPolicy};

/// System instruction sent with every answer request.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that answers questions based on provided context.";

/// Characters of each chunk shown by [`format_search_results`].
const PREVIEW_CHARS: usize = 300;

/// Retrieval facade over one embedding model and one completion model.
pub struct RetrievalTool {
    indexer: Arc<Indexer>,
    completion: Arc<dyn CompletionProvider>,
    registry: EngineRegistry,
    temperature: f32,
}

impl RetrievalTool {
    pub fn new(
        indexer: Arc<Indexer>,
        completion: Arc<dyn CompletionProvider>,
        registry: EngineRegistry,
        temperature: f32,
    ) -> Self {
        Self {
            indexer,
            completion,
            registry,
            temperature,
        }
    }

    /// Wire the OpenAI providers, extension-based extractor, and JSON file
    /// store described by `config`.
    pub fn from_config(config: &Config) -> RetrievalResult<Self> {
        Self::from_config_with_chunking(config, config.chunking)
    }

    /// Same as [`from_config`](Self::from_config) with a chunking override.
    pub fn from_config_with_chunking(
        config: &Config,
        chunking: ChunkingConfig,
    ) -> RetrievalResult<Self> {
        let provider = OpenAiEmbeddingProvider::new(OpenAiEmbeddingConfig::from(&config.embedding))?;
        let embedder = Embedder::new(Arc::new(provider), config.embedding.batch_size)?;
        let completion =
            OpenAiCompletionProvider::new(OpenAiCompletionConfig::from(&config.completion))?;

        let indexer = Indexer::new(
            Arc::new(ExtensionExtractor::default()),
            Arc::new(JsonFileStore::new(&config.cache.directory)),
            Chunker::new(chunking)?,
            Arc::new(embedder),
        );

        Ok(Self::new(
            Arc::new(indexer),
            Arc::new(completion),
            EngineRegistry::new(EvictionPolicy::from_capacity(
                config.retrieval.registry_capacity,
            )),
            config.completion.temperature,
        ))
    }

    pub const fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    /// Load or build the index for `document`.
    ///
    /// Without `force_recreate` an index already in the registry is returned
    /// as-is. With it, the document is rebuilt from source and the new index
    /// replaces the registered one.
    pub async fn process(
        &self,
        document: &DocumentRef,
        force_recreate: bool,
    ) -> RetrievalResult<Arc<DocumentIndex>> {
        if force_recreate {
            let index = Arc::new(self.indexer.process(document, true).await?);
            self.registry.insert(index.clone()).await;
            return Ok(index);
        }

        self.registry
            .get_or_init(document, self.indexer.process(document, false))
            .await
    }

    /// Ranked chunks of `document` most similar to `query`.
    pub async fn search_content(
        &self,
        document: &DocumentRef,
        query: &str,
        top_k: usize,
    ) -> RetrievalResult<Vec<ScoredChunk>> {
        let index = self.process(document, false).await?;
        index.search(self.indexer.embedder(), query, top_k).await
    }

    /// Answer `query` from the `top_k` best chunks of `document`.
    ///
    /// Retrieval errors are returned unchanged; completion failures surface
    /// as [`RetrievalError::Generation`] and never produce a fallback answer.
    #[tracing::instrument(skip_all, fields(document = %document, top_k = top_k))]
    pub async fn answer(
        &self,
        document: &DocumentRef,
        query: &str,
        top_k: usize,
    ) -> RetrievalResult<String> {
        let hits = self.search_content(document, query, top_k).await?;

        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            prompt: answer_prompt(&build_context(&hits), query),
            temperature: self.temperature,
        };

        tracing::info!(
            model = %self.completion.model(),
            context_chunks = hits.len(),
            "generating answer"
        );

        self.completion
            .complete(&request)
            .await
            .map_err(|e| match e {
                RetrievalError::Generation(_) => e,
                other => RetrievalError::Generation(other.to_string()),
            })
    }
}

/// Join hits into labeled context blocks in rank order.
pub fn build_context(hits: &[ScoredChunk]) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| format!("Context {}:\n{}", i + 1, hit.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// User prompt asking for an answer grounded only in `context`.
pub fn answer_prompt(context: &str, query: &str) -> String {
    format!(
        "Based on the following context from a PDF document, answer the question.\n\
         If the answer is not in the context, say so.\n\n\
         Context:\n{context}\n\n\
         Question: {query}\n\n\
         Answer:"
    )
}

/// Render hits for an agent: numbered, scored, and previewed.
pub fn format_search_results(hits: &[ScoredChunk]) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            let preview: String = hit.text.chars().take(PREVIEW_CHARS).collect();
            format!("**Result {}** (Score: {:.3})\n{preview}...", i + 1, hit.score)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
