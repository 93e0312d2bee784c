//! Common test utilities for integration tests
//!
//! Call-counting fakes for the extractor, embedding, and completion ports,
//! plus builders that wire them into an `Indexer` or `RetrievalTool` backed
//! by a temporary JSON store.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use docqa::adapters::storage::JsonFileStore;
use docqa::domain::models::{ChunkingConfig, DocumentRef};
use docqa::domain::ports::{
    CompletionProvider, CompletionRequest, EmbeddingProvider, TextExtractor,
};
use docqa::{
    Chunker, Embedder, EngineRegistry, EvictionPolicy, Indexer, RetrievalError, RetrievalResult,
    RetrievalTool,
};

pub const DIMENSION: usize = 8;
pub const MODEL: &str = "fake-embedding-model";

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Returns the same text for every document and counts calls.
pub struct CountingExtractor {
    text: String,
    calls: AtomicUsize,
}

impl CountingExtractor {
    pub fn new(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            text: text.into(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for CountingExtractor {
    async fn extract(&self, _document: &DocumentRef) -> RetrievalResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

/// Deterministic bag-of-characters embeddings.
///
/// Each character adds 1.0 to slot `code_point % DIMENSION`, so texts with
/// similar letters score close together and identical texts score 1.0.
pub struct FakeEmbeddingProvider {
    model: String,
    batch_calls: AtomicUsize,
    texts_embedded: AtomicUsize,
    fail_on_batch: Option<usize>,
}

impl FakeEmbeddingProvider {
    pub fn new() -> Arc<Self> {
        Self::with_model(MODEL)
    }

    pub fn with_model(model: &str) -> Arc<Self> {
        Arc::new(Self {
            model: model.to_string(),
            batch_calls: AtomicUsize::new(0),
            texts_embedded: AtomicUsize::new(0),
            fail_on_batch: None,
        })
    }

    /// Fails the `n`th batch call (0-based) with an embedding service error.
    pub fn failing_on_batch(n: usize) -> Arc<Self> {
        Arc::new(Self {
            model: MODEL.to_string(),
            batch_calls: AtomicUsize::new(0),
            texts_embedded: AtomicUsize::new(0),
            fail_on_batch: Some(n),
        })
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn texts_embedded(&self) -> usize {
        self.texts_embedded.load(Ordering::SeqCst)
    }

    pub fn vector_for(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; DIMENSION];
        for c in text.chars() {
            vector[c as usize % DIMENSION] += 1.0;
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for FakeEmbeddingProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }

    fn max_batch_size(&self) -> usize {
        2048
    }

    async fn embed_batch(&self, texts: &[String]) -> RetrievalResult<Vec<Vec<f32>>> {
        let call = self.batch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_batch == Some(call) {
            return Err(RetrievalError::EmbeddingService(
                "429 quota exceeded".to_string(),
            ));
        }
        self.texts_embedded.fetch_add(texts.len(), Ordering::SeqCst);
        Ok(texts.iter().map(|t| Self::vector_for(t)).collect())
    }
}

/// Completion fake that records requests and returns a scripted result.
pub struct ScriptedCompletion {
    result: RetrievalResult<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn answering(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(answer.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(RetrievalError::Generation(reason.to_string())),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedCompletion {
    fn model(&self) -> &str {
        "fake-chat-model"
    }

    async fn complete(&self, request: &CompletionRequest) -> RetrievalResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.result.clone()
    }
}

/// Indexer over a JSON store in `dir`.
pub fn indexer(
    dir: &TempDir,
    extractor: Arc<CountingExtractor>,
    provider: Arc<FakeEmbeddingProvider>,
    chunking: ChunkingConfig,
) -> Indexer {
    Indexer::new(
        extractor,
        Arc::new(JsonFileStore::new(dir.path())),
        Chunker::new(chunking).unwrap(),
        Arc::new(Embedder::new(provider, 100).unwrap()),
    )
}

/// Retrieval tool with an unbounded registry.
pub fn tool(
    dir: &TempDir,
    extractor: Arc<CountingExtractor>,
    provider: Arc<FakeEmbeddingProvider>,
    completion: Arc<ScriptedCompletion>,
    chunking: ChunkingConfig,
) -> RetrievalTool {
    RetrievalTool::new(
        Arc::new(indexer(dir, extractor, provider, chunking)),
        completion,
        EngineRegistry::new(EvictionPolicy::None),
        0.7,
    )
}
