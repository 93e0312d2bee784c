//! docqa - document-grounded question answering
//!
//! Extracts a document's text, splits it into overlapping character windows,
//! embeds each window, and caches the result on disk. Queries are embedded
//! with the same model and ranked against the cached vectors by cosine
//! similarity; the best chunks ground a generated answer.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors, and port traits
//! - **Adapters** (`adapters`): OpenAI providers, text extractors, JSON file store
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging, chunking, similarity
//! - **Service Layer** (`services`): embedder, document index, registry, retrieval facade
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use docqa::{ConfigLoader, DocumentRef, RetrievalTool};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let tool = RetrievalTool::from_config(&config)?;
//!     let answer = tool
//!         .answer(&DocumentRef::new("manual.pdf"), "How do I reset it?", 3)
//!         .await?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{CacheRecord, ChunkingConfig, Config, DocumentRef, ScoredChunk};
pub use domain::ports::{CompletionProvider, EmbeddingProvider, EmbeddingStore, TextExtractor};
pub use domain::{RetrievalError, RetrievalResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::vector::Chunker;
pub use services::{
    format_search_results, DocumentIndex, Embedder, EngineRegistry, EvictionPolicy, IndexSource,
    Indexer, RetrievalTool,
};
