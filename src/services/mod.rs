//! Retrieval services.
//!
//! - `embedder`: batched embedding through an [`EmbeddingProvider`](crate::domain::ports::EmbeddingProvider)
//! - `document_index`: cache-aware indexing and similarity search per document
//! - `engine_registry`: explicit table of loaded indexes with an eviction policy
//! - `retrieval_tool`: the facade exposed to callers

pub mod document_index;
pub mod embedder;
pub mod engine_registry;
pub mod retrieval_tool;

pub use document_index::{DocumentIndex, IndexSource, Indexer};
pub use embedder::Embedder;
pub use engine_registry::{EngineRegistry, EvictionPolicy};
pub use retrieval_tool::{format_search_results, RetrievalTool};
