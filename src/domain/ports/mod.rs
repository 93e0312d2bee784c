//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that adapters must implement:
//! - TextExtractor: turns a source document into flat text
//! - EmbeddingProvider: converts batches of text into vectors
//! - CompletionProvider: generates an answer from a prompt
//! - EmbeddingStore: persists cache records per document
//!
//! These traits keep the retrieval services independent of specific
//! HTTP APIs, file formats, and storage backends.

pub mod completion;
pub mod embedding;
pub mod embedding_store;
pub mod text_extractor;

pub use completion::{CompletionProvider, CompletionRequest};
pub use embedding::EmbeddingProvider;
pub use embedding_store::EmbeddingStore;
pub use text_extractor::TextExtractor;
