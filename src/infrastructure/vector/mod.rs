//! Vector infrastructure components
//!
//! Provides text chunking and brute-force similarity ranking for
//! semantic search (RAG).

pub mod chunker;
pub mod similarity;

pub use chunker::Chunker;
pub use similarity::{cosine_similarity, rank_top_k};
