//! Infrastructure adapters for external systems.

pub mod completion;
pub mod embeddings;
pub mod extractors;
pub mod storage;
