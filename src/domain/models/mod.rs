pub mod chunking;
pub mod config;
pub mod embedding;

pub use chunking::ChunkingConfig;
pub use config::{
    CacheConfig, CompletionConfig, Config, EmbeddingConfig, LoggingConfig, RetrievalConfig,
};
pub use embedding::{CacheRecord, DocumentRef, ScoredChunk};
