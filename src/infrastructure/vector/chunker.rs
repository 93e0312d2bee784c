//! Text chunking service implementation
//!
//! Splits text into fixed-size overlapping windows measured in characters
//! (Unicode scalar values), so a window never cuts a UTF-8 sequence.

use crate::domain::errors::RetrievalResult;
use crate::domain::models::ChunkingConfig;

/// Fixed-window text chunker
///
/// Starting at offset 0, emits `text[start..start + chunk_size]` and advances
/// by `chunk_size - overlap` while `start` is inside the text. The last chunk
/// may be shorter than `chunk_size`; nothing is padded or trimmed.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    /// Create a new chunker, rejecting configurations that cannot make progress
    pub fn new(config: ChunkingConfig) -> RetrievalResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub const fn config(&self) -> ChunkingConfig {
        self.config
    }

    /// Chunk text into ordered, overlapping windows
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every char boundary, including the end of the text.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        let stride = self.config.stride();
        let mut chunks = Vec::with_capacity(char_count.div_ceil(stride));
        let mut start = 0;

        while start < char_count {
            let end = (start + self.config.chunk_size).min(char_count);
            chunks.push(text[boundaries[start]..boundaries[end]].to_string());
            start += stride;
        }

        tracing::debug!(
            chunk_size = self.config.chunk_size,
            overlap = self.config.overlap,
            characters = char_count,
            chunks = chunks.len(),
            "chunked text"
        );

        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            config: ChunkingConfig::default(),
        }
    }
}
