//! Text chunking domain models
//!
//! Fixed-size character windows with overlap between consecutive chunks.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{RetrievalError, RetrievalResult};

/// Configuration for document chunking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChunkingConfig {
    /// Size of each chunk in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

const fn default_chunk_size() -> usize {
    500
}

const fn default_overlap() -> usize {
    50
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
        }
    }
}

impl ChunkingConfig {
    /// Create a configuration with explicit window and overlap sizes.
    pub const fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Distance between the starts of two consecutive chunks.
    ///
    /// Only meaningful after [`validate`](Self::validate) has passed.
    pub const fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// Validate the chunking configuration
    ///
    /// `overlap >= chunk_size` would make the window stand still or move
    /// backwards, so it is rejected before any text is touched.
    pub fn validate(&self) -> RetrievalResult<()> {
        if self.chunk_size == 0 {
            return Err(RetrievalError::Configuration(
                "chunk_size must be greater than 0".to_string(),
            ));
        }

        if self.overlap >= self.chunk_size {
            return Err(RetrievalError::Configuration(format!(
                "overlap ({}) must be less than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }

        Ok(())
    }
}
