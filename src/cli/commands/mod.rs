//! CLI command implementations.

pub mod answer;
pub mod process;
pub mod search;

use anyhow::{Context, Result};

use crate::domain::models::{ChunkingConfig, Config};
use crate::services::RetrievalTool;

/// Build the retrieval tool for a command, applying chunking overrides.
pub(crate) fn build_tool(
    config: &Config,
    chunk_size: Option<usize>,
    overlap: Option<usize>,
) -> Result<RetrievalTool> {
    let chunking = ChunkingConfig::new(
        chunk_size.unwrap_or(config.chunking.chunk_size),
        overlap.unwrap_or(config.chunking.overlap),
    );
    chunking.validate().context("Invalid chunking options")?;

    RetrievalTool::from_config_with_chunking(config, chunking)
        .context("Failed to initialize retrieval tool")
}
