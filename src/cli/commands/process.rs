//! `docqa process`: build or load a document's embeddings.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, DocumentRef};
use crate::services::{DocumentIndex, IndexSource};

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Path to the document (pdf, txt, md)
    pub document: String,

    /// Rebuild embeddings even if a cached record exists
    #[arg(short, long)]
    pub force: bool,

    /// Characters per chunk (overrides configuration; a cached record keeps
    /// its own chunking unless --force is given)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Characters shared by consecutive chunks (overrides configuration; a
    /// cached record keeps its own chunking unless --force is given)
    #[arg(long)]
    pub overlap: Option<usize>,
}

#[derive(Debug, serde::Serialize)]
pub struct ProcessOutput {
    pub document: String,
    pub chunks: usize,
    pub model: String,
    pub dimension: usize,
    pub source: IndexSource,
}

impl From<&DocumentIndex> for ProcessOutput {
    fn from(index: &DocumentIndex) -> Self {
        Self {
            document: index.document().to_string(),
            chunks: index.len(),
            model: index.model().to_string(),
            dimension: index.dimension(),
            source: index.source(),
        }
    }
}

impl CommandOutput for ProcessOutput {
    fn to_human(&self) -> String {
        let action = match self.source {
            IndexSource::Built => "Built",
            IndexSource::Cache => "Loaded from cache",
        };
        format!(
            "{action}: {}\n  chunks:    {}\n  model:     {}\n  dimension: {}",
            self.document, self.chunks, self.model, self.dimension
        )
    }
}

pub async fn execute(args: ProcessArgs, config: &Config, json_mode: bool) -> Result<()> {
    let tool = super::build_tool(config, args.chunk_size, args.overlap)?;
    let document = DocumentRef::new(args.document);

    let index = tool
        .process(&document, args.force)
        .await
        .with_context(|| format!("Failed to process {document}"))?;

    output(&ProcessOutput::from(index.as_ref()), json_mode);
    Ok(())
}
