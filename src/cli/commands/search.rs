//! `docqa search`: ranked chunks for a query.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::{format_hits_table, output, CommandOutput};
use crate::domain::models::{Config, DocumentRef, ScoredChunk};
use crate::services::format_search_results;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Path to the document
    pub document: String,

    /// Search query
    pub query: String,

    /// Number of results (defaults to retrieval.top_k)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Print results in the markdown form handed to agents
    #[arg(long)]
    pub agent_format: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct SearchOutput {
    pub document: String,
    pub query: String,
    pub results: Vec<ScoredChunk>,
    #[serde(skip)]
    pub agent_format: bool,
}

impl CommandOutput for SearchOutput {
    fn to_human(&self) -> String {
        if self.results.is_empty() {
            return "No results.".to_string();
        }
        if self.agent_format {
            return format_search_results(&self.results);
        }
        format!(
            "Top {} result(s) for \"{}\" in {}:\n{}",
            self.results.len(),
            self.query,
            self.document,
            format_hits_table(&self.results)
        )
    }
}

pub async fn execute(args: SearchArgs, config: &Config, json_mode: bool) -> Result<()> {
    let tool = super::build_tool(config, None, None)?;
    let document = DocumentRef::new(args.document);
    let top_k = args.top_k.unwrap_or(config.retrieval.top_k);

    let results = tool
        .search_content(&document, &args.query, top_k)
        .await
        .with_context(|| format!("Search failed for {document}"))?;

    let out = SearchOutput {
        document: document.to_string(),
        query: args.query,
        results,
        agent_format: args.agent_format,
    };
    output(&out, json_mode);
    Ok(())
}
