//! `docqa answer`: generate an answer grounded in a document.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, DocumentRef};

#[derive(Args, Debug)]
pub struct AnswerArgs {
    /// Path to the document
    pub document: String,

    /// Question to answer
    pub query: String,

    /// Number of context chunks (defaults to retrieval.top_k)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

#[derive(Debug, serde::Serialize)]
pub struct AnswerOutput {
    pub document: String,
    pub query: String,
    pub answer: String,
}

impl CommandOutput for AnswerOutput {
    fn to_human(&self) -> String {
        self.answer.clone()
    }
}

pub async fn execute(args: AnswerArgs, config: &Config, json_mode: bool) -> Result<()> {
    let tool = super::build_tool(config, None, None)?;
    let document = DocumentRef::new(args.document);
    let top_k = args.top_k.unwrap_or(config.retrieval.top_k);

    let answer = tool
        .answer(&document, &args.query, top_k)
        .await
        .with_context(|| format!("Failed to answer from {document}"))?;

    output(
        &AnswerOutput {
            document: document.to_string(),
            query: args.query,
            answer,
        },
        json_mode,
    );
    Ok(())
}
