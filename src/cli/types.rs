//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{answer::AnswerArgs, process::ProcessArgs, search::SearchArgs};

#[derive(Parser, Debug)]
#[command(name = "docqa")]
#[command(about = "docqa - question answering over a single document", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .docqa/config.yaml and .docqa/local.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract, chunk, and embed a document, reusing cached embeddings
    Process(ProcessArgs),

    /// Show the chunks most similar to a query
    Search(SearchArgs),

    /// Answer a question from a document's most relevant chunks
    Answer(AnswerArgs),
}
