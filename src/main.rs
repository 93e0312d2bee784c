//! docqa CLI entry point.

use anyhow::Result;
use clap::Parser;

use docqa::cli::{handle_error, Cli, Commands};
use docqa::domain::models::Config;
use docqa::infrastructure::config::ConfigLoader;
use docqa::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(&err, json_mode);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config: Config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    match cli.command {
        Commands::Process(args) => {
            docqa::cli::commands::process::execute(args, &config, cli.json).await
        }
        Commands::Search(args) => {
            docqa::cli::commands::search::execute(args, &config, cli.json).await
        }
        Commands::Answer(args) => {
            docqa::cli::commands::answer::execute(args, &config, cli.json).await
        }
    }
}
