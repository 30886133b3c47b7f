//! Torsearch CLI
//!
//! Builds and queries the full-text index of a TorCMS site.

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use torsearch_cli::{Cli, Command, commands, config};
use torsearch_fts::SearchParams;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::load_config(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command() {
        Command::Index { index_path } => {
            let stats = commands::cmd_index(&config, index_path.as_deref())
                .context("Indexing run failed")?;
            tracing::info!(
                staged = stats.documents_staged,
                created = stats.store_created,
                analyzer = %stats.analyzer,
                "Index committed"
            );
        }
        Command::Search {
            query,
            catid,
            limit,
            json,
        } => {
            let params = SearchParams {
                query,
                limit: Some(limit),
                catid,
            };
            let results = commands::cmd_search(&config, &params).context("Search failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", commands::format_results(&results));
            }
        }
        Command::Config => {
            print!("{}", config::render_config(&config)?);
        }
    }

    Ok(())
}
