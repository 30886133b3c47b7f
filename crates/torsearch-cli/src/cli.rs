//! Argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Torsearch - full-text indexing for TorCMS sites
#[derive(Parser, Debug)]
#[command(name = "torsearch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "TORSEARCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run (defaults to `index`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sample content and upsert it into the index
    Index {
        /// Override the configured index directory
        #[arg(long)]
        index_path: Option<PathBuf>,
    },

    /// Query the index
    Search {
        /// Query string
        query: String,

        /// Only match this category id (e.g. sid9)
        #[arg(long)]
        catid: Option<String>,

        /// Maximum results
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved configuration as TOML
    Config,
}

impl Cli {
    /// Command to run, `index` when none was given.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Index { index_path: None })
    }
}

// ============================================================================
// Tests
// ============================================================================
