//! # torsearch-cli
//!
//! Command-line front end for torsearch.
//!
//! - `torsearch` / `torsearch index`: run one indexing job
//! - `torsearch search <QUERY>`: query the committed index
//! - `torsearch config`: print the resolved configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command};
