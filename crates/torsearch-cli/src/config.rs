//! Configuration file loading.
//!
//! Resolution order:
//!
//! 1. `--config <path>` (or `TORSEARCH_CONFIG`); the file must exist
//! 2. `torsearch.toml` in the working directory, if present
//! 3. Built-in defaults
//!
//! Every key is optional; missing keys take their defaults.

use std::path::{Path, PathBuf};

use torsearch_core::{Error, Result};
use torsearch_fts::IndexConfig;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "torsearch.toml";

/// Path of the config file that will be loaded, if any.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.exists().then_some(local)
        }
    }
}

/// Load the run configuration.
///
/// # Errors
///
/// Returns `Error::IoWithPath` if an explicit file cannot be read and
/// `Error::Config` if the file is not valid TOML for `IndexConfig`.
pub fn load_config(explicit: Option<&Path>) -> Result<IndexConfig> {
    let Some(path) = resolve_config_path(explicit) else {
        log::debug!("No config file, using defaults");
        return Ok(IndexConfig::default());
    };

    let raw = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let config = parse_config(&raw)
        .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Parse a TOML document into an `IndexConfig`.
pub fn parse_config(raw: &str) -> Result<IndexConfig> {
    toml::from_str(raw).map_err(|e| Error::config(e.to_string()))
}

/// Render a configuration as TOML.
pub fn render_config(config: &IndexConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| Error::config(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
