//! Error types for torsearch.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for torsearch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or reading a search index.
///
/// All variants are fatal for the current indexing run: the batch is never
/// committed once one of these surfaces.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a specific path.
    #[error("I/O error on {path}: {source}")]
    IoWithPath {
        /// Path being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing or malformed configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The path exists but does not hold a usable index store.
    #[error("Invalid index store at {path}: {message}")]
    InvalidStore {
        /// Store location
        path: PathBuf,
        /// What is wrong with it
        message: String,
    },

    /// Another writer already holds the store lock.
    #[error("Index writer is locked: {0}")]
    WriterLocked(String),

    /// Index engine operation failed.
    #[error("Operation failed: {0}")]
    Operation(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Create an invalid-store error.
    pub fn invalid_store(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Error::InvalidStore {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a generic operation error.
    pub fn operation(message: impl Into<String>) -> Self {
        Error::Operation(message.into())
    }

    /// Returns true for errors caused by configuration rather than data or I/O.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
