//! Content records and the storage collaborator that supplies them.
//!
//! The indexer never writes content; it only asks a [`ContentStore`] for a
//! random sample or the most recent records of a kind. The relational store
//! behind a real deployment implements the trait; [`MemoryContentStore`]
//! serves tests and the CLI from a JSON snapshot.

use std::path::Path;

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use torsearch_core::{Error, Result};

/// One content record as exposed by the storage layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Unique identifier, used to build links.
    pub uid: String,
    /// Display title.
    pub title: String,
    /// Raw HTML body, possibly entity-escaped.
    pub cnt_html: String,
    /// Kind discriminator.
    pub kind: String,
    /// Last update time, Unix seconds.
    #[serde(default)]
    pub time_update: i64,
}

/// Read-only query surface of a content store.
pub trait ContentStore: Send + Sync {
    /// Unordered sample of at most `limit` records of `kind`.
    fn query_random(&self, kind: &str, limit: usize) -> Result<Vec<ContentRecord>>;

    /// At most `limit` records of `kind`, most recently updated first.
    fn query_recent(&self, kind: &str, limit: usize) -> Result<Vec<ContentRecord>>;
}

/// In-memory content store.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    records: Vec<ContentRecord>,
}

impl MemoryContentStore {
    /// Create a store over the given records.
    pub fn new(records: Vec<ContentRecord>) -> Self {
        Self { records }
    }

    /// Load a JSON array of records.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let records: Vec<ContentRecord> = serde_json::from_str(&raw)?;
        log::debug!("Loaded {} records from {}", records.len(), path.display());
        Ok(Self::new(records))
    }

    /// Add a record.
    pub fn push(&mut self, record: ContentRecord) {
        self.records.push(record);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a ContentRecord> + 'a {
        self.records.iter().filter(move |r| r.kind == kind)
    }
}

impl ContentStore for MemoryContentStore {
    fn query_random(&self, kind: &str, limit: usize) -> Result<Vec<ContentRecord>> {
        let candidates: Vec<&ContentRecord> = self.of_kind(kind).collect();
        Ok(candidates
            .choose_multiple(&mut rand::rng(), limit)
            .map(|r| (*r).clone())
            .collect())
    }

    fn query_recent(&self, kind: &str, limit: usize) -> Result<Vec<ContentRecord>> {
        let mut candidates: Vec<&ContentRecord> = self.of_kind(kind).collect();
        candidates.sort_by(|a, b| b.time_update.cmp(&a.time_update));
        Ok(candidates.into_iter().take(limit).cloned().collect())
    }
}

// ============================================================================
// Tests
// ============================================================================
