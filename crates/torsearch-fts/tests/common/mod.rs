//! Common fixtures for integration tests.

use std::path::Path;

use tempfile::TempDir;
use torsearch_fts::{ContentRecord, IndexConfig, MemoryContentStore};

/// Temporary site with its own index directory.
pub struct TestSite {
    /// Keeps the directory alive for the test's duration.
    pub dir: TempDir,
    /// Configuration pointing into `dir`.
    pub config: IndexConfig,
}

impl TestSite {
    /// English site, so results do not depend on CJK segmentation.
    pub fn new() -> Self {
        Self::with_lang("en")
    }

    /// Site with the given language.
    pub fn with_lang(lang: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = IndexConfig {
            lang: lang.to_string(),
            index_path: dir.path().join("database").join("whoosh"),
            ..Default::default()
        };
        Self { dir, config }
    }

    /// Directory of the index store.
    pub fn index_path(&self) -> &Path {
        &self.config.index_path
    }
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

/// Content record with the given fields and update time.
pub fn record(uid: &str, kind: &str, title: &str, cnt_html: &str, time_update: i64) -> ContentRecord {
    ContentRecord {
        uid: uid.to_string(),
        title: title.to_string(),
        cnt_html: cnt_html.to_string(),
        kind: kind.to_string(),
        time_update,
    }
}

/// Store over the given records.
pub fn store(records: Vec<ContentRecord>) -> MemoryContentStore {
    MemoryContentStore::new(records)
}
