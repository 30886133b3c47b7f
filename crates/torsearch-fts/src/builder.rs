//! Indexing run orchestration.
//!
//! `IndexBuilder` performs one full run:
//!
//! 1. Choose the analyzer from `IndexConfig::lang` and build the schema
//! 2. Open the store at `index_path`, or create it with that schema
//! 3. Acquire the store's writer
//! 4. Random pass, then recent pass, each over post, wiki, page and every
//!    configured category, staging every document
//! 5. Commit once
//!
//! Any error before step 5 drops the writer uncommitted, so a failed run
//! publishes nothing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use torsearch_fts::{IndexBuilder, IndexConfig, MemoryContentStore};
//!
//! let config = IndexConfig::default();
//! let posts = MemoryContentStore::from_json_file(&config.posts_path)?;
//! let wiki = MemoryContentStore::from_json_file(&config.wiki_path)?;
//!
//! let stats = IndexBuilder::new(&config, &posts, &wiki).build()?;
//! println!("Indexed {} documents", stats.documents_staged);
//! ```

use torsearch_core::Result;

use crate::analyzer::AnalyzerKind;
use crate::content_store::ContentStore;
use crate::schema::IndexSchema;
use crate::source::{SampleMode, run_sources};
use crate::store::{IndexStore, open_or_create};
use crate::types::{IndexConfig, POST_KIND};

/// Statistics about an indexing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStats {
    /// Upserts staged and committed (same-link repeats counted each time).
    pub documents_staged: usize,
    /// Upserts staged by the random pass.
    pub random_pass: usize,
    /// Upserts staged by the recent pass.
    pub recent_pass: usize,
    /// Adapter invocations across both passes.
    pub sources_visited: usize,
    /// Analyzer in effect for the store.
    pub analyzer: AnalyzerKind,
    /// Whether this run created the store.
    pub store_created: bool,
    /// Commit opstamp.
    pub opstamp: u64,
}

/// Runs the two-pass indexing job.
pub struct IndexBuilder<'a> {
    config: &'a IndexConfig,
    posts: &'a dyn ContentStore,
    wiki: &'a dyn ContentStore,
}

impl<'a> IndexBuilder<'a> {
    /// Create a builder over the post store and the wiki/page store.
    pub fn new(
        config: &'a IndexConfig,
        posts: &'a dyn ContentStore,
        wiki: &'a dyn ContentStore,
    ) -> Self {
        Self {
            config,
            posts,
            wiki,
        }
    }

    /// Open or create the store at `config.index_path` and run the job.
    pub fn build(&self) -> Result<IndexStats> {
        let requested = IndexSchema::build(self.config.analyzer());
        let opened = open_or_create(&self.config.index_path, &requested)?;
        let store_created = opened.is_created();
        let store = opened.into_store();

        let mut stats = self.build_into(&store)?;
        stats.store_created = store_created;
        Ok(stats)
    }

    /// Run the job against an already open store.
    pub fn build_into(&self, store: &IndexStore) -> Result<IndexStats> {
        log::info!(
            "Indexing into {} (analyzer {})",
            store
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<memory>".to_string()),
            store.schema().analyzer()
        );

        // Posts, wiki and pages all render the post label; a config without
        // it is rejected before anything is fetched.
        self.config.type_label(POST_KIND)?;

        let sources = run_sources(self.config, self.posts, self.wiki);
        let mut indexer = store.writer()?;
        let mut random_pass = 0;
        let mut recent_pass = 0;
        let mut sources_visited = 0;

        for mode in SampleMode::PASSES {
            for source in &sources {
                let docs = source.documents(mode)?;
                log::debug!("{} ({mode}): {} documents", source.name(), docs.len());
                for doc in &docs {
                    indexer.update_document(doc)?;
                }
                match mode {
                    SampleMode::Random => random_pass += docs.len(),
                    SampleMode::Recent => recent_pass += docs.len(),
                }
                sources_visited += 1;
            }
        }

        let documents_staged = indexer.staged();
        let opstamp = indexer.commit()?;

        log::info!(
            "Indexed {documents_staged} documents ({random_pass} random, {recent_pass} recent)"
        );

        Ok(IndexStats {
            documents_staged,
            random_pass,
            recent_pass,
            sources_visited,
            analyzer: store.schema().analyzer(),
            store_created: false,
            opstamp,
        })
    }
}

impl std::fmt::Debug for IndexBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexBuilder")
            .field("index_path", &self.config.index_path)
            .field("kind_arr", &self.config.kind_arr)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
