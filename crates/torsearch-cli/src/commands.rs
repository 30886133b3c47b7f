//! Command handlers.

use std::path::Path;

use torsearch_core::Result;
use torsearch_fts::{
    IndexBuilder, IndexConfig, IndexSearcher, IndexStats, MemoryContentStore, SearchParams,
    SearchResults,
};

/// Run one indexing job from the configured content snapshots.
///
/// `index_path` overrides `config.index_path`.
pub fn cmd_index(config: &IndexConfig, index_path: Option<&Path>) -> Result<IndexStats> {
    let mut config = config.clone();
    if let Some(path) = index_path {
        config.index_path = path.to_path_buf();
    }

    let posts = MemoryContentStore::from_json_file(&config.posts_path)?;
    let wiki = MemoryContentStore::from_json_file(&config.wiki_path)?;
    log::info!(
        "Loaded {} post records and {} wiki records",
        posts.len(),
        wiki.len()
    );

    IndexBuilder::new(&config, &posts, &wiki).build()
}

/// Query the index at `config.index_path`.
pub fn cmd_search(config: &IndexConfig, params: &SearchParams) -> Result<SearchResults> {
    let searcher = IndexSearcher::open(&config.index_path)?;
    searcher.search(params)
}

/// Render search results as plain text, one hit per line.
pub fn format_results(results: &SearchResults) -> String {
    let mut out = String::new();
    for hit in &results.items {
        out.push_str(&format!("{:>8.3}  {}  {}\n", hit.score, hit.link, hit.title));
    }
    out.push_str(&format!(
        "{} of {} matches\n",
        results.items.len(),
        results.total
    ));
    out
}

// ============================================================================
// Tests
// ============================================================================
