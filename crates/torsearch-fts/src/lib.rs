//! Full-text search indexing for TorCMS sites.
//!
//! This crate samples posts, wiki entries, pages and category records from a
//! content store, normalizes them into search documents, and upserts them into
//! a Tantivy index keyed by link. A run commits once, so readers see either
//! the whole run or none of it.
//!
//! # Features
//!
//! - `cjk` (default): Chinese word segmentation via jieba for `lang = "zh"`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      torsearch-fts                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ContentStore trait (query_random / query_recent)           │
//! │  └── MemoryContentStore (JSON snapshot)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ContentSource adapters                                     │
//! │  ├── PostSource, WikiSource, PageSource                     │
//! │  └── CategorySource (one per configured kind)               │
//! │  normalize (HTML entities + markup to plain text)           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  IndexSchema + analyzer (jieba or English stemming)         │
//! │  IndexStore (open_or_create) -> Indexer (upsert, commit)    │
//! │  IndexBuilder (two-pass run orchestration)                  │
//! │  IndexSearcher (BM25 read path) + StopwordFilter            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Schema
//!
//! | Field | Type | Purpose |
//! |-------|------|---------|
//! | `title` | TEXT | Full-text, boosted 2.0x |
//! | `catid` | STRING | Exact category filter |
//! | `type` | TEXT | Rendered type label |
//! | `link` | STRING | Unique key for upserts |
//! | `content` | TEXT | Title plus body text |
//!
//! Every field is stored.
//!
//! # Example
//!
//! ```rust,ignore
//! use torsearch_fts::{IndexBuilder, IndexConfig, IndexSearcher, MemoryContentStore, SearchParams};
//!
//! let config = IndexConfig::default();
//! let posts = MemoryContentStore::from_json_file(&config.posts_path)?;
//! let wiki = MemoryContentStore::from_json_file(&config.wiki_path)?;
//! IndexBuilder::new(&config, &posts, &wiki).build()?;
//!
//! let searcher = IndexSearcher::open(&config.index_path)?;
//! for hit in searcher.search(&SearchParams::new("hello"))?.items {
//!     println!("{} {}", hit.link, hit.title);
//! }
//! ```

pub mod analyzer;
pub mod builder;
pub mod content_store;
pub mod document;
pub mod indexer;
pub mod normalize;
pub mod schema;
pub mod searcher;
pub mod source;
pub mod stopwords;
pub mod store;
pub mod types;

// Re-exports
pub use analyzer::{AnalyzerKind, make_analyzer};
pub use builder::{IndexBuilder, IndexStats};
pub use content_store::{ContentRecord, ContentStore, MemoryContentStore};
pub use document::IndexDocument;
pub use indexer::Indexer;
pub use schema::IndexSchema;
pub use searcher::{IndexSearcher, SearchHit, SearchParams, SearchResults};
pub use source::{ContentSource, SampleMode};
pub use stopwords::StopwordFilter;
pub use store::{IndexStore, OpenedStore, open_or_create};
pub use types::IndexConfig;
