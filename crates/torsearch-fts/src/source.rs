//! Content source adapters.
//!
//! Each adapter pulls records of one content kind from a [`ContentStore`]
//! and turns them into [`IndexDocument`]s. Adapters differ only in the kind
//! they filter on, their random sample size, the link template, and the
//! `catid`/`type` values they assign:
//!
//! | Adapter | Kind | Random | Link | catid |
//! |---------|------|--------|------|-------|
//! | [`PostSource`] | `1` (posts) | 10 | `/post/{uid}` | `sid1` |
//! | [`WikiSource`] | `1` (wiki) | 10 | `/wiki/{title}` | `sid1` |
//! | [`PageSource`] | `2` (wiki) | 4 | `/page/{uid}` | `sid1` |
//! | [`CategorySource`] | code | 10 | `/{router_post[kind]}/{uid}` | `sid{code}` |
//!
//! The recent sample is always the two most recently updated records.

use torsearch_core::Result;

use crate::content_store::{ContentRecord, ContentStore};
use crate::document::IndexDocument;
use crate::normalize::searchable_text;
use crate::types::{IndexConfig, POST_KIND};

/// Random sample size for posts, wiki entries and categorized records.
pub const RANDOM_LIMIT: usize = 10;
/// Random sample size for static pages.
pub const PAGE_RANDOM_LIMIT: usize = 4;
/// Recent sample size for every adapter.
pub const RECENT_LIMIT: usize = 2;

/// `catid` shared by posts, wiki entries and pages.
pub const SITE_CATID: &str = "sid1";

/// Wiki-store kind of wiki entries.
const WIKI_KIND: &str = "1";
/// Wiki-store kind of static pages.
const PAGE_KIND: &str = "2";

/// How an adapter samples its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleMode {
    /// Unordered sample, adapter-specific size.
    Random,
    /// The most recently updated records, newest first.
    Recent,
}

impl SampleMode {
    /// Passes of a full run, in order.
    pub const PASSES: [SampleMode; 2] = [SampleMode::Random, SampleMode::Recent];
}

impl std::fmt::Display for SampleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleMode::Random => f.write_str("random"),
            SampleMode::Recent => f.write_str("recent"),
        }
    }
}

/// A producer of index documents for one content kind.
pub trait ContentSource {
    /// Name for logs and stats.
    fn name(&self) -> String;

    /// Fetch candidate records.
    fn fetch(&self, mode: SampleMode) -> Result<Vec<ContentRecord>>;

    /// Convert a fetched record into a document.
    fn to_document(&self, record: &ContentRecord) -> Result<IndexDocument>;

    /// Fetch and convert in one step.
    ///
    /// An empty store contributes no documents; that is not an error.
    fn documents(&self, mode: SampleMode) -> Result<Vec<IndexDocument>> {
        self.fetch(mode)?
            .iter()
            .map(|record| self.to_document(record))
            .collect()
    }
}

fn sample(
    store: &dyn ContentStore,
    kind: &str,
    mode: SampleMode,
    random_limit: usize,
) -> Result<Vec<ContentRecord>> {
    let (mut records, limit) = match mode {
        SampleMode::Random => (store.query_random(kind, random_limit)?, random_limit),
        SampleMode::Recent => (store.query_recent(kind, RECENT_LIMIT)?, RECENT_LIMIT),
    };
    records.truncate(limit);
    Ok(records)
}

fn document(
    record: &ContentRecord,
    catid: impl Into<String>,
    doc_type: &str,
    link: String,
) -> IndexDocument {
    IndexDocument::builder()
        .catid(catid)
        .title(&record.title)
        .doc_type(doc_type)
        .link(link)
        .content(searchable_text(&record.title, &record.cnt_html))
        .build()
}

/// Blog posts.
pub struct PostSource<'a> {
    store: &'a dyn ContentStore,
    config: &'a IndexConfig,
}

impl<'a> PostSource<'a> {
    /// Create a post adapter over the post store.
    pub fn new(store: &'a dyn ContentStore, config: &'a IndexConfig) -> Self {
        Self { store, config }
    }
}

impl ContentSource for PostSource<'_> {
    fn name(&self) -> String {
        "post".to_string()
    }

    fn fetch(&self, mode: SampleMode) -> Result<Vec<ContentRecord>> {
        sample(self.store, POST_KIND, mode, RANDOM_LIMIT)
    }

    fn to_document(&self, record: &ContentRecord) -> Result<IndexDocument> {
        let doc_type = self.config.type_label(POST_KIND)?;
        Ok(document(
            record,
            SITE_CATID,
            doc_type,
            format!("/post/{}", record.uid),
        ))
    }
}

/// Wiki entries, linked by title.
pub struct WikiSource<'a> {
    store: &'a dyn ContentStore,
    config: &'a IndexConfig,
}

impl<'a> WikiSource<'a> {
    /// Create a wiki adapter over the wiki store.
    pub fn new(store: &'a dyn ContentStore, config: &'a IndexConfig) -> Self {
        Self { store, config }
    }
}

impl ContentSource for WikiSource<'_> {
    fn name(&self) -> String {
        "wiki".to_string()
    }

    fn fetch(&self, mode: SampleMode) -> Result<Vec<ContentRecord>> {
        sample(self.store, WIKI_KIND, mode, RANDOM_LIMIT)
    }

    fn to_document(&self, record: &ContentRecord) -> Result<IndexDocument> {
        let doc_type = self.config.type_label(POST_KIND)?;
        Ok(document(
            record,
            SITE_CATID,
            doc_type,
            format!("/wiki/{}", record.title),
        ))
    }
}

/// Static pages, stored alongside wiki entries.
pub struct PageSource<'a> {
    store: &'a dyn ContentStore,
    config: &'a IndexConfig,
}

impl<'a> PageSource<'a> {
    /// Create a page adapter over the wiki store.
    pub fn new(store: &'a dyn ContentStore, config: &'a IndexConfig) -> Self {
        Self { store, config }
    }
}

impl ContentSource for PageSource<'_> {
    fn name(&self) -> String {
        "page".to_string()
    }

    fn fetch(&self, mode: SampleMode) -> Result<Vec<ContentRecord>> {
        sample(self.store, PAGE_KIND, mode, PAGE_RANDOM_LIMIT)
    }

    fn to_document(&self, record: &ContentRecord) -> Result<IndexDocument> {
        let doc_type = self.config.type_label(POST_KIND)?;
        Ok(document(
            record,
            SITE_CATID,
            doc_type,
            format!("/page/{}", record.uid),
        ))
    }
}

/// Categorized application records of one configured kind code.
///
/// Route and type label are looked up by the record's own kind; a missing
/// entry fails the conversion.
pub struct CategorySource<'a> {
    store: &'a dyn ContentStore,
    config: &'a IndexConfig,
    code: &'a str,
}

impl<'a> CategorySource<'a> {
    /// Create an adapter for category `code` over the post store.
    pub fn new(store: &'a dyn ContentStore, config: &'a IndexConfig, code: &'a str) -> Self {
        Self {
            store,
            config,
            code,
        }
    }

    /// `catid` assigned to this category's documents.
    ///
    /// Code `"1"` yields `sid1`, the same value posts use.
    pub fn catid(&self) -> String {
        format!("sid{}", self.code)
    }
}

impl ContentSource for CategorySource<'_> {
    fn name(&self) -> String {
        format!("category:{}", self.code)
    }

    fn fetch(&self, mode: SampleMode) -> Result<Vec<ContentRecord>> {
        sample(self.store, self.code, mode, RANDOM_LIMIT)
    }

    fn to_document(&self, record: &ContentRecord) -> Result<IndexDocument> {
        let doc_type = self.config.type_label(&record.kind)?;
        let route = self.config.route(&record.kind)?;
        Ok(document(
            record,
            self.catid(),
            doc_type,
            format!("/{route}/{}", record.uid),
        ))
    }
}

/// Every adapter of a run, in sweep order: post, wiki, page, then one
/// category adapter per `kind_arr` entry.
pub fn run_sources<'a>(
    config: &'a IndexConfig,
    posts: &'a dyn ContentStore,
    wiki: &'a dyn ContentStore,
) -> Vec<Box<dyn ContentSource + 'a>> {
    let mut sources: Vec<Box<dyn ContentSource + 'a>> = vec![
        Box::new(PostSource::new(posts, config)),
        Box::new(WikiSource::new(wiki, config)),
        Box::new(PageSource::new(wiki, config)),
    ];
    for code in &config.kind_arr {
        sources.push(Box::new(CategorySource::new(posts, config, code)));
    }
    sources
}

// ============================================================================
// Tests
// ============================================================================
