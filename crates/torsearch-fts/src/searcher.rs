//! Read side of the index.
//!
//! `IndexSearcher` runs BM25 queries against a committed store. Queries go
//! through the store's own analyzer, so a query typed against a CJK store is
//! segmented the same way the documents were.
//!
//! Free-text queries have stopwords removed before parsing; see
//! [`crate::stopwords`].
//!
//! The reader reloads manually: a searcher sees the commits that existed
//! when it was opened, plus any picked up by [`IndexSearcher::reload`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tantivy::collector::{Count, TopDocs};
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::IndexRecordOption;
use tantivy::{IndexReader, TantivyDocument, Term};
use torsearch_core::{Error, Result};

use crate::document::IndexDocument;
use crate::stopwords::StopwordFilter;
use crate::store::IndexStore;

/// Results returned when `SearchParams::limit` is unset.
pub const DEFAULT_LIMIT: usize = 10;

/// Parameters for a search request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    /// Query string in Tantivy query syntax.
    pub query: String,

    /// Maximum results to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Only match documents with this exact category id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catid: Option<String>,
}

impl SearchParams {
    /// Search for `query` with default options.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Link of the matched document.
    pub link: String,
    /// Document title.
    pub title: String,
    /// Category id.
    pub catid: String,
    /// Rendered type label.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// BM25 score, higher is better.
    pub score: f32,
}

/// Collection of search hits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// Hits, best first.
    pub items: Vec<SearchHit>,
    /// Total number of matching documents (may exceed `items.len()`).
    pub total: usize,
}

/// Query interface over an index store.
pub struct IndexSearcher {
    store: IndexStore,
    reader: IndexReader,
    query_parser: QueryParser,
    stopwords: StopwordFilter,
}

impl IndexSearcher {
    /// Open a searcher over the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStore` if no index exists at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_store(IndexStore::open(path)?)
    }

    /// Wrap an already open store.
    pub fn from_store(store: IndexStore) -> Result<Self> {
        let reader = store.reader()?;
        let schema = store.schema();

        let fields = schema.default_search_fields();
        let mut query_parser =
            QueryParser::for_index(store.index(), fields.iter().map(|(f, _)| *f).collect());
        for (field, boost) in fields {
            query_parser.set_field_boost(field, boost);
        }

        Ok(Self {
            store,
            reader,
            query_parser,
            stopwords: StopwordFilter::english(),
        })
    }

    /// Run a query.
    ///
    /// A blank query matches nothing.
    ///
    /// # Errors
    ///
    /// Returns `Error::Operation` if the query cannot be parsed or executed.
    pub fn search(&self, params: &SearchParams) -> Result<SearchResults> {
        if params.query.trim().is_empty() {
            return Ok(SearchResults::default());
        }

        let query = self.build_query(params)?;
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
        let searcher = self.reader.searcher();

        let (top_docs, total) = searcher
            .search(&*query, &(TopDocs::with_limit(limit).order_by_score(), Count))
            .map_err(|e| Error::operation(format!("Search failed: {e}")))?;

        let schema = self.store.schema();
        let mut items = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(address)
                .map_err(|e| Error::operation(format!("Failed to load document: {e}")))?;
            let doc = IndexDocument::from_tantivy(&doc, schema);
            items.push(SearchHit {
                link: doc.link,
                title: doc.title,
                catid: doc.catid,
                doc_type: doc.doc_type,
                score,
            });
        }

        log::debug!("'{}': {} of {total} hits", params.query, items.len());
        Ok(SearchResults { items, total })
    }

    /// Fetch the document stored under `link`.
    pub fn get_by_link(&self, link: &str) -> Result<Option<IndexDocument>> {
        let schema = self.store.schema();
        let query = TermQuery::new(
            Term::from_field_text(schema.link, link),
            IndexRecordOption::Basic,
        );
        let searcher = self.reader.searcher();
        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(1).order_by_score())
            .map_err(|e| Error::operation(format!("Lookup failed: {e}")))?;

        match top_docs.first() {
            Some((_, address)) => {
                let doc: TantivyDocument = searcher
                    .doc(*address)
                    .map_err(|e| Error::operation(format!("Failed to load document: {e}")))?;
                Ok(Some(IndexDocument::from_tantivy(&doc, schema)))
            }
            None => Ok(None),
        }
    }

    /// Number of committed documents visible to this searcher.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Pick up commits made since the searcher was opened.
    pub fn reload(&self) -> Result<()> {
        self.reader
            .reload()
            .map_err(|e| Error::operation(format!("Failed to reload index reader: {e}")))
    }

    /// Underlying store.
    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    fn build_query(&self, params: &SearchParams) -> Result<Box<dyn Query>> {
        let query = self.stopwords.filter(&params.query);
        let parsed = self
            .query_parser
            .parse_query(&query)
            .map_err(|e| Error::operation(format!("Invalid query '{}': {e}", params.query)))?;

        let Some(catid) = &params.catid else {
            return Ok(parsed);
        };

        let filter = TermQuery::new(
            Term::from_field_text(self.store.schema().catid, catid),
            IndexRecordOption::Basic,
        );
        Ok(Box::new(BooleanQuery::new(vec![
            (Occur::Must, parsed),
            (Occur::Must, Box::new(filter) as Box<dyn Query>),
        ])))
    }
}

impl std::fmt::Debug for IndexSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexSearcher")
            .field("store", &self.store)
            .field("num_docs", &self.num_docs())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
