//! Batch upsert writer.
//!
//! `Indexer` wraps Tantivy's `IndexWriter`. Documents are upserted by their
//! `link`: staging a document first deletes every document carrying the same
//! link term, whether committed by an earlier run or staged earlier in this
//! batch, then adds the new one.
//!
//! Nothing staged is visible to readers until [`Indexer::commit`] returns.
//! Commit consumes the indexer, so one writer serves exactly one batch.
//!
//! # Usage
//!
//! ```rust,ignore
//! let store = open_or_create(&index_path, &schema)?.into_store();
//! let mut indexer = store.writer()?;
//!
//! indexer.update_document(&doc)?;
//! indexer.commit()?;
//! ```

use tantivy::{IndexWriter, Term};
use torsearch_core::{Error, Result};

use crate::document::IndexDocument;
use crate::schema::IndexSchema;

/// Single-use batch writer for one indexing run.
pub struct Indexer {
    writer: IndexWriter,
    schema: IndexSchema,
    staged: usize,
}

impl Indexer {
    pub(crate) fn new(writer: IndexWriter, schema: IndexSchema) -> Self {
        Self {
            writer,
            schema,
            staged: 0,
        }
    }

    /// Stage an insert-or-replace keyed by `doc.link`.
    ///
    /// The new document fully replaces any previous one with the same link;
    /// fields are never merged.
    pub fn update_document(&mut self, doc: &IndexDocument) -> Result<()> {
        let key = Term::from_field_text(self.schema.link, &doc.link);
        self.writer.delete_term(key);
        self.writer
            .add_document(doc.to_tantivy(&self.schema))
            .map_err(|e| Error::operation(format!("Failed to stage {}: {e}", doc.link)))?;
        self.staged += 1;
        Ok(())
    }

    /// Number of upserts staged so far.
    pub fn staged(&self) -> usize {
        self.staged
    }

    /// Get the schema.
    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    /// Atomically publish every staged upsert, then release the writer.
    ///
    /// Returns the commit opstamp.
    pub fn commit(mut self) -> Result<u64> {
        let opstamp = self
            .writer
            .commit()
            .map_err(|e| Error::operation(format!("Failed to commit index: {e}")))?;
        self.writer
            .wait_merging_threads()
            .map_err(|e| Error::operation(format!("Failed to finish merges: {e}")))?;
        log::debug!("Committed {} staged documents (opstamp {opstamp})", self.staged);
        Ok(opstamp)
    }

    /// Discard every staged upsert and release the writer.
    ///
    /// Dropping an uncommitted indexer has the same effect on the store.
    pub fn abort(mut self) -> Result<()> {
        self.writer
            .rollback()
            .map_err(|e| Error::operation(format!("Failed to roll back index: {e}")))?;
        log::debug!("Discarded {} staged documents", self.staged);
        Ok(())
    }
}

impl std::fmt::Debug for Indexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Indexer")
            .field("staged", &self.staged)
            .field("schema", &self.schema)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
