//! Index store lifecycle.
//!
//! [`open_or_create`] is called at the start of every indexing run. It opens
//! the store at `path` when one exists and bootstraps a new one otherwise:
//!
//! | On disk | Result |
//! |---------|--------|
//! | `path/meta.json` present | `Opened`, with the schema read from disk |
//! | nothing, or an empty directory | `Created`, with the requested schema |
//! | a file, or a non-empty directory without `meta.json` | `Error::InvalidStore` |
//!
//! An opened store keeps the schema (and therefore the analyzer) it was
//! created with; the requested schema is ignored apart from a warning when
//! its analyzer differs.

use std::path::{Path, PathBuf};

use tantivy::{Index, IndexReader, ReloadPolicy, TantivyError};
use torsearch_core::{Error, Result};

use crate::analyzer::{self, AnalyzerKind};
use crate::indexer::Indexer;
use crate::schema::IndexSchema;

/// Index metadata file written by Tantivy on creation.
const META_FILE: &str = "meta.json";

/// Index writer buffer size (50MB).
const WRITER_BUFFER_SIZE: usize = 50_000_000;

/// An open index with its schema.
pub struct IndexStore {
    index: Index,
    schema: IndexSchema,
    path: Option<PathBuf>,
}

/// Outcome of [`open_or_create`].
///
/// Callers must take the schema from the store, not assume the one they
/// requested is in effect.
#[derive(Debug)]
pub enum OpenedStore {
    /// An existing store was opened; its on-disk schema is in effect.
    Opened(IndexStore),
    /// A new store was created with the requested schema.
    Created(IndexStore),
}

impl OpenedStore {
    /// Whether the store was created by this call.
    pub fn is_created(&self) -> bool {
        matches!(self, OpenedStore::Created(_))
    }

    /// Borrow the store.
    pub fn store(&self) -> &IndexStore {
        match self {
            OpenedStore::Opened(store) | OpenedStore::Created(store) => store,
        }
    }

    /// Take the store.
    pub fn into_store(self) -> IndexStore {
        match self {
            OpenedStore::Opened(store) | OpenedStore::Created(store) => store,
        }
    }
}

/// Open the store at `path`, or create it with `schema` if none exists.
///
/// Idempotent: calling it again on the same path opens what the first call
/// created.
///
/// # Errors
///
/// Returns `Error::InvalidStore` if the path holds something other than an
/// index, or if the index on disk cannot be opened.
pub fn open_or_create(path: &Path, schema: &IndexSchema) -> Result<OpenedStore> {
    if path.join(META_FILE).exists() {
        let store = IndexStore::open(path)?;
        if store.schema.analyzer() != schema.analyzer() {
            log::warn!(
                "Index at {} uses analyzer {}, ignoring requested {}; rebuild the store to change it",
                path.display(),
                store.schema.analyzer(),
                schema.analyzer()
            );
        }
        return Ok(OpenedStore::Opened(store));
    }

    if path.exists() {
        if !path.is_dir() {
            return Err(Error::invalid_store(path, "path is not a directory"));
        }
        let mut entries = std::fs::read_dir(path).map_err(|e| Error::io_with_path(e, path))?;
        if entries.next().is_some() {
            return Err(Error::invalid_store(
                path,
                format!("directory is not empty and has no {META_FILE}"),
            ));
        }
    } else {
        std::fs::create_dir_all(path).map_err(|e| Error::io_with_path(e, path))?;
    }

    log::info!(
        "Creating index at {} with analyzer {}",
        path.display(),
        schema.analyzer()
    );
    let index = Index::create_in_dir(path, schema.schema().clone())
        .map_err(|e| Error::operation(format!("Failed to create index: {e}")))?;
    analyzer::register_analyzers(&index);

    Ok(OpenedStore::Created(IndexStore {
        index,
        schema: schema.clone(),
        path: Some(path.to_path_buf()),
    }))
}

impl IndexStore {
    /// Open an existing store.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStore` if no readable index with the expected
    /// fields exists at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let index = Index::open_in_dir(path).map_err(|e| Error::invalid_store(path, e.to_string()))?;
        let schema = IndexSchema::from_schema(&index.schema())
            .map_err(|e| Error::invalid_store(path, e.to_string()))?;
        analyzer::register_analyzers(&index);

        if schema.analyzer() == AnalyzerKind::Cjk && !analyzer::cjk_available() {
            log::warn!(
                "Index at {} was built with CJK segmentation, which is unavailable; using stemming",
                path.display()
            );
        }

        log::debug!(
            "Opened index at {} (analyzer {})",
            path.display(),
            schema.analyzer()
        );
        Ok(Self {
            index,
            schema,
            path: Some(path.to_path_buf()),
        })
    }

    /// Create an in-memory store (for testing).
    pub fn create_in_ram(schema: &IndexSchema) -> Self {
        let index = Index::create_in_ram(schema.schema().clone());
        analyzer::register_analyzers(&index);
        Self {
            index,
            schema: schema.clone(),
            path: None,
        }
    }

    /// Acquire the store's single writer.
    ///
    /// # Errors
    ///
    /// Returns `Error::WriterLocked` while another writer is open on the
    /// same store.
    pub fn writer(&self) -> Result<Indexer> {
        let writer = self.index.writer(WRITER_BUFFER_SIZE).map_err(|e| match e {
            TantivyError::LockFailure(lock, _) => Error::WriterLocked(lock.to_string()),
            other => Error::operation(format!("Failed to create index writer: {other}")),
        })?;
        Ok(Indexer::new(writer, self.schema.clone()))
    }

    /// Open a reader that only sees new commits after `reload()`.
    pub fn reader(&self) -> Result<IndexReader> {
        self.index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| Error::operation(format!("Failed to open index reader: {e}")))
    }

    /// Schema in effect for this store.
    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    /// Get reference to the underlying Tantivy index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Directory of the store, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl std::fmt::Debug for IndexStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexStore")
            .field("path", &self.path)
            .field("schema", &self.schema)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
