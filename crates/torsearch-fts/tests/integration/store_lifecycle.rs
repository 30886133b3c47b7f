//! Integration tests for store creation and reopening across runs.

use torsearch_core::Error;
use torsearch_fts::{
    AnalyzerKind, IndexBuilder, IndexSchema, IndexSearcher, MemoryContentStore, open_or_create,
};

use crate::common::{TestSite, record, store};

#[test]
fn test_reopen_keeps_original_analyzer() {
    let mut site = TestSite::new();
    let posts = store(vec![record("p1", "1", "Gardening", "<p>tomatoes</p>", 1)]);
    let wiki = MemoryContentStore::default();

    let first = IndexBuilder::new(&site.config, &posts, &wiki).build().unwrap();
    assert_eq!(first.analyzer, AnalyzerKind::Stemming);

    site.config.lang = "zh".to_string();
    let second = IndexBuilder::new(&site.config, &posts, &wiki).build().unwrap();
    assert!(!second.store_created);
    assert_eq!(second.analyzer, AnalyzerKind::Stemming);

    let searcher = IndexSearcher::open(site.index_path()).unwrap();
    assert_eq!(searcher.store().schema().analyzer(), AnalyzerKind::Stemming);
    assert_eq!(
        searcher
            .search(&torsearch_fts::SearchParams::new("tomato"))
            .unwrap()
            .total,
        1
    );
}

#[test]
fn test_open_or_create_twice() {
    let site = TestSite::new();
    let schema = IndexSchema::build(AnalyzerKind::Stemming);

    let first = open_or_create(site.index_path(), &schema).unwrap();
    assert!(first.is_created());
    drop(first);

    let second = open_or_create(site.index_path(), &schema).unwrap();
    assert!(!second.is_created());
    assert_eq!(second.store().schema().analyzer(), AnalyzerKind::Stemming);
}

#[test]
fn test_foreign_directory_is_fatal() {
    let site = TestSite::new();
    std::fs::create_dir_all(site.index_path()).unwrap();
    std::fs::write(site.index_path().join("notes.txt"), b"keep me").unwrap();

    let posts = store(vec![record("p1", "1", "Hello", "<p>World</p>", 1)]);
    let wiki = MemoryContentStore::default();

    let err = IndexBuilder::new(&site.config, &posts, &wiki)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidStore { .. }));

    // nothing was written into the directory
    let entries: Vec<_> = std::fs::read_dir(site.index_path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_concurrent_writer_is_rejected() {
    let site = TestSite::new();
    let schema = IndexSchema::build(AnalyzerKind::Stemming);
    let held = open_or_create(site.index_path(), &schema).unwrap().into_store();
    let _writer = held.writer().unwrap();

    let posts = store(vec![record("p1", "1", "Hello", "<p>World</p>", 1)]);
    let wiki = MemoryContentStore::default();
    let err = IndexBuilder::new(&site.config, &posts, &wiki)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::WriterLocked(_)));
}
