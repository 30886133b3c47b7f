//! Integration tests for complete indexing runs.

use torsearch_core::Error;
use torsearch_fts::{IndexBuilder, IndexSearcher, MemoryContentStore, SearchParams};

use crate::common::{TestSite, record, store};

#[test]
fn test_single_post_is_searchable() {
    let site = TestSite::new();
    let posts = store(vec![record("p1", "1", "Hello", "<p>World</p>", 1)]);
    let wiki = MemoryContentStore::default();

    let stats = IndexBuilder::new(&site.config, &posts, &wiki)
        .build()
        .expect("run should succeed");
    assert!(stats.store_created);

    let searcher = IndexSearcher::open(site.index_path()).unwrap();
    assert_eq!(searcher.num_docs(), 1);

    let doc = searcher.get_by_link("/post/p1").unwrap().unwrap();
    assert_eq!(doc.title, "Hello");
    assert_eq!(doc.content, "Hello,World");
    assert_eq!(doc.catid, "sid1");
    assert_eq!(doc.doc_type, site.config.type_label("1").unwrap());

    let results = searcher.search(&SearchParams::new("world")).unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(results.items[0].link, "/post/p1");
}

#[test]
fn test_every_adapter_contributes() {
    let site = TestSite::new();
    let posts = store(vec![
        record("p1", "1", "Post", "<p>post body</p>", 1),
        record("i1", "9", "Notice", "<p>info body</p>", 1),
    ]);
    let wiki = store(vec![
        record("w1", "1", "Glossary", "<p>wiki body</p>", 1),
        record("pg1", "2", "About", "<p>page body</p>", 1),
    ]);

    IndexBuilder::new(&site.config, &posts, &wiki).build().unwrap();

    let searcher = IndexSearcher::open(site.index_path()).unwrap();
    assert_eq!(searcher.num_docs(), 4);

    assert!(searcher.get_by_link("/post/p1").unwrap().is_some());
    assert!(searcher.get_by_link("/wiki/Glossary").unwrap().is_some());
    assert!(searcher.get_by_link("/page/pg1").unwrap().is_some());

    let info = searcher.get_by_link("/info/i1").unwrap().unwrap();
    assert_eq!(info.catid, "sid9");
    assert_eq!(info.doc_type, site.config.type_label("9").unwrap());

    let filtered = searcher
        .search(&SearchParams {
            catid: Some("sid9".to_string()),
            ..SearchParams::new("body")
        })
        .unwrap();
    assert_eq!(filtered.total, 1);
    assert_eq!(filtered.items[0].link, "/info/i1");
}

#[test]
fn test_escaped_html_is_unescaped() {
    let site = TestSite::new();
    let posts = store(vec![record(
        "p1",
        "1",
        "T",
        "&lt;p&gt;Fish &amp;amp; chips&lt;/p&gt;&lt;script&gt;hidden()&lt;/script&gt;",
        1,
    )]);
    let wiki = MemoryContentStore::default();

    IndexBuilder::new(&site.config, &posts, &wiki).build().unwrap();

    let searcher = IndexSearcher::open(site.index_path()).unwrap();
    let doc = searcher.get_by_link("/post/p1").unwrap().unwrap();
    assert!(doc.content.starts_with("T,Fish &"));
    assert!(!doc.content.contains('<'));
    assert!(!doc.content.contains("hidden"));
}

#[test]
fn test_second_run_replaces_documents() {
    let site = TestSite::new();
    let wiki = MemoryContentStore::default();

    let before = store(vec![record("p1", "1", "Draft", "<p>old text</p>", 1)]);
    IndexBuilder::new(&site.config, &before, &wiki).build().unwrap();

    let after = store(vec![record("p1", "1", "Final", "<p>new text</p>", 2)]);
    let stats = IndexBuilder::new(&site.config, &after, &wiki).build().unwrap();
    assert!(!stats.store_created);

    let searcher = IndexSearcher::open(site.index_path()).unwrap();
    assert_eq!(searcher.num_docs(), 1);
    let doc = searcher.get_by_link("/post/p1").unwrap().unwrap();
    assert_eq!(doc.title, "Final");
    assert_eq!(doc.content, "Final,new text");
    assert_eq!(searcher.search(&SearchParams::new("draft")).unwrap().total, 0);
}

#[test]
fn test_empty_stores_commit_empty_index() {
    let site = TestSite::new();
    let empty = MemoryContentStore::default();

    let stats = IndexBuilder::new(&site.config, &empty, &empty).build().unwrap();
    assert_eq!(stats.documents_staged, 0);
    assert!(site.index_path().join("meta.json").exists());

    let searcher = IndexSearcher::open(site.index_path()).unwrap();
    assert_eq!(searcher.num_docs(), 0);
}

#[test]
fn test_missing_label_leaves_previous_commit() {
    let mut site = TestSite::new();
    let posts = store(vec![
        record("p1", "1", "Kept", "<p>first run</p>", 1),
        record("x1", "5", "Orphan", "<p>no label</p>", 1),
    ]);
    let wiki = MemoryContentStore::default();

    IndexBuilder::new(&site.config, &posts, &wiki).build().unwrap();

    site.config.kind_arr.push("5".to_string());
    let err = IndexBuilder::new(&site.config, &posts, &wiki)
        .build()
        .unwrap_err();
    assert!(err.is_config());

    let searcher = IndexSearcher::open(site.index_path()).unwrap();
    assert_eq!(searcher.num_docs(), 1);
    assert!(searcher.get_by_link("/post/p1").unwrap().is_some());
}

#[cfg(feature = "cjk")]
#[test]
fn test_chinese_site_segments_words() {
    let site = TestSite::with_lang("zh");
    let posts = store(vec![record("p1", "1", "中文搜索", "<p>我们正在测试</p>", 1)]);
    let wiki = MemoryContentStore::default();

    let stats = IndexBuilder::new(&site.config, &posts, &wiki).build().unwrap();
    assert_eq!(stats.analyzer, torsearch_fts::AnalyzerKind::Cjk);

    let searcher = IndexSearcher::open(site.index_path()).unwrap();
    let results = searcher.search(&SearchParams::new("测试")).unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(results.items[0].link, "/post/p1");
}

#[test]
fn test_fatal_errors_are_typed() {
    let site = TestSite::new();
    std::fs::create_dir_all(site.index_path().parent().unwrap()).unwrap();
    std::fs::write(site.index_path(), b"not an index").unwrap();

    let posts = store(vec![record("p1", "1", "Hello", "<p>World</p>", 1)]);
    let wiki = MemoryContentStore::default();

    let err = IndexBuilder::new(&site.config, &posts, &wiki)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidStore { .. }));
}
