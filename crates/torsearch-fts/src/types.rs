//! Run configuration.
//!
//! `IndexConfig` is built once when a run starts and passed by reference to
//! every component that needs it. All fields have defaults, so a partial TOML
//! file (or none at all) is valid.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use torsearch_core::{Error, Result};

use crate::analyzer::{self, AnalyzerKind};

/// Kind code of plain posts, wiki entries and the type label they share.
pub const POST_KIND: &str = "1";

/// Indexing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Site language; `"zh"` selects CJK segmentation.
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Directory of the index store.
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    /// JSON snapshot of post records.
    #[serde(default = "default_posts_path")]
    pub posts_path: PathBuf,

    /// JSON snapshot of wiki and page records.
    #[serde(default = "default_wiki_path")]
    pub wiki_path: PathBuf,

    /// Category kind codes swept by the generic adapter, in order.
    #[serde(default = "default_kind_arr")]
    pub kind_arr: Vec<String>,

    /// Category kind code to URL path segment.
    #[serde(default = "default_router_post")]
    pub router_post: BTreeMap<String, String>,

    /// Kind code to rendered type label.
    #[serde(default = "default_post_type")]
    pub post_type: BTreeMap<String, String>,
}

fn default_lang() -> String {
    analyzer::CJK_LANG.to_string()
}

fn default_index_path() -> PathBuf {
    PathBuf::from("database/whoosh")
}

fn default_router_post() -> BTreeMap<String, String> {
    BTreeMap::from([
        (POST_KIND.to_string(), "post".to_string()),
        ("9".to_string(), "info".to_string()),
    ])
}

fn default_kind_arr() -> Vec<String> {
    vec!["9".to_string()]
}

fn default_post_type() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            POST_KIND.to_string(),
            "<span style=\"color:green;\">[Document]</span>".to_string(),
        ),
        (
            "9".to_string(),
            "<span style=\"color:blue;\">[Info]</span>".to_string(),
        ),
    ])
}

fn default_posts_path() -> PathBuf {
    PathBuf::from("database/posts.json")
}

fn default_wiki_path() -> PathBuf {
    PathBuf::from("database/wiki.json")
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            index_path: default_index_path(),
            router_post: default_router_post(),
            kind_arr: default_kind_arr(),
            post_type: default_post_type(),
            posts_path: default_posts_path(),
            wiki_path: default_wiki_path(),
        }
    }
}

impl IndexConfig {
    /// Analyzer selected by `lang` for new stores.
    pub fn analyzer(&self) -> AnalyzerKind {
        analyzer::make_analyzer(&self.lang)
    }

    /// Type label for a kind.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when `post_type` has no entry for `kind`.
    pub fn type_label(&self, kind: &str) -> Result<&str> {
        self.post_type
            .get(kind)
            .map(String::as_str)
            .ok_or_else(|| Error::config(format!("post_type has no label for kind '{kind}'")))
    }

    /// URL path segment for a kind.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when `router_post` has no entry for `kind`.
    pub fn route(&self, kind: &str) -> Result<&str> {
        self.router_post
            .get(kind)
            .map(String::as_str)
            .ok_or_else(|| Error::config(format!("router_post has no route for kind '{kind}'")))
    }
}

// ============================================================================
// Tests
// ============================================================================
