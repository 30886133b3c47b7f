//! Analyzer registry for the analyzed text fields.
//!
//! Two pipelines exist, selected once per run from the configured language:
//!
//! | Kind | Tokenizer name | Pipeline |
//! |------|----------------|----------|
//! | `Cjk` | `zh_jieba` | Jieba (search mode) → AlphanumericOnly → RemoveLong → LowerCaser → StopWords → Stemmer(English) |
//! | `Stemming` | `en_stem` | Simple → RemoveLong → LowerCaser → StopWords → Stemmer(English) |
//!
//! The tokenizer name is written into the schema when a store is created, so
//! an existing store keeps its analyzer regardless of later configuration.
//!
//! Jieba segmentation is behind the `cjk` feature. Without it, `make_analyzer`
//! degrades to `Stemming` and the `zh_jieba` name is served by the stemming
//! pipeline so stores created with CJK analysis still open.

use serde::{Deserialize, Serialize};
use tantivy::Index;
use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, StopWordFilter,
    TextAnalyzer, Token, TokenFilter, TokenStream, Tokenizer,
};

/// Language code that selects CJK segmentation.
pub const CJK_LANG: &str = "zh";

/// Tokens longer than this many bytes are dropped.
const MAX_TOKEN_LEN: usize = 40;

/// Analysis pipeline applied to `title` and `content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    /// Dictionary-based Chinese word segmentation.
    Cjk,
    /// Porter-family stemming with English stopword removal.
    Stemming,
}

impl AnalyzerKind {
    /// Name under which this pipeline is registered with Tantivy.
    pub fn tokenizer_name(self) -> &'static str {
        match self {
            AnalyzerKind::Cjk => "zh_jieba",
            AnalyzerKind::Stemming => "en_stem",
        }
    }

    /// Map a registered tokenizer name back to its kind.
    pub fn from_tokenizer_name(name: &str) -> Option<Self> {
        match name {
            "zh_jieba" => Some(AnalyzerKind::Cjk),
            "en_stem" => Some(AnalyzerKind::Stemming),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tokenizer_name())
    }
}

/// Whether CJK segmentation was compiled in.
pub fn cjk_available() -> bool {
    cfg!(feature = "cjk")
}

/// Choose the analyzer for a run.
///
/// `"zh"` selects CJK segmentation when available and otherwise falls back
/// to stemming (logged, not an error). Every other language stems.
pub fn make_analyzer(lang: &str) -> AnalyzerKind {
    if lang.eq_ignore_ascii_case(CJK_LANG) {
        if cjk_available() {
            return AnalyzerKind::Cjk;
        }
        log::warn!("CJK segmentation unavailable, falling back to stemming analyzer");
    }
    AnalyzerKind::Stemming
}

/// Build the Tantivy analyzer for a kind.
pub fn text_analyzer(kind: AnalyzerKind) -> TextAnalyzer {
    match kind {
        #[cfg(feature = "cjk")]
        AnalyzerKind::Cjk => TextAnalyzer::builder(tantivy_jieba::JiebaTokenizer::new())
            .filter(AlphanumericOnlyFilter)
            .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
            .filter(LowerCaser)
            .filter(english_stopwords())
            .filter(Stemmer::new(Language::English))
            .build(),
        _ => stemming_analyzer(),
    }
}

fn stemming_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
        .filter(LowerCaser)
        .filter(english_stopwords())
        .filter(Stemmer::new(Language::English))
        .build()
}

/// Tantivy's short English list; content words survive indexing.
fn english_stopwords() -> StopWordFilter {
    StopWordFilter::new(Language::English)
        .unwrap_or_else(|| StopWordFilter::remove(Vec::<String>::new()))
}

/// Register both analyzer names with an index.
///
/// Must be called after creating or opening an index, before writing or
/// parsing queries against its analyzed fields.
pub fn register_analyzers(index: &Index) {
    let tokenizers = index.tokenizers();
    tokenizers.register(
        AnalyzerKind::Stemming.tokenizer_name(),
        text_analyzer(AnalyzerKind::Stemming),
    );
    tokenizers.register(
        AnalyzerKind::Cjk.tokenizer_name(),
        text_analyzer(AnalyzerKind::Cjk),
    );
}

/// Run text through a pipeline and return the emitted terms.
pub fn analyze(kind: AnalyzerKind, text: &str) -> Vec<String> {
    let mut analyzer = text_analyzer(kind);
    let mut stream = analyzer.token_stream(text);
    let mut terms = Vec::new();
    while stream.advance() {
        terms.push(stream.token().text.clone());
    }
    terms
}

/// Drops tokens that carry no letters or digits.
///
/// Jieba emits whitespace and punctuation as segments of their own.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlphanumericOnlyFilter;

impl TokenFilter for AlphanumericOnlyFilter {
    type Tokenizer<T: Tokenizer> = AlphanumericOnlyWrapper<T>;

    fn transform<T: Tokenizer>(self, tokenizer: T) -> AlphanumericOnlyWrapper<T> {
        AlphanumericOnlyWrapper { inner: tokenizer }
    }
}

#[derive(Clone)]
pub struct AlphanumericOnlyWrapper<T> {
    inner: T,
}

impl<T: Tokenizer> Tokenizer for AlphanumericOnlyWrapper<T> {
    type TokenStream<'a> = AlphanumericOnlyStream<T::TokenStream<'a>>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        AlphanumericOnlyStream {
            tail: self.inner.token_stream(text),
        }
    }
}

pub struct AlphanumericOnlyStream<T> {
    tail: T,
}

impl<T: TokenStream> TokenStream for AlphanumericOnlyStream<T> {
    fn advance(&mut self) -> bool {
        while self.tail.advance() {
            if self.tail.token().text.chars().any(char::is_alphanumeric) {
                return true;
            }
        }
        false
    }

    fn token(&self) -> &Token {
        self.tail.token()
    }

    fn token_mut(&mut self) -> &mut Token {
        self.tail.token_mut()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tantivy::schema::Schema;

    #[test]
    fn test_tokenizer_names_round_trip() {
        for kind in [AnalyzerKind::Cjk, AnalyzerKind::Stemming] {
            assert_eq!(
                AnalyzerKind::from_tokenizer_name(kind.tokenizer_name()),
                Some(kind)
            );
        }
        assert_eq!(AnalyzerKind::from_tokenizer_name("default"), None);
    }

    #[test]
    fn test_make_analyzer_latin() {
        assert_eq!(make_analyzer("en"), AnalyzerKind::Stemming);
        assert_eq!(make_analyzer("fr"), AnalyzerKind::Stemming);
    }

    #[test]
    fn test_make_analyzer_zh() {
        let expected = if cjk_available() {
            AnalyzerKind::Cjk
        } else {
            AnalyzerKind::Stemming
        };
        assert_eq!(make_analyzer("zh"), expected);
        assert_eq!(make_analyzer("ZH"), expected);
    }

    #[test]
    fn test_stemming_pipeline() {
        let terms = analyze(AnalyzerKind::Stemming, "The Jumping Dogs");
        // "the" is a stopword, the rest are lowercased and stemmed
        assert_eq!(terms, vec!["jump".to_string(), "dog".to_string()]);
    }

    #[test]
    fn test_stemming_drops_long_tokens() {
        let long = "a".repeat(MAX_TOKEN_LEN + 1);
        let terms = analyze(AnalyzerKind::Stemming, &format!("rust {long}"));
        assert_eq!(terms, vec!["rust".to_string()]);
    }

    #[cfg(feature = "cjk")]
    #[test]
    fn test_cjk_pipeline_segments_words() {
        let terms = analyze(AnalyzerKind::Cjk, "我们正在测试");
        assert!(terms.len() > 1);
        assert!(terms.iter().all(|t| !t.trim().is_empty()));
        assert!(terms.contains(&"测试".to_string()));
    }

    #[cfg(feature = "cjk")]
    #[test]
    fn test_cjk_pipeline_skips_punctuation_and_stems_latin() {
        let terms = analyze(AnalyzerKind::Cjk, "搜索，Jumping!");
        assert!(terms.contains(&"搜索".to_string()));
        assert!(terms.contains(&"jump".to_string()));
        assert!(!terms.iter().any(|t| t == "，" || t == "!"));
    }

    #[test]
    fn test_alphanumeric_only_filter() {
        let mut analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(AlphanumericOnlyFilter)
            .build();
        let mut stream = analyzer.token_stream("news, 2024");
        let mut terms = Vec::new();
        while stream.advance() {
            terms.push(stream.token().text.clone());
        }
        assert_eq!(terms, vec!["news".to_string(), "2024".to_string()]);
    }

    #[cfg(not(feature = "cjk"))]
    #[test]
    fn test_zh_jieba_served_by_stemming_without_cjk() {
        assert_eq!(make_analyzer("zh"), AnalyzerKind::Stemming);
        assert_eq!(
            analyze(AnalyzerKind::Cjk, "The Jumping Dogs"),
            analyze(AnalyzerKind::Stemming, "The Jumping Dogs")
        );
    }

    #[test]
    fn test_register_analyzers() {
        let index = Index::create_in_ram(Schema::builder().build());
        register_analyzers(&index);
        assert!(index.tokenizers().get("en_stem").is_some());
        assert!(index.tokenizers().get("zh_jieba").is_some());
    }

    #[test]
    fn test_display() {
        assert_eq!(AnalyzerKind::Stemming.to_string(), "en_stem");
        assert_eq!(AnalyzerKind::Cjk.to_string(), "zh_jieba");
    }
}
