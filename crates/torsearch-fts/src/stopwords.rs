//! Query-side stopword removal.
//!
//! Documents are indexed with a short stop list so that content words stay
//! searchable. Queries get the much larger ISO English list from the
//! `stop-words` crate on top of that, which keeps filler words such as
//! "what" or "about" from diluting BM25 scores.
//!
//! Queries that use Tantivy query syntax (quotes, field prefixes, grouping,
//! boosts, required/excluded markers) are passed through untouched.

use std::collections::HashSet;

use stop_words::{LANGUAGE, get};

/// Characters that mark a query as structured.
const QUERY_SYNTAX: &[char] = &['"', ':', '(', ')', '+', '-', '^', '[', ']', '{', '}', '*'];

/// Stopword filter for free-text queries.
pub struct StopwordFilter {
    stopwords: HashSet<String>,
}

impl StopwordFilter {
    /// Filter using the ISO English stopword list.
    pub fn english() -> Self {
        Self::with_words(get(LANGUAGE::English).iter().map(|s| s.to_string()))
    }

    /// Filter using an explicit word list (case-insensitive).
    pub fn with_words(words: impl IntoIterator<Item = String>) -> Self {
        Self {
            stopwords: words.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Remove stopwords from a query.
    ///
    /// Returns the original query when every word is a stopword or when
    /// the query uses query syntax.
    pub fn filter(&self, query: &str) -> String {
        if query.contains(QUERY_SYNTAX) {
            return query.to_string();
        }

        let filtered: Vec<&str> = query
            .split_whitespace()
            .filter(|word| !self.is_stopword(word))
            .collect();

        if filtered.is_empty() {
            query.to_string()
        } else {
            filtered.join(" ")
        }
    }

    /// Check if a word is a stopword (case-insensitive).
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Number of words in the list.
    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl std::fmt::Debug for StopwordFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopwordFilter")
            .field("stopword_count", &self.stopwords.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
