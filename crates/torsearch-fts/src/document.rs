//! Indexed document representation.
//!
//! `IndexDocument` maps one-to-one onto the fields declared in `schema.rs`.
//!
//! ```rust
//! use torsearch_fts::IndexDocument;
//!
//! let doc = IndexDocument::builder()
//!     .catid("sid1")
//!     .title("Hello")
//!     .doc_type("post")
//!     .link("/post/p1")
//!     .content("Hello,World")
//!     .build();
//!
//! assert_eq!(doc.link, "/post/p1");
//! ```

use serde::{Deserialize, Serialize};
use tantivy::TantivyDocument;
use tantivy::schema::{Field, Value};

use crate::schema::IndexSchema;

/// One searchable unit, produced from one content record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    /// Category key (not unique).
    pub catid: String,
    /// Display title.
    pub title: String,
    /// Type label, stored under the `type` field.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Canonical link; the upsert key.
    pub link: String,
    /// Title plus normalized body text.
    pub content: String,
}

impl IndexDocument {
    /// Create a new document builder.
    pub fn builder() -> IndexDocumentBuilder {
        IndexDocumentBuilder::default()
    }

    /// Convert into a Tantivy document laid out by `schema`.
    pub fn to_tantivy(&self, schema: &IndexSchema) -> TantivyDocument {
        let mut doc = TantivyDocument::new();
        doc.add_text(schema.title, &self.title);
        doc.add_text(schema.catid, &self.catid);
        doc.add_text(schema.doc_type, &self.doc_type);
        doc.add_text(schema.link, &self.link);
        doc.add_text(schema.content, &self.content);
        doc
    }

    /// Read stored fields back from a Tantivy document.
    ///
    /// Missing fields come back empty.
    pub fn from_tantivy(doc: &TantivyDocument, schema: &IndexSchema) -> Self {
        Self {
            catid: stored_text(doc, schema.catid),
            title: stored_text(doc, schema.title),
            doc_type: stored_text(doc, schema.doc_type),
            link: stored_text(doc, schema.link),
            content: stored_text(doc, schema.content),
        }
    }
}

fn stored_text(doc: &TantivyDocument, field: Field) -> String {
    doc.get_first(field)
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Builder for [`IndexDocument`].
#[derive(Debug, Default)]
pub struct IndexDocumentBuilder {
    doc: IndexDocument,
}

impl IndexDocumentBuilder {
    /// Set the category key.
    pub fn catid(mut self, catid: impl Into<String>) -> Self {
        self.doc.catid = catid.into();
        self
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.doc.title = title.into();
        self
    }

    /// Set the type label.
    pub fn doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc.doc_type = doc_type.into();
        self
    }

    /// Set the canonical link.
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.doc.link = link.into();
        self
    }

    /// Set the content body.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.doc.content = content.into();
        self
    }

    /// Build the document.
    pub fn build(self) -> IndexDocument {
        self.doc
    }
}

// ============================================================================
// Tests
// ============================================================================
