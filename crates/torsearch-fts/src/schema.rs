//! Tantivy schema definition for the content index.
//!
//! # Schema Fields
//!
//! | Field | Options | Purpose |
//! |-------|---------|---------|
//! | `title` | TEXT (run analyzer) + STORED | Display title, searchable |
//! | `catid` | STRING + STORED | Category key, exact match only |
//! | `type` | TEXT (`default` tokenizer) + STORED | Rendered type badge |
//! | `link` | STRING + STORED | Canonical link, the unique upsert key |
//! | `content` | TEXT (run analyzer) + STORED | Title plus normalized body |
//!
//! The analyzer used by `title` and `content` is recorded in the schema by
//! tokenizer name. A schema read back from disk with [`IndexSchema::from_schema`]
//! reports the analyzer the store was created with.

use tantivy::schema::{
    Field, FieldType, IndexRecordOption, STORED, STRING, Schema, SchemaBuilder, TextFieldIndexing,
    TextOptions,
};
use torsearch_core::{Error, Result};

use crate::analyzer::AnalyzerKind;

/// Field name of the display title.
pub const FIELD_TITLE: &str = "title";
/// Field name of the category key.
pub const FIELD_CATID: &str = "catid";
/// Field name of the type label.
pub const FIELD_TYPE: &str = "type";
/// Field name of the canonical link.
pub const FIELD_LINK: &str = "link";
/// Field name of the normalized body.
pub const FIELD_CONTENT: &str = "content";

/// Tokenizer for the lightly analyzed `type` field.
const LIGHT_TOKENIZER: &str = "default";

/// Search schema holding field handles and the Tantivy schema.
#[derive(Clone)]
pub struct IndexSchema {
    schema: Schema,
    analyzer: AnalyzerKind,

    /// Display title.
    pub title: Field,
    /// Category key grouping documents by origin.
    pub catid: Field,
    /// Type label (schema field `type`).
    pub doc_type: Field,
    /// Canonical link, unique per document.
    pub link: Field,
    /// Normalized plain-text body.
    pub content: Field,
}

impl IndexSchema {
    /// Build the schema for a new store analyzed with `analyzer`.
    pub fn build(analyzer: AnalyzerKind) -> Self {
        let mut builder = SchemaBuilder::new();

        let analyzed = TextOptions::default()
            .set_indexing_options(
                TextFieldIndexing::default()
                    .set_tokenizer(analyzer.tokenizer_name())
                    .set_index_option(IndexRecordOption::WithFreqsAndPositions),
            )
            .set_stored();

        let light = TextOptions::default()
            .set_indexing_options(
                TextFieldIndexing::default()
                    .set_tokenizer(LIGHT_TOKENIZER)
                    .set_index_option(IndexRecordOption::Basic),
            )
            .set_stored();

        let title = builder.add_text_field(FIELD_TITLE, analyzed.clone());
        let catid = builder.add_text_field(FIELD_CATID, STRING | STORED);
        let doc_type = builder.add_text_field(FIELD_TYPE, light);
        let link = builder.add_text_field(FIELD_LINK, STRING | STORED);
        let content = builder.add_text_field(FIELD_CONTENT, analyzed);

        Self {
            schema: builder.build(),
            analyzer,
            title,
            catid,
            doc_type,
            link,
            content,
        }
    }

    /// Recover field handles and the analyzer from an existing schema.
    ///
    /// Fails if a field is missing or `title` uses an unknown tokenizer.
    pub fn from_schema(schema: &Schema) -> Result<Self> {
        let field = |name: &str| {
            schema
                .get_field(name)
                .map_err(|_| Error::operation(format!("schema has no `{name}` field")))
        };

        let title = field(FIELD_TITLE)?;
        let catid = field(FIELD_CATID)?;
        let doc_type = field(FIELD_TYPE)?;
        let link = field(FIELD_LINK)?;
        let content = field(FIELD_CONTENT)?;

        let tokenizer = match schema.get_field_entry(title).field_type() {
            FieldType::Str(options) => options
                .get_indexing_options()
                .map(|indexing| indexing.tokenizer().to_string()),
            _ => None,
        }
        .ok_or_else(|| Error::operation("`title` is not an indexed text field"))?;

        let analyzer = AnalyzerKind::from_tokenizer_name(&tokenizer)
            .ok_or_else(|| Error::operation(format!("unknown tokenizer `{tokenizer}`")))?;

        Ok(Self {
            schema: schema.clone(),
            analyzer,
            title,
            catid,
            doc_type,
            link,
            content,
        })
    }

    /// Get the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Analyzer in effect for `title` and `content`.
    pub fn analyzer(&self) -> AnalyzerKind {
        self.analyzer
    }

    /// Fields searched by default, with their boost weights.
    pub fn default_search_fields(&self) -> Vec<(Field, f32)> {
        vec![(self.title, 2.0), (self.content, 1.0)]
    }

    /// Get all fields.
    pub fn all_fields(&self) -> Vec<Field> {
        vec![
            self.title,
            self.catid,
            self.doc_type,
            self.link,
            self.content,
        ]
    }

    /// Names of all fields, in declaration order.
    pub fn field_names() -> [&'static str; 5] {
        [FIELD_TITLE, FIELD_CATID, FIELD_TYPE, FIELD_LINK, FIELD_CONTENT]
    }
}

impl std::fmt::Debug for IndexSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexSchema")
            .field("field_count", &self.all_fields().len())
            .field("analyzer", &self.analyzer)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
