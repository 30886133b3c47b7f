//! HTML-to-text normalization for indexed content.
//!
//! Record bodies arrive as HTML that may itself be entity-escaped
//! (`&lt;p&gt;...`). Normalization runs in two steps, in this order:
//!
//! 1. Decode HTML entities (`&lt;b&gt;` becomes `<b>`)
//! 2. Parse the result as an HTML fragment and keep only its text nodes
//!
//! Decoding first means escaped markup is stripped like real markup instead
//! of leaking into the index as literal `<b>` text.
//!
//! Entities are decoded exactly once, which leaves two edges:
//!
//! - Double-escaped markup (`&amp;lt;b&amp;gt;`) decodes to escaped markup,
//!   which the parser then reads back as literal text: the index sees `<b>`.
//! - An escaped `<` with no closing `>` (`x &lt;y z`) decodes to the start of
//!   an unterminated tag. The parser swallows it, so everything after the
//!   `<` is lost.

use scraper::{ElementRef, Html, Node};

/// Separator placed between a record's title and its body text.
pub const TITLE_SEPARATOR: &str = ",";

/// Elements whose whole subtree is dropped.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Elements that start a new line of text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

/// Convert raw (possibly entity-escaped) HTML into plain text.
///
/// Markup, scripts and styles never survive; adjacent block elements are
/// separated by a newline. Leading and trailing whitespace is trimmed.
pub fn html_to_text(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    let fragment = Html::parse_fragment(&decoded);

    let mut out = String::with_capacity(decoded.len());
    collect_text(fragment.root_element(), &mut out);
    out.trim().to_string()
}

/// Build the indexed `content` value for a record: title, separator, body text.
pub fn searchable_text(title: &str, cnt_html: &str) -> String {
    let body = html_to_text(cnt_html);
    let mut text = String::with_capacity(title.len() + TITLE_SEPARATOR.len() + body.len());
    text.push_str(title);
    text.push_str(TITLE_SEPARATOR);
    text.push_str(&body);
    text
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED_ELEMENTS.contains(&name) {
                    continue;
                }
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_ELEMENTS.contains(&name);
                if block {
                    push_break(out);
                }
                collect_text(child_el, out);
                if block {
                    push_break(out);
                }
            }
            _ => {}
        }
    }
}

fn push_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaped_markup_is_stripped() {
        assert_eq!(html_to_text("&lt;b&gt;Hi&lt;/b&gt;"), "Hi");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let plain = "Rust makes systems programming approachable.";
        assert_eq!(html_to_text(plain), plain);
        assert_eq!(
            searchable_text("Title", plain),
            format!("Title{TITLE_SEPARATOR}{plain}")
        );
    }

    #[test]
    fn test_plain_cjk_text_unchanged() {
        let plain = "全文检索系统";
        assert_eq!(html_to_text(plain), plain);
    }

    #[test]
    fn test_tags_removed() {
        let text = html_to_text("<p>Hello <em>brave</em> world</p>");
        assert_eq!(text, "Hello brave world");
    }

    #[test]
    fn test_script_and_style_dropped() {
        let html = "<style>p { color: red; }</style><p>Visible</p><script>alert('x')</script>";
        let text = html_to_text(html);
        assert_eq!(text, "Visible");
        assert!(!text.contains("alert"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn test_blocks_do_not_fuse() {
        let text = html_to_text("<p>first</p><p>second</p><ul><li>a</li><li>b</li></ul>");
        assert_eq!(text, "first\nsecond\na\nb");
    }

    #[test]
    fn test_line_break_element() {
        assert_eq!(html_to_text("one<br>two"), "one\ntwo");
    }

    #[test]
    fn test_entities_in_text_decoded() {
        assert_eq!(html_to_text("<p>Tom &amp; Jerry</p>"), "Tom & Jerry");
        assert_eq!(html_to_text("caf&eacute;"), "café");
    }

    #[test]
    fn test_escaped_script_is_dropped() {
        let text = html_to_text("&lt;script&gt;evil()&lt;/script&gt;&lt;p&gt;ok&lt;/p&gt;");
        assert_eq!(text, "ok");
    }

    #[test]
    fn test_double_escaped_markup_stays_literal() {
        let text = html_to_text("&amp;lt;script&amp;gt;evil()&amp;lt;/script&amp;gt;ok");
        assert_eq!(text, "<script>evil()</script>ok");
    }

    #[test]
    fn test_unterminated_escaped_tag_drops_tail() {
        assert_eq!(html_to_text("x &lt;y z"), "x");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(html_to_text(""), "");
        assert_eq!(searchable_text("Only title", ""), "Only title,");
    }

    #[test]
    fn test_searchable_text_combines_title_and_body() {
        let text = searchable_text("Hello", "<p>World</p>");
        assert_eq!(text, "Hello,World");
        assert!(!text.contains("<p>"));
    }
}
