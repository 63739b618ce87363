// ABOUTME: HTML serializer for the cleaned document body.
// ABOUTME: Collapses whitespace per top-level body child and controls how text nodes are written.

use ego_tree::{NodeId, NodeRef};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Document, Node};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// How text node content is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    /// Text is written as-is, so markup typed into the document (embed codes) stays live.
    #[default]
    Raw,
    /// `&`, `<` and `>` are entity-encoded.
    Escaped,
}

/// Serialize the children of `body`, each collapsed independently, and join them.
///
/// Returns an empty string when the document has no body content.
pub fn serialize_body(doc: &Document, mode: TextMode) -> String {
    doc.body_children()
        .into_iter()
        .map(|child| collapse_whitespace(&serialize_node(doc, child, mode)))
        .collect()
}

/// Collapse runs of whitespace to a single space and drop newlines.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RE.replace_all(s, " ").replace('\n', "")
}

/// Serialize one node and its subtree.
pub fn serialize_node(doc: &Document, id: NodeId, mode: TextMode) -> String {
    let mut out = String::new();
    if let Some(node) = doc.get(id) {
        write_node(node, mode, &mut out);
    }
    out
}

fn write_node(node: NodeRef<'_, Node>, mode: TextMode, out: &mut String) {
    match node.value() {
        Node::Document => {
            for child in node.children() {
                write_node(child, mode, out);
            }
        }
        Node::Text(text) => write_text(text, mode, out),
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::Element(el) => {
            out.push('<');
            out.push_str(&el.name);
            for (k, v) in &el.attrs {
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                out.push_str(&escape_attr(v));
                out.push('"');
            }

            if el.is_void() {
                out.push_str(" />");
                return;
            }

            out.push('>');
            for child in node.children() {
                write_node(child, mode, out);
            }
            out.push_str("</");
            out.push_str(&el.name);
            out.push('>');
        }
    }
}

fn write_text(text: &str, mode: TextMode, out: &mut String) {
    for c in text.chars() {
        match (c, mode) {
            // Kept as an entity so whitespace collapsing leaves it alone
            ('\u{a0}', _) => out.push_str("&nbsp;"),
            ('&', TextMode::Escaped) => out.push_str("&amp;"),
            ('<', TextMode::Escaped) => out.push_str("&lt;"),
            ('>', TextMode::Escaped) => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a \n\t  b\n"), "a b ");
        assert_eq!(collapse_whitespace("plain"), "plain");
    }

    #[test]
    fn test_serialize_body_collapses_per_child() {
        let doc = Document::parse("<body><p>This    is\n  spaced</p>\n\n<p>Next</p></body>");
        assert_eq!(
            serialize_body(&doc, TextMode::Raw),
            "<p>This is spaced</p> <p>Next</p>"
        );
    }

    #[test]
    fn test_serialize_body_empty_document() {
        let doc = Document::parse("");
        assert_eq!(serialize_body(&doc, TextMode::Raw), "");
    }

    #[test]
    fn test_nbsp_kept_as_entity() {
        let doc = Document::parse("<p>non-breaking&nbsp;space</p>");
        assert_eq!(
            serialize_body(&doc, TextMode::Raw),
            "<p>non-breaking&nbsp;space</p>"
        );
    }

    #[test]
    fn test_raw_mode_passes_typed_markup() {
        let doc = Document::parse("<p>&lt;iframe src=\"https://x\"&gt;&lt;/iframe&gt;</p>");
        assert_eq!(
            serialize_body(&doc, TextMode::Raw),
            "<p><iframe src=\"https://x\"></iframe></p>"
        );
        assert_eq!(
            serialize_body(&doc, TextMode::Escaped),
            "<p>&lt;iframe src=\"https://x\"&gt;&lt;/iframe&gt;</p>"
        );
    }

    #[test]
    fn test_void_and_attr_escaping() {
        let doc = Document::parse("<p><img alt='say \"hi\" &amp; bye'></p>");
        let img = doc.find_all("img")[0];
        assert_eq!(
            serialize_node(&doc, img, TextMode::Raw),
            "<img alt=\"say &quot;hi&quot; &amp; bye\" />"
        );
    }
}
