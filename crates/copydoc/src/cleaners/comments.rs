// ABOUTME: Strips authoring-tool comment artifacts from the document.
// ABOUTME: Removes comment-anchor wrappers (by link id prefix) and body-level inline comments (by text marker).

use ego_tree::NodeId;

use crate::dom::{Document, Node};

/// Default id prefix of comment reference links (`cmnt1`, `cmnt_ref1`).
pub const COMMENT_ID_PREFIX: &str = "cmnt";

/// Default leading marker of an inline editorial comment.
pub const INLINE_COMMENT_MARKER: &str = "##";

/// If `link` is a comment anchor, remove its parent wrapper.
///
/// Structural parents (document, html, head, body) are never removed; the link
/// alone goes instead. Returns true if anything was removed.
pub fn strip_comment_anchor(doc: &mut Document, link: NodeId, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    let is_anchor = doc
        .attr(link, "id")
        .is_some_and(|id| id.starts_with(prefix));
    if !is_anchor {
        return false;
    }

    let target = match doc.parent(link) {
        Some(parent) if !is_structural(doc, parent) => parent,
        _ => link,
    };
    tracing::trace!(?target, "removing comment anchor");
    doc.detach(target);
    true
}

/// Remove a direct child of `body` whose text starts with `marker`.
pub fn strip_inline_comment(doc: &mut Document, id: NodeId, body: NodeId, marker: &str) -> bool {
    if marker.is_empty() || doc.parent(id) != Some(body) {
        return false;
    }
    let Some(text) = doc.text_content(id) else {
        return false;
    };
    if !text.starts_with(marker) {
        return false;
    }
    tracing::trace!(?id, "removing inline comment");
    doc.detach(id);
    true
}

fn is_structural(doc: &Document, id: NodeId) -> bool {
    match doc.get(id).map(|n| n.value()) {
        Some(Node::Document) | None => true,
        Some(Node::Element(el)) => el.is("html") || el.is("head") || el.is("body"),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::TextMode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_comment_anchor_removes_parent() {
        let mut doc = Document::parse(
            r##"<p>Text<sup><a href="#cmnt1" id="cmnt_ref1">[a]</a></sup></p>"##,
        );
        let link = doc.find_all("a")[0];
        assert!(strip_comment_anchor(&mut doc, link, COMMENT_ID_PREFIX));
        assert!(doc.find_all("sup").is_empty());
        let p = doc.find_all("p")[0];
        assert_eq!(doc.serialize(p, TextMode::Raw), "<p>Text</p>");
    }

    #[test]
    fn test_regular_link_untouched() {
        let mut doc = Document::parse(r#"<p><a href="http://npr.org" id="h.1">npr</a></p>"#);
        let link = doc.find_all("a")[0];
        assert!(!strip_comment_anchor(&mut doc, link, COMMENT_ID_PREFIX));
        assert_eq!(doc.find_all("a").len(), 1);
    }

    #[test]
    fn test_comment_anchor_directly_in_body_keeps_body() {
        let mut doc = Document::parse(r##"<body><a href="#x" id="cmnt2">[b]</a><p>kept</p></body>"##);
        let link = doc.find_all("a")[0];
        assert!(strip_comment_anchor(&mut doc, link, COMMENT_ID_PREFIX));
        assert!(doc.body().is_some());
        assert_eq!(doc.body_elements().len(), 1);
    }

    #[test]
    fn test_inline_comment_only_at_body_level() {
        let mut doc = Document::parse("<body><p>## note</p><div><p>## nested</p></div></body>");
        let body = doc.body().unwrap();
        let ps = doc.find_all("p");
        assert!(strip_inline_comment(&mut doc, ps[0], body, INLINE_COMMENT_MARKER));
        assert!(!strip_inline_comment(&mut doc, ps[1], body, INLINE_COMMENT_MARKER));
        assert_eq!(doc.find_all("p").len(), 1);
    }
}
