// ABOUTME: Mutable document tree built from scraper's html5ever parse.
// ABOUTME: Provides navigation, text content and wrap/unwrap/detach operations over an ego-tree arena.

//! DOM utilities for HTML document manipulation.
//!
//! The input is parsed with scraper and copied into an `ego_tree::Tree<Node>`
//! that the cleaners mutate in place. Detached nodes stay in the arena but are
//! no longer reachable from the root, so every traversal works on snapshots of
//! `NodeId`s and checks attachment before acting on a node.

pub mod node;
pub mod serialize;

pub use node::{is_void_element, Element, Node};
pub use serialize::TextMode;

use ego_tree::{NodeId, NodeRef, Tree};
use scraper::Html;

/// A parsed document owning every node.
#[derive(Debug, Clone)]
pub struct Document {
    tree: Tree<Node>,
}

impl Document {
    /// Parse an HTML string. Never fails; malformed markup is recovered by html5ever.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut tree = Tree::new(Node::Document);
        let root = tree.root().id();
        copy_children(parsed.tree.root(), &mut tree, root);
        Self { tree }
    }

    pub fn tree(&self) -> &Tree<Node> {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root().id()
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, Node>> {
        self.tree.get(id)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.tree.get(id)?.value().as_element()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    /// Run `f` against the element at `id`, if it is one.
    pub fn with_element_mut<R>(&mut self, id: NodeId, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
        let mut node = self.tree.get_mut(id)?;
        node.value().as_element_mut().map(f)
    }

    /// The `body` element under `html`, if the document has one.
    pub fn body(&self) -> Option<NodeId> {
        self.tree
            .root()
            .children()
            .filter(|n| n.value().is_element_named("html"))
            .flat_map(|html| html.children())
            .find(|n| n.value().is_element_named("body"))
            .map(|n| n.id())
    }

    /// Direct children of `body`, text nodes included.
    pub fn body_children(&self) -> Vec<NodeId> {
        self.body().map(|body| self.children(body)).unwrap_or_default()
    }

    /// Element children of `body`.
    pub fn body_elements(&self) -> Vec<NodeId> {
        self.body_children()
            .into_iter()
            .filter(|id| self.element(*id).is_some())
            .collect()
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .get(id)
            .map(|n| n.children().map(|c| c.id()).collect())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id)?.parent().map(|p| p.id())
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id)?.next_sibling().map(|s| s.id())
    }

    /// All elements named `tag` in document order.
    pub fn find_all(&self, tag: &str) -> Vec<NodeId> {
        self.find_all_in(self.root(), tag)
    }

    /// Elements named `tag` strictly below `scope`, in document order.
    pub fn find_all_in(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.tree
            .get(scope)
            .map(|n| {
                n.descendants()
                    .skip(1)
                    .filter(|d| d.value().is_element_named(tag))
                    .map(|d| d.id())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every element strictly below `scope`, in document order.
    pub fn descendant_elements(&self, scope: NodeId) -> Vec<NodeId> {
        self.tree
            .get(scope)
            .map(|n| {
                n.descendants()
                    .skip(1)
                    .filter(|d| d.value().is_element())
                    .map(|d| d.id())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Concatenated text of all descendant text nodes.
    ///
    /// Returns `None` for nodes with no textual form (comments) or unknown ids.
    pub fn text_content(&self, id: NodeId) -> Option<String> {
        let node = self.tree.get(id)?;
        match node.value() {
            Node::Text(text) => Some(text.clone()),
            Node::Comment(_) => None,
            Node::Element(_) | Node::Document => Some(
                node.descendants()
                    .filter_map(|d| match d.value() {
                        Node::Text(text) => Some(text.as_str()),
                        _ => None,
                    })
                    .collect(),
            ),
        }
    }

    /// True if `id` is `ancestor` or lies below it.
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        if id == ancestor {
            return true;
        }
        self.tree
            .get(id)
            .is_some_and(|n| n.ancestors().any(|a| a.id() == ancestor))
    }

    /// True if the node is still reachable from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.is_within(id, self.root())
    }

    /// Wrap `id` in a new element that takes its place among its siblings.
    ///
    /// Returns the wrapper's id, or `None` if the node has no parent.
    pub fn wrap(&mut self, id: NodeId, wrapper: Element) -> Option<NodeId> {
        self.parent(id)?;
        let wrapper_id = self.tree.orphan(Node::Element(wrapper)).id();
        self.tree.get_mut(id)?.insert_id_before(wrapper_id);
        self.tree.get_mut(wrapper_id)?.append_id(id);
        Some(wrapper_id)
    }

    /// Replace `id` with its children, preserving their order.
    pub fn unwrap_node(&mut self, id: NodeId) -> bool {
        if self.parent(id).is_none() {
            return false;
        }
        for child in self.children(id) {
            if let Some(mut node) = self.tree.get_mut(id) {
                node.insert_id_before(child);
            }
        }
        self.detach(id);
        true
    }

    /// Remove the node (and its subtree) from the tree.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.tree.get_mut(id) {
            node.detach();
        }
    }

    /// Append a new text node as the last child of `id`.
    pub fn append_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(mut node) = self.tree.get_mut(id) {
            node.append(Node::Text(text.into()));
        }
    }

    /// Join adjacent text children of `body` and trim leading whitespace off the first one.
    ///
    /// Removals leave text runs split across nodes and leading whitespace that
    /// html5ever would merge or drop when parsing the output again. Returns the
    /// number of text nodes removed.
    pub fn normalize_body_text(&mut self) -> usize {
        let Some(body) = self.body() else {
            return 0;
        };

        let mut removed = 0;
        let mut run_start: Option<NodeId> = None;
        for child in self.children(body) {
            let text = match self.tree.get(child).map(|n| n.value()) {
                Some(Node::Text(text)) => text.clone(),
                _ => {
                    run_start = None;
                    continue;
                }
            };
            let Some(start) = run_start else {
                run_start = Some(child);
                continue;
            };
            if let Some(mut node) = self.tree.get_mut(start) {
                if let Node::Text(existing) = node.value() {
                    existing.push_str(&text);
                }
            }
            self.detach(child);
            removed += 1;
        }

        let Some(first) = self.children(body).first().copied() else {
            return removed;
        };
        let mut now_empty = false;
        if let Some(mut node) = self.tree.get_mut(first) {
            if let Node::Text(text) = node.value() {
                *text = text.trim_start_matches(is_html_whitespace).to_string();
                now_empty = text.is_empty();
            }
        }
        if now_empty {
            self.detach(first);
            removed += 1;
        }
        removed
    }

    /// Serialize a single node (no whitespace collapsing).
    pub fn serialize(&self, id: NodeId, mode: TextMode) -> String {
        serialize::serialize_node(self, id, mode)
    }
}

fn is_html_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

fn copy_children(src: NodeRef<'_, scraper::Node>, tree: &mut Tree<Node>, parent: NodeId) {
    for child in src.children() {
        let value = match child.value() {
            scraper::Node::Element(el) => Node::Element(Element::with_attrs(
                el.name(),
                el.attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )),
            scraper::Node::Text(text) => {
                let text: &str = text;
                Node::Text(text.to_string())
            }
            scraper::Node::Comment(comment) => {
                let comment: &str = comment;
                Node::Comment(comment.to_string())
            }
            _ => continue,
        };
        let Some(mut parent_node) = tree.get_mut(parent) else {
            return;
        };
        let id = parent_node.append(value).id();
        copy_children(child, tree, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(doc: &Document, tag: &str) -> NodeId {
        doc.find_all(tag)[0]
    }

    #[test]
    fn test_parse_finds_body() {
        let doc = Document::parse("<html><body><p>One</p><p>Two</p></body></html>");
        assert!(doc.body().is_some());
        assert_eq!(doc.body_elements().len(), 2);
    }

    #[test]
    fn test_empty_input_has_empty_body() {
        let doc = Document::parse("");
        assert!(doc.body_children().is_empty());
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        let doc = Document::parse("<p>Hello <b>big</b> world<!-- note --></p>");
        let p = first(&doc, "p");
        assert_eq!(doc.text_content(p).as_deref(), Some("Hello big world"));
    }

    #[test]
    fn test_wrap_takes_position() {
        let mut doc = Document::parse("<p>a<span>b</span>c</p>");
        let span = first(&doc, "span");
        let em = doc.wrap(span, Element::new("em")).unwrap();
        let p = first(&doc, "p");
        assert_eq!(doc.serialize(p, TextMode::Raw), "<p>a<em><span>b</span></em>c</p>");
        assert_eq!(doc.parent(span), Some(em));
    }

    #[test]
    fn test_unwrap_node_promotes_children() {
        let mut doc = Document::parse("<p>a<span>b<i>c</i></span>d</p>");
        let span = first(&doc, "span");
        assert!(doc.unwrap_node(span));
        let p = first(&doc, "p");
        assert_eq!(doc.serialize(p, TextMode::Raw), "<p>ab<i>c</i>d</p>");
        assert!(!doc.is_attached(span));
    }

    #[test]
    fn test_detach_removes_subtree() {
        let mut doc = Document::parse("<div><p><b>x</b></p></div>");
        let p = first(&doc, "p");
        let b = first(&doc, "b");
        doc.detach(p);
        assert!(!doc.is_attached(p));
        assert!(!doc.is_attached(b));
        assert!(doc.find_all("b").is_empty());
    }

    #[test]
    fn test_normalize_body_text_joins_runs() {
        let mut doc = Document::parse("<body>\n<p>gone</p>\n<h1>a</h1>\n<p>gone</p>\n<p>b</p></body>");
        let gone: Vec<NodeId> = doc
            .find_all("p")
            .into_iter()
            .filter(|&p| doc.text_content(p).as_deref() == Some("gone"))
            .collect();
        for p in gone {
            doc.detach(p);
        }
        assert_eq!(doc.normalize_body_text(), 3);
        let body = doc.body().unwrap();
        assert_eq!(doc.serialize(body, TextMode::Raw), "<body><h1>a</h1>\n\n<p>b</p></body>");
    }

    #[test]
    fn test_normalize_body_text_keeps_non_whitespace_lead() {
        let mut doc = Document::parse("<body>  lead <p>x</p></body>");
        assert_eq!(doc.normalize_body_text(), 0);
        let first = doc.body_children()[0];
        assert_eq!(doc.text_content(first).as_deref(), Some("lead "));
    }

    #[test]
    fn test_append_text() {
        let mut doc = Document::parse("<a href=\"x\">one</a>");
        let a = first(&doc, "a");
        doc.append_text(a, " two");
        assert_eq!(doc.text_content(a).as_deref(), Some("one two"));
    }
}
