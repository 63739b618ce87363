// ABOUTME: Merges adjacent links that point to the same destination.
// ABOUTME: Merged siblings go into a Blacklist for removal once the body pass reaches them.

use std::collections::HashMap;

use ego_tree::NodeId;

use super::attrs::unwrap_redirect;
use crate::dom::Document;

/// Nodes consumed by a merge, removed when the body pass reaches them.
///
/// Each entry records the surviving link the node was merged into, so a chain
/// of identical links collapses onto its first link.
#[derive(Debug, Default, Clone)]
pub struct Blacklist {
    merged_into: HashMap<NodeId, NodeId>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.merged_into.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.merged_into.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merged_into.is_empty()
    }

    /// The link that text merged "into `id`" should actually land on.
    fn head_of(&self, id: NodeId) -> NodeId {
        self.merged_into.get(&id).copied().unwrap_or(id)
    }

    fn mark(&mut self, id: NodeId, head: NodeId) {
        self.merged_into.insert(id, head);
    }

    /// Detach `id` if it is blacklisted. Returns true if it was removed.
    pub fn sweep(&self, doc: &mut Document, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        doc.detach(id);
        true
    }
}

/// If the node right after `link` is a link to the same destination, merge its text.
///
/// Destinations are the unwrapped `q` values, so two hrefs without a `q`
/// compare equal. Both links need an `href`. The sibling is marked in
/// `blacklist`, not removed. Returns true on merge.
pub fn merge_with_next(doc: &mut Document, link: NodeId, blacklist: &mut Blacklist) -> bool {
    let Some(next) = doc.next_sibling(link) else {
        return false;
    };
    if !doc.element(next).is_some_and(|el| el.is("a")) {
        return false;
    }

    let same_destination = match (doc.attr(link, "href"), doc.attr(next, "href")) {
        (Some(href), Some(next_href)) => unwrap_redirect(href) == unwrap_redirect(next_href),
        _ => false,
    };
    if !same_destination {
        return false;
    }

    let text = doc.text_content(next).unwrap_or_default();
    let head = blacklist.head_of(link);
    doc.append_text(head, text);
    blacklist.mark(next, head);
    tracing::trace!(?head, ?next, "merged adjacent link");
    true
}
