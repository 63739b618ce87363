// ABOUTME: Prunes structurally empty elements left behind by other rewrites.
// ABOUTME: Void elements are exempt; ancestors emptied by a removal are pruned too.

use ego_tree::NodeId;

use crate::dom::Document;

/// Check if element is non-void with no children and no non-whitespace text
pub fn is_empty_element(doc: &Document, id: NodeId) -> bool {
    let Some(node) = doc.get(id) else {
        return false;
    };
    let Some(el) = node.value().as_element() else {
        return false;
    };
    if el.is_void() || node.has_children() {
        return false;
    }
    doc.text_content(id)
        .map_or(true, |text| text.trim().is_empty())
}

/// Remove `id` if it is empty, then walk up removing ancestors it emptied.
///
/// Never removes `stop` itself. Returns true if `id` was removed.
pub fn prune_empty(doc: &mut Document, id: NodeId, stop: NodeId) -> bool {
    if id == stop || !is_empty_element(doc, id) {
        return false;
    }

    let mut current = id;
    loop {
        let parent = doc.parent(current);
        doc.detach(current);
        tracing::trace!(?current, "pruned empty element");
        match parent {
            Some(parent) if parent != stop && is_empty_element(doc, parent) => current = parent,
            _ => break,
        }
    }
    true
}
