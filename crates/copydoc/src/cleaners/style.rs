// ABOUTME: Converts inline-styled spans into semantic emphasis tags.
// ABOUTME: Wraps in em, strong and u (in that order) based on the style attribute, then unwraps the span.

use ego_tree::NodeId;

use crate::dom::{Document, Element};

/// Emphasis detected in a `style` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Emphasis {
    pub italic: bool,
    pub bold: bool,
    pub underline: bool,
}

/// Parse `prop:value;prop:value` declarations.
pub fn parse_style(style: &str) -> Emphasis {
    let mut emphasis = Emphasis::default();
    for decl in style.split(';') {
        let Some((prop, value)) = decl.split_once(':') else {
            continue;
        };
        let prop = prop.trim().to_ascii_lowercase();
        let value = value.trim().to_ascii_lowercase();
        match prop.as_str() {
            "font-style" if value == "italic" => emphasis.italic = true,
            "font-weight" if value == "bold" || value == "700" => emphasis.bold = true,
            "text-decoration" | "text-decoration-line" => {
                if value.split_whitespace().any(|v| v == "underline") {
                    emphasis.underline = true;
                }
            }
            _ => {}
        }
    }
    emphasis
}

/// Wrap a span according to its style, then replace it with its children.
///
/// Each wrapper wraps the previous result: italic+bold+underline yields
/// `<u><strong><em>..</em></strong></u>`.
pub fn rewrite_span(doc: &mut Document, span: NodeId) {
    let emphasis = doc
        .attr(span, "style")
        .map(parse_style)
        .unwrap_or_default();

    let mut outer = span;
    for (enabled, tag) in [
        (emphasis.italic, "em"),
        (emphasis.bold, "strong"),
        (emphasis.underline, "u"),
    ] {
        if enabled {
            if let Some(wrapper) = doc.wrap(outer, Element::new(tag)) {
                outer = wrapper;
            }
        }
    }

    doc.unwrap_node(span);
}

/// Rewrite every span in the document. Returns the number of spans processed.
pub fn rewrite_spans(doc: &mut Document) -> usize {
    let spans = doc.find_all("span");
    for &span in &spans {
        rewrite_span(doc, span);
    }
    spans.len()
}
