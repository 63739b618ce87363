// ABOUTME: The CopyDoc document transformer: parses HTML, runs the rewrite passes, exposes output.
// ABOUTME: Pass order is spans, then links, then a single per-node pass over body descendants.

use std::fmt;

use ego_tree::NodeId;

use crate::cleaners::{
    merge_with_next, prune_empty, rewrite_spans, sanitize_attributes, strip_comment_anchor,
    strip_inline_comment, Blacklist,
};
use crate::dom::serialize::serialize_body;
use crate::dom::Document;
use crate::extractors::{extract_tokens, Fields, TokenSpec};
use crate::options::{CopyDocBuilder, Options};
use crate::result::CopyDocResult;

/// A cleaned word-processor export plus the fields pulled out of it.
///
/// All processing happens in the constructor; the accessors only read.
#[derive(Debug, Clone)]
pub struct CopyDoc {
    document: Document,
    fields: Fields,
    options: Options,
}

impl CopyDoc {
    /// Clean `html` with default options and no tokens.
    pub fn new(html: &str) -> Self {
        Self::with_options(html, Options::default())
    }

    /// Clean `html`, extracting the given tokens.
    pub fn with_tokens(html: &str, tokens: TokenSpec) -> Self {
        Self::with_options(
            html,
            Options {
                tokens,
                ..Options::default()
            },
        )
    }

    pub fn with_options(html: &str, options: Options) -> Self {
        let mut doc = Self {
            document: Document::parse(html),
            fields: Fields::new(),
            options,
        };
        doc.run();
        doc
    }

    pub fn builder() -> CopyDocBuilder {
        CopyDocBuilder::new()
    }

    fn run(&mut self) {
        let spans = rewrite_spans(&mut self.document);
        let blacklist = self.process_links();
        tracing::debug!(spans, merged = blacklist.len(), "rewrote spans and links");

        let Some(body) = self.document.body() else {
            return;
        };
        let removed = self.process_body(body, &blacklist);
        let joined = self.document.normalize_body_text();
        tracing::debug!(removed, joined, fields = self.fields.len(), "processed body");
    }

    /// Strip comment anchors and merge adjacent links, in document order.
    fn process_links(&mut self) -> Blacklist {
        let mut blacklist = Blacklist::new();
        for link in self.document.find_all("a") {
            if !self.document.is_attached(link) {
                continue;
            }
            if strip_comment_anchor(&mut self.document, link, &self.options.comment_id_prefix) {
                continue;
            }
            merge_with_next(&mut self.document, link, &mut blacklist);
        }
        blacklist
    }

    /// Apply the per-node rules to every element under body. Returns removed count.
    fn process_body(&mut self, body: NodeId, blacklist: &Blacklist) -> usize {
        let mut removed = 0;
        for id in self.document.descendant_elements(body) {
            // An ancestor was removed earlier in this pass
            if !self.document.is_within(id, body) {
                continue;
            }
            if self.apply_node_rules(id, body, blacklist) {
                removed += 1;
            }
        }
        removed
    }

    /// prune-empty, strip-inline-comment, sanitize, extract, blacklist. Stops once removed.
    fn apply_node_rules(&mut self, id: NodeId, body: NodeId, blacklist: &Blacklist) -> bool {
        let doc = &mut self.document;
        let opts = &self.options;

        if prune_empty(doc, id, body) {
            return true;
        }
        if strip_inline_comment(doc, id, body, &opts.inline_comment_marker) {
            return true;
        }
        sanitize_attributes(doc, id, &opts.attribute_policy);
        if extract_tokens(doc, id, &opts.tokens, &mut self.fields) {
            return true;
        }
        blacklist.sweep(doc, id)
    }

    /// The cleaned body HTML. Empty when the document has no body content.
    pub fn cleaned_html(&self) -> String {
        serialize_body(&self.document, self.options.text_mode)
    }

    /// All successfully extracted fields.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name)
    }

    /// The processed tree.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn to_result(&self) -> CopyDocResult {
        CopyDocResult {
            html: self.cleaned_html(),
            fields: self.fields.clone().into_map(),
        }
    }
}

impl fmt::Display for CopyDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cleaned_html())
    }
}
