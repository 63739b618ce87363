// ABOUTME: Node-level rewrite rules applied by the CopyDoc pipeline.
// ABOUTME: Style-to-tag conversion, comment stripping, link merging, attribute sanitizing and pruning.

//! Rewrite rules over the document tree.
//!
//! Each rule is a free function over a `Document` and a node id. The order in
//! which they run is owned by [`crate::CopyDoc`].

pub mod attrs;
pub mod comments;
pub mod empty;
pub mod links;
pub mod style;

pub use attrs::{link_destination, sanitize_attributes, unwrap_redirect, AttributePolicy};
pub use comments::{
    strip_comment_anchor, strip_inline_comment, COMMENT_ID_PREFIX, INLINE_COMMENT_MARKER,
};
pub use empty::{is_empty_element, prune_empty};
pub use links::{merge_with_next, Blacklist};
pub use style::{parse_style, rewrite_span, rewrite_spans, Emphasis};
