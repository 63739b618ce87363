// ABOUTME: Main library entry point for the copydoc word-processor HTML cleaner.
// ABOUTME: Re-exports the public API: CopyDoc, CopyDocBuilder, Options, TokenSpec, Fields, Document, CopyDocError.

//! Copydoc - cleans HTML exported from a word processor into a small,
//! publication-safe subset and pulls out metadata written as marker lines.
//!
//! # Example
//!
//! ```
//! use digests_copydoc::{CopyDoc, TokenSpec};
//!
//! let tokens = TokenSpec::from_pairs([("HEADLINE", "headline")]);
//! let doc = CopyDoc::with_tokens(
//!     r#"<html><body><p>HEADLINE: Hello</p><p><span style="font-weight:700">Bold</span></p></body></html>"#,
//!     tokens,
//! );
//! assert_eq!(doc.field("headline"), Some("Hello"));
//! assert_eq!(doc.cleaned_html(), "<p><strong>Bold</strong></p>");
//! ```

pub mod cleaners;
pub mod copydoc;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod options;
pub mod result;

pub use crate::cleaners::AttributePolicy;
pub use crate::copydoc::CopyDoc;
pub use crate::dom::{Document, TextMode};
pub use crate::error::{CopyDocError, Result};
pub use crate::extractors::{Fields, Token, TokenSpec};
pub use crate::options::{CopyDocBuilder, Options};
pub use crate::result::CopyDocResult;
