// ABOUTME: Metadata extraction from marker text embedded in the document.
// ABOUTME: Includes the token spec, write-once field map, and the builtin token table loader.

//! Metadata extraction module.
//!
//! Submodules:
//! - `tokens`: TokenSpec, Fields, and the per-node extractor.
//! - `loader`: builtin marker table embedded as JSON.

pub mod loader;
pub mod tokens;

pub use tokens::{extract_tokens, field_value, Fields, Token, TokenSpec};
