// ABOUTME: Configuration options for CopyDoc including tokens, attribute policy and comment markers.
// ABOUTME: CopyDocBuilder provides a fluent API for constructing a CopyDoc with custom settings.

use serde::{Deserialize, Serialize};

use crate::cleaners::{AttributePolicy, COMMENT_ID_PREFIX, INLINE_COMMENT_MARKER};
use crate::copydoc::CopyDoc;
use crate::dom::TextMode;
use crate::error::{CopyDocError, Result};
use crate::extractors::{Token, TokenSpec};

/// Configuration options for a CopyDoc run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub tokens: TokenSpec,
    pub attribute_policy: AttributePolicy,
    pub comment_id_prefix: String,
    pub inline_comment_marker: String,
    pub text_mode: TextMode,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tokens: TokenSpec::new(),
            attribute_policy: AttributePolicy::default(),
            comment_id_prefix: COMMENT_ID_PREFIX.to_string(),
            inline_comment_marker: INLINE_COMMENT_MARKER.to_string(),
            text_mode: TextMode::Raw,
        }
    }
}

impl Options {
    /// Read options from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let opts: Options = serde_json::from_str(json).map_err(CopyDocError::options)?;
        opts.tokens.validate()?;
        Ok(opts)
    }
}

/// Builder for constructing CopyDoc instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct CopyDocBuilder {
    opts: Options,
}

impl CopyDocBuilder {
    /// Create a new CopyDocBuilder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of options.
    pub fn options(mut self, opts: Options) -> Self {
        self.opts = opts;
        self
    }

    /// Replace the token spec.
    pub fn tokens(mut self, tokens: TokenSpec) -> Self {
        self.opts.tokens = tokens;
        self
    }

    /// Append one marker/field pair.
    pub fn token(mut self, marker: impl Into<String>, field: impl Into<String>) -> Self {
        self.opts.tokens.push(Token::new(marker, field));
        self
    }

    /// Set the attribute whitelist.
    pub fn attribute_policy(mut self, policy: AttributePolicy) -> Self {
        self.opts.attribute_policy = policy;
        self
    }

    /// Set the id prefix identifying comment anchor links.
    pub fn comment_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.opts.comment_id_prefix = prefix.into();
        self
    }

    /// Set the leading marker of inline editorial comments.
    pub fn inline_comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.opts.inline_comment_marker = marker.into();
        self
    }

    /// Set how text nodes are written on output.
    pub fn text_mode(mut self, mode: TextMode) -> Self {
        self.opts.text_mode = mode;
        self
    }

    /// Parse and clean `html` with the configured options.
    pub fn parse(self, html: &str) -> CopyDoc {
        CopyDoc::with_options(html, self.opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = Options::default();
        assert_eq!(opts.comment_id_prefix, "cmnt");
        assert_eq!(opts.inline_comment_marker, "##");
        assert_eq!(opts.text_mode, TextMode::Raw);
        assert!(opts.tokens.is_empty());
        assert!(opts.attribute_policy.allowed("a").is_some());
    }

    #[test]
    fn test_from_json_partial() {
        let opts = Options::from_json(
            r#"{"text_mode": "escaped", "tokens": [{"marker": "BANNER", "field": "banner"}]}"#,
        )
        .unwrap();
        assert_eq!(opts.text_mode, TextMode::Escaped);
        assert_eq!(opts.tokens.len(), 1);
        assert_eq!(opts.comment_id_prefix, "cmnt");
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            Options::from_json("{"),
            Err(CopyDocError::Options(_))
        ));
        assert!(matches!(
            Options::from_json(r#"{"tokens": [{"marker": "", "field": "x"}]}"#),
            Err(CopyDocError::TokenSpec(_))
        ));
    }
}
