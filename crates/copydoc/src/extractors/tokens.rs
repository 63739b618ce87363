// ABOUTME: Marker-token metadata extraction: TokenSpec, write-once Fields, and the per-node extractor.
// ABOUTME: A node whose text starts with a marker sets the field (text after the first colon) and is removed.

//! Token/field extraction.
//!
//! Key behaviors:
//! - Tokens are tried in spec order; a field that is already set is skipped.
//! - The value is the text after the first `:`, trimmed (the whole trimmed
//!   text when there is no colon).
//! - Every token is tried against the node; it is detached if any matched.

use std::collections::BTreeMap;

use ego_tree::NodeId;
use serde::{Deserialize, Serialize};

use crate::dom::Document;
use crate::error::{CopyDocError, Result};

/// A marker prefix and the field it fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub marker: String,
    pub field: String,
}

impl Token {
    pub fn new(marker: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            field: field.into(),
        }
    }
}

/// Ordered list of (marker, field) pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSpec(Vec<Token>);

impl TokenSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a spec from `(marker, field)` pairs.
    pub fn from_pairs<I, M, F>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (M, F)>,
        M: Into<String>,
        F: Into<String>,
    {
        Self(pairs.into_iter().map(|(m, f)| Token::new(m, f)).collect())
    }

    /// Parse a JSON array of `{"marker": .., "field": ..}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: TokenSpec = serde_json::from_str(json).map_err(CopyDocError::token_spec)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Reject empty markers and field names.
    pub fn validate(&self) -> Result<()> {
        for token in &self.0 {
            if token.marker.is_empty() {
                return Err(CopyDocError::token_spec(format!(
                    "empty marker for field {:?}",
                    token.field
                )));
            }
            if token.field.is_empty() {
                return Err(CopyDocError::token_spec(format!(
                    "empty field name for marker {:?}",
                    token.marker
                )));
            }
        }
        Ok(())
    }

    pub fn push(&mut self, token: Token) {
        self.0.push(token);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<M: Into<String>, F: Into<String>> FromIterator<(M, F)> for TokenSpec {
    fn from_iter<I: IntoIterator<Item = (M, F)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<'a> IntoIterator for &'a TokenSpec {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Extracted field values. Each field is written at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, String>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` only if it has no value yet. Returns true if it was set.
    pub fn set_once(&mut self, field: impl Into<String>, value: impl Into<String>) -> bool {
        match self.0.entry(field.into()) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }
}

/// Value carried by a marker line: text after the first colon, trimmed.
pub fn field_value(text: &str) -> String {
    text.split_once(':')
        .map_or(text, |(_, rest)| rest)
        .trim()
        .to_string()
}

/// Try every token against `id`, setting each unset field whose marker matches.
///
/// The node is detached once all tokens were tried if any of them matched.
/// Nodes without a textual form are skipped. Returns true if the node was removed.
pub fn extract_tokens(doc: &mut Document, id: NodeId, spec: &TokenSpec, fields: &mut Fields) -> bool {
    if spec.is_empty() {
        return false;
    }
    let Some(text) = doc.text_content(id) else {
        return false;
    };

    let mut matched = false;
    for token in spec {
        if token.marker.is_empty() || fields.contains(&token.field) {
            continue;
        }
        if text.starts_with(&token.marker) {
            let value = field_value(&text);
            tracing::debug!(field = %token.field, %value, "extracted field");
            fields.set_once(token.field.clone(), value);
            matched = true;
        }
    }
    if matched {
        doc.detach(id);
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_value() {
        assert_eq!(field_value("HEADLINE: this is a headline"), "this is a headline");
        assert_eq!(
            field_value("AUDIOURL: http://play.example.com/a.mp3?x=1"),
            "http://play.example.com/a.mp3?x=1"
        );
        assert_eq!(field_value("  NOCOLON here "), "NOCOLON here");
    }

    #[test]
    fn test_fields_set_once() {
        let mut fields = Fields::new();
        assert!(fields.set_once("headline", "first"));
        assert!(!fields.set_once("headline", "second"));
        assert_eq!(fields.get("headline"), Some("first"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_extract_removes_node() {
        let mut doc = Document::parse("<body><p>HEADLINE: this is a headline</p><p>Body</p></body>");
        let spec = TokenSpec::from_pairs([("HEADLINE", "headline")]);
        let mut fields = Fields::new();
        let p = doc.find_all("p")[0];
        assert!(extract_tokens(&mut doc, p, &spec, &mut fields));
        assert_eq!(fields.get("headline"), Some("this is a headline"));
        assert_eq!(doc.body_elements().len(), 1);
    }

    #[test]
    fn test_first_match_wins() {
        let mut doc = Document::parse("<body><p>BANNER: one</p><p>BANNER: two</p></body>");
        let spec = TokenSpec::from_pairs([("BANNER", "banner")]);
        let mut fields = Fields::new();
        for p in doc.find_all("p") {
            extract_tokens(&mut doc, p, &spec, &mut fields);
        }
        assert_eq!(fields.get("banner"), Some("one"));
        // The second marker line stays in the document
        assert_eq!(doc.body_elements().len(), 1);
    }

    #[test]
    fn test_overlapping_markers_all_set() {
        let mut doc = Document::parse("<body><p>PHOTOCREDIT: jane</p></body>");
        let spec = TokenSpec::from_pairs([("PHOTO", "p"), ("PHOTOCREDIT", "pc")]);
        let mut fields = Fields::new();
        let p = doc.find_all("p")[0];
        assert!(extract_tokens(&mut doc, p, &spec, &mut fields));
        assert_eq!(fields.get("p"), Some("jane"));
        assert_eq!(fields.get("pc"), Some("jane"));
        assert!(doc.body_elements().is_empty());
    }

    #[test]
    fn test_marker_must_prefix_text() {
        let mut doc = Document::parse("<body><p>The HEADLINE: is not here</p></body>");
        let spec = TokenSpec::from_pairs([("HEADLINE", "headline")]);
        let mut fields = Fields::new();
        let p = doc.find_all("p")[0];
        assert!(!extract_tokens(&mut doc, p, &spec, &mut fields));
        assert!(fields.is_empty());
    }

    #[test]
    fn test_from_json_rejects_empty_marker() {
        let err = TokenSpec::from_json(r#"[{"marker": "", "field": "x"}]"#).unwrap_err();
        assert!(matches!(err, CopyDocError::TokenSpec(_)));
        assert!(TokenSpec::from_json("not json").is_err());
    }

    #[test]
    fn test_from_json_round_trip_order() {
        let spec = TokenSpec::from_json(
            r#"[{"marker": "HEADLINE", "field": "headline"}, {"marker": "SUBHED", "field": "subhed"}]"#,
        )
        .unwrap();
        let markers: Vec<&str> = spec.iter().map(|t| t.marker.as_str()).collect();
        assert_eq!(markers, vec!["HEADLINE", "SUBHED"]);
    }
}
