// ABOUTME: Loader for the builtin story-metadata token table from embedded JSON data.
// ABOUTME: Provides TokenSpec::builtin() with the standard HEADLINE/SUBHED/PHOTOCREDIT/... markers.

use crate::extractors::tokens::TokenSpec;

/// Embedded JSON containing the builtin marker table.
const BUILTIN_TOKENS_JSON: &str = include_str!("../../data/tokens.json");

impl TokenSpec {
    /// Loads the builtin token table from embedded JSON.
    ///
    /// # Panics
    ///
    /// Panics if the embedded JSON is malformed or cannot be deserialized.
    pub fn builtin() -> TokenSpec {
        TokenSpec::from_json(BUILTIN_TOKENS_JSON).expect("failed to parse builtin tokens")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_builtin_tokens_succeeds() {
        let spec = TokenSpec::builtin();
        assert_eq!(spec.len(), 15);
    }

    #[test]
    fn builtin_tokens_contain_headline_first() {
        let spec = TokenSpec::builtin();
        let first = spec.iter().next().unwrap();
        assert_eq!(first.marker, "HEADLINE");
        assert_eq!(first.field, "headline");
    }

    #[test]
    fn builtin_tokens_map_photo_credits() {
        let spec = TokenSpec::builtin();
        let credit = spec.iter().find(|t| t.marker == "MOBILEPHOTOCREDIT");
        assert_eq!(credit.map(|t| t.field.as_str()), Some("mobile_credit"));
    }
}
