// ABOUTME: Attribute whitelist enforcement and redirect-URL unwrapping.
// ABOUTME: Keeps only per-tag allowed attributes and replaces redirect hrefs with their `q` destination.

use std::collections::BTreeMap;

use ego_tree::NodeId;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::dom::Document;

// Relative hrefs are resolved against this so their query can still be read
static RELATIVE_BASE: Lazy<Url> = Lazy::new(|| Url::parse("http://localhost/").unwrap());

/// Per-tag table of attributes allowed to survive sanitization.
///
/// Tags absent from the table lose all attributes. Tag names are stored
/// lowercase however the table was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct AttributePolicy {
    tags: BTreeMap<String, Vec<String>>,
}

impl AttributePolicy {
    /// A policy that strips every attribute.
    pub fn empty() -> Self {
        Self {
            tags: BTreeMap::new(),
        }
    }

    /// Allow `attrs` on `tag` (replacing any previous entry).
    pub fn allow<I, S>(mut self, tag: impl Into<String>, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.insert(
            tag.into().to_ascii_lowercase(),
            attrs.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn allowed(&self, tag: &str) -> Option<&[String]> {
        self.tags
            .get(&tag.to_ascii_lowercase())
            .map(|attrs| attrs.as_slice())
    }
}

impl From<BTreeMap<String, Vec<String>>> for AttributePolicy {
    fn from(tags: BTreeMap<String, Vec<String>>) -> Self {
        tags.into_iter()
            .fold(Self::empty(), |policy, (tag, attrs)| policy.allow(tag, attrs))
    }
}

impl From<AttributePolicy> for BTreeMap<String, Vec<String>> {
    fn from(policy: AttributePolicy) -> Self {
        policy.tags
    }
}

impl Default for AttributePolicy {
    fn default() -> Self {
        Self::empty()
            .allow("a", ["href"])
            .allow("img", ["src", "alt"])
    }
}

/// Values of the `q` query parameter of `href`, in order.
///
/// Empty when the href cannot be parsed or carries no non-empty `q`.
pub fn unwrap_redirect(href: &str) -> Vec<String> {
    let Ok(parsed) = Url::options().base_url(Some(&*RELATIVE_BASE)).parse(href) else {
        return Vec::new();
    };
    parsed
        .query_pairs()
        .filter(|(k, v)| k == "q" && !v.is_empty())
        .map(|(_, v)| v.into_owned())
        .collect()
}

/// The real destination of a link: its first `q` value.
pub fn link_destination(href: &str) -> Option<String> {
    unwrap_redirect(href).into_iter().next()
}

/// Drop attributes not allowed by `policy`, unwrapping `a[href]` on the way.
///
/// An `a` keeps `href` only when it unwraps to a destination. The value
/// becomes the first `q` value; later repeats of `q` are discarded. Kept
/// attributes are emitted in the policy's order.
pub fn sanitize_attributes(doc: &mut Document, id: NodeId, policy: &AttributePolicy) {
    doc.with_element_mut(id, |el| {
        let Some(allowed) = policy.allowed(&el.name) else {
            el.attrs.clear();
            return;
        };
        let kept: Vec<(String, String)> = allowed
            .iter()
            .filter_map(|name| {
                let value = el.attr(name)?;
                let value = if el.is("a") && name.eq_ignore_ascii_case("href") {
                    link_destination(value)?
                } else {
                    value.to_string()
                };
                Some((name.clone(), value))
            })
            .collect();
        el.attrs = kept;
    });
}
