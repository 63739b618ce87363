// ABOUTME: CopyDocResult struct holding the cleaned HTML and extracted fields.
// ABOUTME: Serializable snapshot of a finished CopyDoc run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The output of a CopyDoc run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyDocResult {
    pub html: String,
    pub fields: BTreeMap<String, String>,
}

impl CopyDocResult {
    /// Look up an extracted field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// True if nothing survived cleaning and no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.html.is_empty() && self.fields.is_empty()
    }
}
