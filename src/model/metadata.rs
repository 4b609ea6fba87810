//! Document metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical metadata field names, in document-info dictionary order.
pub const CANONICAL_FIELDS: [&str; 7] = [
    "Title",
    "Author",
    "Subject",
    "Creator",
    "Producer",
    "CreationDate",
    "ModDate",
];

/// Metadata key/value pairs exactly as read from the PDF.
pub type RawMetadata = Vec<(String, String)>;

/// Normalized document metadata.
///
/// Only canonical fields that carry a value are present; absent fields are
/// omitted from the JSON output rather than written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: BTreeMap<String, String>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Get a field value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Check whether a field is present.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Document title, if present.
    pub fn title(&self) -> Option<&str> {
        self.get("Title")
    }

    /// Document author, if present.
    pub fn author(&self) -> Option<&str> {
        self.get("Author")
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field is present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
