//! Store-level record primitives: identifiers, raw field values, assets and pagination.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Store-assigned record identifier. Monotonic and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// An image asset with its named renditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    /// Full-size asset URL.
    pub url: String,
    pub alt: String,
    /// Rendition name (`thumbnail`, `medium`, ...) to URL.
    pub sizes: BTreeMap<String, String>,
}

impl Attachment {
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self { url: url.into(), alt: alt.into(), sizes: BTreeMap::new() }
    }

    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>, url: impl Into<String>) -> Self {
        self.sizes.insert(size.into(), url.into());
        self
    }

    /// URL of the requested rendition, falling back to the full-size asset.
    #[must_use]
    pub fn size_url(&self, size: &str) -> &str {
        self.sizes.get(size).map_or(self.url.as_str(), String::as_str)
    }
}

/// A raw field value as persisted by the store.
///
/// Nothing guarantees the shape matches the declared field type; readers coerce
/// and treat mismatches as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Images(Vec<Attachment>),
}

impl FieldValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_images(&self) -> Option<&[Attachment]> {
        match self {
            Self::Images(images) => Some(images),
            // An empty sequence deserializes as a list; it is still an empty gallery.
            Self::List(items) if items.is_empty() => Some(<&[Attachment]>::default()),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<Attachment>> for FieldValue {
    fn from(images: Vec<Attachment>) -> Self {
        Self::Images(images)
    }
}

/// How many record ids a query returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pagination {
    /// Unbounded.
    #[default]
    All,
    /// 1-based page of `per_page` ids. Page `0` is always empty.
    Page { number: usize, per_page: usize },
}
