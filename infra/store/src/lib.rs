//! # Entity Store
//!
//! The read contract the rest of the site relies on ([`EntityStore`]) and an
//! in-process implementation ([`MemoryStore`]) that also carries the authoring side:
//! validated inserts, legacy imports, removal and JSON seeding.
//!
//! Records are listed newest first. Ids are assigned on insert and never reused.
//!
//! ```rust
//! use folio_domain::portfolio::PortfolioDraft;
//! use folio_domain::record::Pagination;
//! use folio_store::{EntityStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let first = store.insert("portfolio", PortfolioDraft::new("First")).unwrap();
//! let second = store.insert("portfolio", PortfolioDraft::new("Second")).unwrap();
//!
//! assert_eq!(store.query("portfolio", Pagination::All), vec![second, first]);
//! assert_eq!(store.get_title(first), "First");
//! ```

mod error;
mod filter;
mod memory;

pub use error::{StoreError, StoreErrorExt};
pub use filter::{ContentFilter, ParagraphFilter};
pub use memory::{MemoryStore, RawEntry, SeedEntry, SeedRecord};

use folio_domain::record::{FieldValue, Pagination, RecordId};
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;

/// A sized rendition of a record's featured image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRef {
    pub url: String,
    pub alt: String,
    pub size: String,
}

/// Read operations the site performs against persisted records.
///
/// Implementations own consistency and isolation; callers never write through this trait.
pub trait EntityStore: Debug + Send + Sync {
    /// Ids of records of `kind`, newest first.
    fn query(&self, kind: &str, pagination: Pagination) -> Vec<RecordId>;

    /// Record type of `id`, if the record exists.
    fn kind_of(&self, id: RecordId) -> Option<String>;

    /// Raw structured field value.
    fn get_field(&self, id: RecordId, name: &str) -> Option<FieldValue>;

    /// Record title; empty for unknown ids.
    fn get_title(&self, id: RecordId) -> String;

    /// Featured image at `size`, falling back to the full-size asset.
    fn get_thumbnail(&self, id: RecordId, size: &str) -> Option<AssetRef>;

    /// Record body, optionally passed through the content filter chain.
    fn get_body(&self, id: RecordId, apply_content_filters: bool) -> String;
}

/// Shared handle used by features and the HTTP surface.
pub type SharedStore = Arc<dyn EntityStore>;
