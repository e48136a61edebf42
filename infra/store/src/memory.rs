//! In-memory store with the authoring side (insert, import, remove, seed).

use crate::error::{StoreError, StoreErrorExt};
use crate::filter::ContentFilter;
use crate::{AssetRef, EntityStore};
use folio_domain::constants::{PROJECT_URL, TECHNOLOGIES_USED};
use folio_domain::portfolio::{PortfolioDraft, Technologies};
use folio_domain::record::{Attachment, FieldValue, Pagination, RecordId};
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// A record as stored: native columns plus loosely typed structured fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawEntry {
    pub title: String,
    pub body: String,
    pub thumbnail: Option<Attachment>,
    pub fields: BTreeMap<String, FieldValue>,
}

impl RawEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

/// One element of a JSON seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEntry {
    pub kind: String,
    #[serde(flatten)]
    pub record: SeedRecord,
}

/// Seed payload: a validated draft or a legacy raw entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedRecord {
    Draft(PortfolioDraft),
    Raw(RawEntry),
}

#[derive(Debug, Clone)]
struct Entry {
    kind: String,
    raw: RawEntry,
}

#[derive(Debug, Default)]
struct State {
    last_id: u64,
    entries: BTreeMap<RecordId, Entry>,
}

/// Thread-safe in-memory [`EntityStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
    filters: Vec<Box<dyn ContentFilter>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pass to the content filter chain. Filters run in insertion order.
    #[must_use]
    pub fn with_filter(mut self, filter: impl ContentFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the configured content filters, in order.
    pub fn filters(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.filters.iter().map(|f| f.name())
    }

    /// Persists a validated draft.
    ///
    /// # Errors
    /// Returns [`StoreError::Validation`] for an empty kind, an empty title or a
    /// project URL that does not parse.
    pub fn insert(&self, kind: &str, draft: PortfolioDraft) -> Result<RecordId, StoreError> {
        let fields = draft.fields().into_iter().map(|(name, value)| (name.to_owned(), value)).collect();
        let raw = RawEntry { title: draft.title, body: draft.body, thumbnail: draft.thumbnail, fields };

        self.insert_raw(kind, raw)
    }

    /// Persists a loosely typed entry (legacy imports).
    ///
    /// A textual project URL must parse and a technology list must stay inside the
    /// vocabulary. Values of any other shape are kept as written; readers treat them
    /// as absent.
    ///
    /// # Errors
    /// Returns [`StoreError::Validation`] for an empty kind, an empty title, a malformed
    /// project URL or an unknown technology.
    pub fn insert_raw(&self, kind: &str, raw: RawEntry) -> Result<RecordId, StoreError> {
        if kind.trim().is_empty() {
            return Err(StoreError::Validation {
                message: "record kind cannot be empty".into(),
                context: None,
            });
        }
        if raw.title.trim().is_empty() {
            return Err(StoreError::Validation {
                message: "title cannot be empty".into(),
                context: Some(format!("kind '{kind}'").into()),
            });
        }
        validate_fields(&raw.fields)?;

        let mut state = self.state.write();
        state.last_id += 1;
        let id = RecordId(state.last_id);
        state.entries.insert(id, Entry { kind: kind.to_owned(), raw });

        debug!(%id, kind, "Record stored");
        Ok(id)
    }

    /// Deletes a record. Its id is never handed out again.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] when no record has this id.
    pub fn remove(&self, id: RecordId) -> Result<(), StoreError> {
        let removed = self.state.write().entries.remove(&id);
        if removed.is_none() {
            return Err(StoreError::NotFound { message: id.to_string().into(), context: None });
        }
        debug!(%id, "Record removed");
        Ok(())
    }

    /// Snapshot of a stored entry.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<RawEntry> {
        self.state.read().entries.get(&id).map(|entry| entry.raw.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Loads a JSON array of [`SeedEntry`] values.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] or [`StoreError::Seed`] when the file cannot be read or
    /// parsed, and [`StoreError::Validation`] for the first rejected entry.
    pub fn load_seed(&self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .context(format!("Failed to read seed file {}", path.display()))?;
        let entries: Vec<SeedEntry> = serde_json::from_str(&raw)
            .context(format!("Failed to parse seed file {}", path.display()))?;

        let count = entries.len();
        for (index, entry) in entries.into_iter().enumerate() {
            match entry.record {
                SeedRecord::Draft(draft) => self.insert(&entry.kind, draft),
                SeedRecord::Raw(raw) => self.insert_raw(&entry.kind, raw),
            }
            .context(format!("seed entry #{index}"))?;
        }

        info!(path = %path.display(), count, "Store seeded");
        Ok(count)
    }

    fn with_entry<T>(&self, id: RecordId, f: impl FnOnce(&Entry) -> T) -> Option<T> {
        self.state.read().entries.get(&id).map(f)
    }
}

fn validate_fields(fields: &BTreeMap<String, FieldValue>) -> Result<(), StoreError> {
    if let Some(FieldValue::Text(project_url)) = fields.get(PROJECT_URL) {
        url::Url::parse(project_url).map_err(|e| StoreError::Validation {
            message: format!("project URL '{project_url}' is malformed: {e}").into(),
            context: None,
        })?;
    }
    if let Some(FieldValue::List(names)) = fields.get(TECHNOLOGIES_USED) {
        Technologies::from_names(names).map_err(|name| StoreError::Validation {
            message: format!("technology '{name}' is not in the vocabulary").into(),
            context: None,
        })?;
    }
    Ok(())
}

impl EntityStore for MemoryStore {
    fn query(&self, kind: &str, pagination: Pagination) -> Vec<RecordId> {
        let state = self.state.read();
        let matching = state.entries.iter().rev().filter(|(_, e)| e.kind == kind).map(|(id, _)| *id);

        match pagination {
            Pagination::All => matching.collect(),
            Pagination::Page { number: 0, .. } => Vec::new(),
            Pagination::Page { number, per_page } => matching
                .skip((number - 1).saturating_mul(per_page))
                .take(per_page)
                .collect(),
        }
    }

    fn kind_of(&self, id: RecordId) -> Option<String> {
        self.with_entry(id, |entry| entry.kind.clone())
    }

    fn get_field(&self, id: RecordId, name: &str) -> Option<FieldValue> {
        self.with_entry(id, |entry| entry.raw.fields.get(name).cloned()).flatten()
    }

    fn get_title(&self, id: RecordId) -> String {
        self.with_entry(id, |entry| entry.raw.title.clone()).unwrap_or_default()
    }

    fn get_thumbnail(&self, id: RecordId, size: &str) -> Option<AssetRef> {
        self.with_entry(id, |entry| {
            entry.raw.thumbnail.as_ref().map(|image| AssetRef {
                url: image.size_url(size).to_owned(),
                alt: image.alt.clone(),
                size: size.to_owned(),
            })
        })
        .flatten()
    }

    fn get_body(&self, id: RecordId, apply_content_filters: bool) -> String {
        let Some(body) = self.with_entry(id, |entry| entry.raw.body.clone()) else {
            return String::new();
        };
        if !apply_content_filters {
            return body;
        }
        self.filters.iter().fold(body, |content, filter| filter.apply(&content))
    }
}
