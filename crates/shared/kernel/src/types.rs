//! Content type registrar.
//!
//! A content type makes a record kind known to the store and the routing layer:
//! its labels, visibility, URL slug and REST exposure. Registration happens once at
//! process start; the registry is read-only afterwards.

use bitflags::bitflags;
use serde::Serialize;
use std::borrow::Cow;
use tracing::info;

const MAX_TYPE_NAME: usize = 20;

#[folio_derive::folio_error]
pub enum TypeError {
    #[error("Invalid content type name{}: {message}", format_context(.context))]
    InvalidName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Conflicting content type registration{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("URL slug already claimed{}: {message}", format_context(.context))]
    SlugTaken { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

bitflags! {
    /// Native record capabilities a content type opts into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Supports: u8 {
        const TITLE = 1 << 0;
        const EDITOR = 1 << 1;
        const THUMBNAIL = 1 << 2;
    }
}

/// Display labels of a content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeLabels {
    pub name: String,
    pub singular_name: String,
    pub add_new: String,
    pub add_new_item: String,
    pub edit_item: String,
    pub new_item: String,
    pub view_item: String,
    pub all_items: String,
    pub search_items: String,
    pub menu_name: String,
}

impl TypeLabels {
    /// Derives the full label set from a singular and a plural noun.
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        let singular = singular.into();
        let plural = plural.into();
        Self {
            add_new: "Add New".to_owned(),
            add_new_item: format!("Add New {singular}"),
            edit_item: format!("Edit {singular}"),
            new_item: format!("New {singular}"),
            view_item: format!("View {singular}"),
            all_items: format!("All {plural}"),
            search_items: format!("Search {plural}"),
            menu_name: singular.clone(),
            name: plural,
            singular_name: singular,
        }
    }
}

/// Registration arguments of a content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeConfig {
    pub labels: TypeLabels,
    pub public: bool,
    pub supports: Supports,
    pub has_archive: bool,
    /// URL slug of the archive and single views.
    pub slug: String,
    pub menu_position: Option<u32>,
    pub menu_icon: Option<String>,
    pub show_in_rest: bool,
    /// REST collection name; defaults to the type name.
    pub rest_base: Option<String>,
}

impl TypeConfig {
    /// A public type with title and body support, no archive, not exposed over REST.
    pub fn new(labels: TypeLabels, slug: impl Into<String>) -> Self {
        Self {
            labels,
            public: true,
            supports: Supports::TITLE | Supports::EDITOR,
            has_archive: false,
            slug: slug.into(),
            menu_position: None,
            menu_icon: None,
            show_in_rest: false,
            rest_base: None,
        }
    }
}

/// A registered content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    pub name: String,
    pub config: TypeConfig,
}

impl ContentType {
    #[must_use]
    pub fn rest_base(&self) -> &str {
        self.config.rest_base.as_deref().unwrap_or(&self.name)
    }
}

/// Outcome of [`ContentTypeRegistry::register_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Registered,
    /// Identical configuration was already registered.
    Unchanged,
}

/// All content types known to the site, in registration order.
#[derive(Debug, Default)]
pub struct ContentTypeRegistry {
    types: Vec<ContentType>,
}

impl ContentTypeRegistry {
    /// Makes `name` a known content type.
    ///
    /// # Errors
    /// * [`TypeError::InvalidName`] unless `name` is 1-20 lowercase ASCII letters, digits, `_` or `-`.
    /// * [`TypeError::Conflict`] if `name` exists with a different configuration.
    /// * [`TypeError::SlugTaken`] if another type already routes under the same slug.
    pub fn register_type(&mut self, name: &str, config: TypeConfig) -> Result<Registration, TypeError> {
        validate_name(name)?;

        if let Some(existing) = self.get(name) {
            if existing.config == config {
                return Ok(Registration::Unchanged);
            }
            return Err(TypeError::Conflict {
                message: format!("'{name}' is already registered with a different configuration")
                    .into(),
                context: None,
            });
        }

        if let Some(owner) = self.by_slug(&config.slug) {
            return Err(TypeError::SlugTaken {
                message: format!("'{}' is used by '{}'", config.slug, owner.name).into(),
                context: Some(format!("registering '{name}'").into()),
            });
        }

        info!(
            content_type = name,
            slug = %config.slug,
            archive = config.has_archive,
            rest = config.show_in_rest,
            "Content type registered"
        );
        self.types.push(ContentType { name: name.to_owned(), config });
        Ok(Registration::Registered)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ContentType> {
        self.types.iter().find(|t| t.name == name)
    }

    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&ContentType> {
        self.types.iter().find(|t| t.config.slug == slug)
    }

    #[must_use]
    pub fn by_rest_base(&self, rest_base: &str) -> Option<&ContentType> {
        self.types.iter().find(|t| t.config.show_in_rest && t.rest_base() == rest_base)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentType> {
        self.types.iter()
    }
}

fn validate_name(name: &str) -> Result<(), TypeError> {
    let valid_chars =
        name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if name.is_empty() || name.len() > MAX_TYPE_NAME || !valid_chars {
        return Err(TypeError::InvalidName {
            message: format!("'{name}' must be 1-{MAX_TYPE_NAME} chars of [a-z0-9_-]").into(),
            context: None,
        });
    }
    Ok(())
}
