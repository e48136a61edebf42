//! Structured field schemas attached to content types.
//!
//! Field groups are pure configuration, declared once during start-up. The
//! field-management capability is optional: when it is absent
//! ([`declare_field_group`] receives `None`) declarations are skipped and every read
//! through [`FieldReader`] returns absent.

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use folio_domain::record::{Attachment, FieldValue, RecordId};
use folio_store::EntityStore;
use serde::Serialize;
use std::borrow::Cow;
use tracing::{info, warn};

/// Date layouts accepted from storage, tried in order.
const STORED_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

#[folio_derive::folio_error]
pub enum FieldError {
    #[error("Invalid field group{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Conflicting field group{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Field type with its type-specific options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Url,
    /// `return_format` is a `strftime` pattern applied on read.
    Date { return_format: String },
    Gallery { preview_size: String },
    MultiSelect { choices: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDeclaration {
    pub key: String,
    pub label: String,
    pub name: String,
    #[serde(flatten)]
    pub field_type: FieldType,
}

impl FieldDeclaration {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        name: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        Self { key: key.into(), label: label.into(), name: name.into(), field_type }
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(key, label, name, FieldType::Text)
    }

    pub fn url(key: impl Into<String>, label: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(key, label, name, FieldType::Url)
    }

    pub fn date(
        key: impl Into<String>,
        label: impl Into<String>,
        name: impl Into<String>,
        return_format: impl Into<String>,
    ) -> Self {
        Self::new(key, label, name, FieldType::Date { return_format: return_format.into() })
    }

    pub fn gallery(
        key: impl Into<String>,
        label: impl Into<String>,
        name: impl Into<String>,
        preview_size: impl Into<String>,
    ) -> Self {
        Self::new(key, label, name, FieldType::Gallery { preview_size: preview_size.into() })
    }

    pub fn multi_select<I, S>(
        key: impl Into<String>,
        label: impl Into<String>,
        name: impl Into<String>,
        choices: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices = choices.into_iter().map(Into::into).collect();
        Self::new(key, label, name, FieldType::MultiSelect { choices })
    }

    /// Coerces a raw stored value into this field's shape. Mismatches read as absent.
    #[must_use]
    pub fn coerce(&self, raw: &FieldValue) -> Option<FieldValue> {
        match &self.field_type {
            FieldType::Text => raw.as_text().map(FieldValue::from),
            FieldType::Url => raw
                .as_text()
                .filter(|text| url::Url::parse(text).is_ok())
                .map(FieldValue::from),
            FieldType::Date { return_format } => {
                let text = raw.as_text()?;
                let value = parse_stored_date(text)
                    .map_or_else(|| text.to_owned(), |date| date.format(return_format).to_string());
                Some(FieldValue::Text(value))
            }
            FieldType::Gallery { .. } => raw.as_images().map(|images| FieldValue::Images(images.to_vec())),
            FieldType::MultiSelect { choices } => raw.as_list().map(|items| {
                FieldValue::List(items.iter().filter(|item| choices.contains(*item)).cloned().collect())
            }),
        }
    }
}

fn parse_stored_date(text: &str) -> Option<NaiveDate> {
    STORED_DATE_FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(text.trim(), fmt).ok())
}

/// A single `param == value` condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRule {
    pub param: String,
    pub value: String,
}

/// Where a field group applies: any of the AND-groups must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub any_of: Vec<Vec<LocationRule>>,
}

impl Location {
    /// Restricts to records of one content type.
    pub fn post_type(kind: impl Into<String>) -> Self {
        Self {
            any_of: vec![vec![LocationRule {
                param: folio_domain::constants::POST_TYPE_PARAM.to_owned(),
                value: kind.into(),
            }]],
        }
    }

    #[must_use]
    pub fn or(mut self, other: Self) -> Self {
        self.any_of.extend(other.any_of);
        self
    }

    /// Whether records of `kind` fall under this location. Unknown params never match.
    #[must_use]
    pub fn matches(&self, kind: &str) -> bool {
        self.any_of.iter().any(|rules| {
            !rules.is_empty()
                && rules.iter().all(|rule| {
                    rule.param == folio_domain::constants::POST_TYPE_PARAM && rule.value == kind
                })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldGroup {
    pub key: String,
    pub title: String,
    pub fields: Vec<FieldDeclaration>,
    pub location: Location,
}

impl FieldGroup {
    pub fn new(key: impl Into<String>, title: impl Into<String>, location: Location) -> Self {
        Self { key: key.into(), title: title.into(), fields: Vec::new(), location }
    }

    #[must_use]
    pub fn field(mut self, field: FieldDeclaration) -> Self {
        self.fields.push(field);
        self
    }

    fn validate(&self) -> Result<(), FieldError> {
        let invalid = |message: String| FieldError::Invalid {
            message: message.into(),
            context: Some(format!("group '{}'", self.key).into()),
        };

        if self.key.is_empty() {
            return Err(invalid("group key must not be empty".to_owned()));
        }

        for (index, field) in self.fields.iter().enumerate() {
            if field.key.is_empty() || field.name.is_empty() {
                return Err(invalid(format!("field #{index} needs a key and a name")));
            }
            let earlier = &self.fields[..index];
            if earlier.iter().any(|f| f.key == field.key) {
                return Err(invalid(format!("duplicate field key '{}'", field.key)));
            }
            if earlier.iter().any(|f| f.name == field.name) {
                return Err(invalid(format!("duplicate field name '{}'", field.name)));
            }
            match &field.field_type {
                FieldType::MultiSelect { choices } if choices.is_empty() => {
                    return Err(invalid(format!("multi-select '{}' has no choices", field.name)));
                }
                FieldType::Date { return_format }
                    if StrftimeItems::new(return_format).any(|item| matches!(item, Item::Error)) =>
                {
                    return Err(invalid(format!(
                        "date '{}' has an invalid return format '{return_format}'",
                        field.name
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Outcome of a field group declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    Declared,
    /// The identical group was already declared.
    Unchanged,
    /// The field-management capability is absent.
    Skipped,
}

/// Declared field groups, in declaration order.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    groups: Vec<FieldGroup>,
}

impl FieldRegistry {
    /// # Errors
    /// [`FieldError::Invalid`] for malformed groups, [`FieldError::Conflict`] when the
    /// group key is taken by a different group.
    pub fn declare(&mut self, group: FieldGroup) -> Result<Declaration, FieldError> {
        group.validate()?;

        if let Some(existing) = self.groups.iter().find(|g| g.key == group.key) {
            if *existing == group {
                return Ok(Declaration::Unchanged);
            }
            return Err(FieldError::Conflict {
                message: format!("'{}' is already declared with different fields", group.key).into(),
                context: None,
            });
        }

        info!(group = %group.key, fields = group.fields.len(), "Field group declared");
        self.groups.push(group);
        Ok(Declaration::Declared)
    }

    pub fn groups(&self) -> impl Iterator<Item = &FieldGroup> {
        self.groups.iter()
    }

    /// Declaration of field `name` as seen by records of `kind`.
    #[must_use]
    pub fn field_for<'a>(&'a self, kind: &str, name: &str) -> Option<&'a FieldDeclaration> {
        self.groups
            .iter()
            .filter(|group| group.location.matches(kind))
            .flat_map(|group| group.fields.iter())
            .find(|field| field.name == name)
    }

    pub fn fields_for<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a FieldDeclaration> {
        self.groups
            .iter()
            .filter(move |group| group.location.matches(kind))
            .flat_map(|group| group.fields.iter())
    }
}

/// Declares `group` if the field-management capability is present.
///
/// # Errors
/// Propagates [`FieldRegistry::declare`] failures.
pub fn declare_field_group(
    registry: Option<&mut FieldRegistry>,
    group: FieldGroup,
) -> Result<Declaration, FieldError> {
    let Some(registry) = registry else {
        warn!(group = %group.key, "Field management unavailable, skipping field group");
        return Ok(Declaration::Skipped);
    };
    registry.declare(group)
}

/// Typed field access for rendering code.
///
/// Reads are coerced through the declared field type. Without a registry, or for a
/// field that is not declared for the record's type, every read is absent.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    store: &'a dyn EntityStore,
    registry: Option<&'a FieldRegistry>,
}

impl<'a> FieldReader<'a> {
    pub fn new(store: &'a dyn EntityStore, registry: Option<&'a FieldRegistry>) -> Self {
        Self { store, registry }
    }

    #[must_use]
    pub fn get(&self, id: RecordId, name: &str) -> Option<FieldValue> {
        let registry = self.registry?;
        let kind = self.store.kind_of(id)?;
        let declaration = registry.field_for(&kind, name)?;
        let raw = self.store.get_field(id, name)?;
        declaration.coerce(&raw)
    }

    #[must_use]
    pub fn text(&self, id: RecordId, name: &str) -> Option<String> {
        match self.get(id, name)? {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn list(&self, id: RecordId, name: &str) -> Option<Vec<String>> {
        match self.get(id, name)? {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn images(&self, id: RecordId, name: &str) -> Option<Vec<Attachment>> {
        match self.get(id, name)? {
            FieldValue::Images(images) => Some(images),
            FieldValue::List(items) if items.is_empty() => Some(Vec::new()),
            _ => None,
        }
    }
}
