//! Portfolio records: the technology vocabulary, the authoring draft and the rendered payload.

use crate::constants::{CLIENT_NAME, COMPLETED_DATE, GALLERY, PROJECT_URL, TECHNOLOGIES_USED};
use crate::record::{Attachment, FieldValue, RecordId};
use bitflags::bitflags;
use chrono::NaiveDate;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Technologies a project was built with. Drawn from a fixed vocabulary.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Technologies: u8 {
        const HTML = 1 << 0;
        const CSS = 1 << 1;
        const JAVASCRIPT = 1 << 2;
        const PHP = 1 << 3;
        const WORDPRESS = 1 << 4;
        const REACT = 1 << 5;
    }
}

/// Display names in vocabulary order.
pub const TECHNOLOGY_VOCABULARY: [(Technologies, &str); 6] = [
    (Technologies::HTML, "HTML"),
    (Technologies::CSS, "CSS"),
    (Technologies::JAVASCRIPT, "JavaScript"),
    (Technologies::PHP, "PHP"),
    (Technologies::WORDPRESS, "WordPress"),
    (Technologies::REACT, "React"),
];

impl Technologies {
    /// Parses one vocabulary name. Matching is exact.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        TECHNOLOGY_VOCABULARY.iter().find(|(_, label)| *label == name).map(|(flag, _)| *flag)
    }

    /// Parses a list of names, returning the first unknown name on failure.
    pub fn from_names<I, S>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().try_fold(Self::empty(), |acc, name| {
            Self::parse(name.as_ref()).map(|flag| acc | flag).ok_or_else(|| name.as_ref().to_owned())
        })
    }

    /// Names of the set members in vocabulary order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        TECHNOLOGY_VOCABULARY
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, label)| *label)
            .collect()
    }

    /// Every vocabulary name, used as the multi-select choice list.
    #[must_use]
    pub fn vocabulary() -> Vec<&'static str> {
        Self::all().names()
    }
}

impl Serialize for Technologies {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let names = self.names();
        let mut seq = serializer.serialize_seq(Some(names.len()))?;
        for name in names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Technologies {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NamesVisitor;

        impl<'de> Visitor<'de> for NamesVisitor {
            type Value = Technologies;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of technology names")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut set = Technologies::empty();
                while let Some(name) = seq.next_element::<String>()? {
                    let flag = Technologies::parse(&name).ok_or_else(|| {
                        de::Error::custom(format!("unknown technology '{name}'"))
                    })?;
                    set |= flag;
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(NamesVisitor)
    }
}

/// Authoring input for a portfolio record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioDraft {
    pub title: String,
    /// Rich text; may embed shortcodes expanded by content filters.
    pub body: String,
    pub thumbnail: Option<Attachment>,
    pub client_name: Option<String>,
    pub project_url: Option<String>,
    pub completed_date: Option<NaiveDate>,
    pub technologies: Technologies,
    pub gallery: Vec<Attachment>,
}

impl PortfolioDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn thumbnail(mut self, thumbnail: Attachment) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }

    #[must_use]
    pub fn client_name(mut self, client: impl Into<String>) -> Self {
        self.client_name = Some(client.into());
        self
    }

    #[must_use]
    pub fn project_url(mut self, url: impl Into<String>) -> Self {
        self.project_url = Some(url.into());
        self
    }

    #[must_use]
    pub const fn completed_date(mut self, date: NaiveDate) -> Self {
        self.completed_date = Some(date);
        self
    }

    #[must_use]
    pub const fn technologies(mut self, technologies: Technologies) -> Self {
        self.technologies = technologies;
        self
    }

    #[must_use]
    pub fn gallery(mut self, gallery: Vec<Attachment>) -> Self {
        self.gallery = gallery;
        self
    }

    /// Structured fields as the store persists them. Absent optionals are omitted.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        let mut fields = Vec::with_capacity(5);
        if let Some(client) = &self.client_name {
            fields.push((CLIENT_NAME, FieldValue::Text(client.clone())));
        }
        if let Some(url) = &self.project_url {
            fields.push((PROJECT_URL, FieldValue::Text(url.clone())));
        }
        if let Some(date) = self.completed_date {
            fields.push((COMPLETED_DATE, FieldValue::Text(date.format("%Y-%m-%d").to_string())));
        }
        if !self.technologies.is_empty() {
            let names = self.technologies.names().into_iter().map(str::to_owned).collect();
            fields.push((TECHNOLOGIES_USED, FieldValue::List(names)));
        }
        if !self.gallery.is_empty() {
            fields.push((GALLERY, FieldValue::Images(self.gallery.clone())));
        }
        fields
    }
}

/// Structured payload of one rendered portfolio record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: RecordId,
    pub title: String,
    pub thumbnail: Option<String>,
    pub client_name: Option<String>,
    pub project_url: Option<String>,
    pub completed_date: Option<String>,
    pub technologies: Vec<String>,
    pub gallery: Vec<Attachment>,
    /// Body after content filters.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_vocabulary_order() {
        let set = Technologies::REACT | Technologies::HTML;
        assert_eq!(set.names(), vec!["HTML", "React"]);
    }

    #[test]
    fn from_names_rejects_unknown() {
        assert_eq!(
            Technologies::from_names(["CSS", "JavaScript"]),
            Ok(Technologies::CSS | Technologies::JAVASCRIPT)
        );
        assert_eq!(Technologies::from_names(["CSS", "Cobol"]), Err("Cobol".to_owned()));
    }

    #[test]
    fn draft_fields_skip_absent_values() {
        let draft = PortfolioDraft::new("Acme").client_name("Acme");
        let fields = draft.fields();
        assert_eq!(fields, vec![(CLIENT_NAME, FieldValue::Text("Acme".to_owned()))]);
    }
}
