use crate::Portfolio;
use folio_domain::constants::{CLIENT_NAME, COMPLETED_DATE, PORTFOLIO, TECHNOLOGIES_USED};
use folio_domain::record::{Pagination, RecordId};
use folio_kernel::html::escape_html;
use serde::Serialize;
use std::collections::BTreeMap;

/// Columns the augmenter contributes, in order.
const PORTFOLIO_COLUMNS: [(&str, &str); 3] = [
    (CLIENT_NAME, "Client Name"),
    (COMPLETED_DATE, "Completed Date"),
    (TECHNOLOGIES_USED, "Technologies Used"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub key: String,
    pub label: String,
}

/// Ordered admin listing columns. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Columns(Vec<Column>);

impl Columns {
    /// Columns every record listing starts with.
    #[must_use]
    pub fn base() -> Self {
        let mut columns = Self::default();
        columns.set("cb", r#"<input type="checkbox" />"#);
        columns.set("title", "Title");
        columns.set("date", "Date");
        columns
    }

    /// Sets the label of `key`, appending the column if it is new.
    pub fn set(&mut self, key: impl Into<String>, label: impl Into<String>) {
        let key = key.into();
        let label = label.into();
        match self.0.iter_mut().find(|column| column.key == key) {
            Some(column) => column.label = label,
            None => self.0.push(Column { key, label }),
        }
    }

    #[must_use]
    pub fn label(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|column| column.key == key).map(|column| column.label.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|column| column.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, L: Into<String>> FromIterator<(K, L)> for Columns {
    fn from_iter<I: IntoIterator<Item = (K, L)>>(iter: I) -> Self {
        let mut columns = Self::default();
        for (key, label) in iter {
            columns.set(key, label);
        }
        columns
    }
}

/// Adds the client, completed-date and technologies columns.
///
/// Existing columns are kept in place; a pre-existing portfolio key only gets its label reset.
#[must_use]
pub fn augment_columns(mut columns: Columns) -> Columns {
    for (key, label) in PORTFOLIO_COLUMNS {
        columns.set(key, label);
    }
    columns
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminRow {
    pub id: RecordId,
    /// Column key to cell markup.
    pub cells: BTreeMap<String, String>,
}

/// What the generic record listing shows for portfolio records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminListing {
    pub columns: Columns,
    pub rows: Vec<AdminRow>,
}

impl Portfolio {
    /// Cell markup for a portfolio column, `None` for columns owned by someone else.
    #[must_use]
    pub fn render_column_cell(&self, key: &str, id: RecordId) -> Option<String> {
        let reader = self.reader();
        match key {
            CLIENT_NAME | COMPLETED_DATE => {
                Some(reader.text(id, key).map(|text| escape_html(&text).into_owned()).unwrap_or_default())
            }
            TECHNOLOGIES_USED => Some(
                reader
                    .list(id, key)
                    .map(|items| {
                        items.iter().map(|item| escape_html(item)).collect::<Vec<_>>().join(", ")
                    })
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    /// Full admin table: augmented base columns and one row per record, newest first.
    #[must_use]
    pub fn admin_listing(&self) -> AdminListing {
        let columns = augment_columns(Columns::base());
        let rows = self
            .store
            .query(PORTFOLIO, Pagination::All)
            .into_iter()
            .map(|id| {
                let cells = columns
                    .keys()
                    .map(|key| (key.to_owned(), self.generic_cell(key, id)))
                    .collect();
                AdminRow { id, cells }
            })
            .collect();

        AdminListing { columns, rows }
    }

    fn generic_cell(&self, key: &str, id: RecordId) -> String {
        if let Some(cell) = self.render_column_cell(key, id) {
            return cell;
        }
        match key {
            "cb" => format!(r#"<input type="checkbox" value="{id}" />"#),
            "title" => escape_html(&self.store.get_title(id)).into_owned(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn augment_appends_three_keys_in_order() {
        let columns = augment_columns(Columns::base());
        let keys: Vec<_> = columns.keys().collect();
        assert_eq!(
            keys,
            ["cb", "title", "date", "client_name", "completed_date", "technologies_used"]
        );
    }

    #[test]
    fn augment_relabels_existing_keys_in_place() {
        let columns: Columns = [("client_name", "Customer"), ("title", "Title")].into_iter().collect();
        let columns = augment_columns(columns);

        assert_eq!(columns.keys().next(), Some("client_name"));
        assert_eq!(columns.label("client_name"), Some("Client Name"));
        assert_eq!(columns.len(), 4);
    }
}
