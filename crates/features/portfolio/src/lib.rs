//! Portfolio feature slice.
//!
//! Start-up runs three steps in order: [`register_type`], [`declare_fields`] and
//! [`wire`]. After that the [`Portfolio`] slice only reads from the store.

mod admin;
mod error;
mod render;
#[cfg(feature = "server")]
mod router;

pub use admin::{AdminListing, AdminRow, Column, Columns, augment_columns};
pub use error::{PortfolioError, PortfolioErrorExt};
#[cfg(feature = "server")]
pub use router::portfolio_router;

use folio_domain::config::RenderConfig;
use folio_domain::constants::{
    CLIENT_NAME, COMPLETED_DATE, GALLERY, PORTFOLIO, PORTFOLIO_FIELD_GROUP, PORTFOLIO_ITEMS,
    PROJECT_URL, SIZE_THUMBNAIL, TECHNOLOGIES_USED,
};
use folio_domain::portfolio::Technologies;
use folio_kernel::prelude::*;
use folio_store::SharedStore;
use std::sync::Arc;
use tracing::info;

/// Portfolio feature state
#[folio_derive::folio_slice]
pub struct Portfolio {
    store: SharedStore,
    fields: Option<Arc<FieldRegistry>>,
    render: RenderConfig,
}

impl Portfolio {
    pub(crate) fn reader(&self) -> FieldReader<'_> {
        FieldReader::new(self.store.as_ref(), self.fields.as_deref())
    }
}

/// Registration arguments of the `portfolio` content type.
#[must_use]
pub fn type_config() -> TypeConfig {
    TypeConfig {
        labels: TypeLabels::new("Portfolio", "Portfolios"),
        public: true,
        supports: Supports::TITLE | Supports::EDITOR | Supports::THUMBNAIL,
        has_archive: true,
        slug: PORTFOLIO.to_owned(),
        menu_position: Some(5),
        menu_icon: Some("dashicons-portfolio".to_owned()),
        show_in_rest: true,
        rest_base: None,
    }
}

/// The "Portfolio Details" field group, scoped to `portfolio` records.
#[must_use]
pub fn field_group() -> FieldGroup {
    FieldGroup::new(PORTFOLIO_FIELD_GROUP, "Portfolio Details", Location::post_type(PORTFOLIO))
        .field(FieldDeclaration::text("field_client_name", "Client Name", CLIENT_NAME))
        .field(FieldDeclaration::url("field_project_url", "Project URL", PROJECT_URL))
        .field(FieldDeclaration::date(
            "field_completed_date",
            "Completed Date",
            COMPLETED_DATE,
            "%d/%m/%Y",
        ))
        .field(FieldDeclaration::gallery("field_gallery", "Gallery", GALLERY, SIZE_THUMBNAIL))
        .field(FieldDeclaration::multi_select(
            "field_technologies_used",
            "Technologies Used",
            TECHNOLOGIES_USED,
            Technologies::vocabulary(),
        ))
}

/// Registers the `portfolio` content type.
///
/// # Errors
/// Fails if `portfolio` is already registered differently or its slug is taken.
pub fn register_type(types: &mut ContentTypeRegistry) -> Result<Registration, PortfolioError> {
    types.register_type(PORTFOLIO, type_config()).context("registering portfolio")
}

/// Declares the portfolio field group; a no-op when field management is absent.
pub fn declare_fields(fields: Option<&mut FieldRegistry>) -> Result<Declaration, PortfolioError> {
    declare_field_group(fields, field_group()).context("declaring portfolio fields")
}

/// Builds the slice over a populated store and the (optional) field registry.
#[must_use]
pub fn init(store: SharedStore, fields: Option<Arc<FieldRegistry>>, render: RenderConfig) -> Portfolio {
    info!(fields = fields.is_some(), "Portfolio slice initialized");
    Portfolio::new(PortfolioInner { store, fields, render })
}

/// Registers the `portfolio_items` placement directive.
pub fn wire(portfolio: &Portfolio, shortcodes: &mut ShortcodeRegistry) -> Result<(), PortfolioError> {
    let slice = portfolio.clone();
    shortcodes
        .register(PORTFOLIO_ITEMS, move |_| slice.render_listing())
        .context("wiring portfolio_items")
}
