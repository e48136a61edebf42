use folio_domain::config::RenderConfig;
use folio_kernel::prelude::*;
use folio_kernel::domain::registry::InitializedSlice;
use folio_portfolio::{Portfolio, PortfolioError, declare_fields, init, register_type, type_config, wire};
use folio_store::{MemoryStore, SharedStore};
use std::sync::Arc;

#[test]
fn registers_the_portfolio_type() {
    let mut types = ContentTypeRegistry::default();
    assert_eq!(register_type(&mut types).unwrap(), Registration::Registered);
    assert_eq!(register_type(&mut types).unwrap(), Registration::Unchanged);

    let portfolio = types.get("portfolio").unwrap();
    assert_eq!(portfolio.config.labels.add_new_item, "Add New Portfolio");
    assert_eq!(portfolio.config.labels.menu_name, "Portfolio");
    assert_eq!(portfolio.config.menu_icon.as_deref(), Some("dashicons-portfolio"));
    assert!(portfolio.config.supports.contains(Supports::THUMBNAIL));
    assert_eq!(portfolio.rest_base(), "portfolio");
}

#[test]
fn conflicting_registration_is_fatal() {
    let mut types = ContentTypeRegistry::default();
    let mut other = type_config();
    other.public = false;
    types.register_type("portfolio", other).unwrap();

    let err = register_type(&mut types).unwrap_err();
    assert!(matches!(err, PortfolioError::Type { .. }));
    assert!(err.to_string().contains("registering portfolio"));
}

#[test]
fn fields_are_skipped_without_capability() {
    assert_eq!(declare_fields(None).unwrap(), Declaration::Skipped);

    let mut registry = FieldRegistry::default();
    assert_eq!(declare_fields(Some(&mut registry)).unwrap(), Declaration::Declared);
    assert_eq!(declare_fields(Some(&mut registry)).unwrap(), Declaration::Unchanged);
    assert_eq!(registry.fields_for("portfolio").count(), 5);
}

#[test]
fn wires_the_placement_directive_once() {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let portfolio = init(store, None, RenderConfig::default());
    let mut shortcodes = ShortcodeRegistry::default();

    wire(&portfolio, &mut shortcodes).unwrap();
    assert_eq!(
        shortcodes.expand("<main>[portfolio_items]</main>"),
        "<main><p>No portfolio items found.</p></main>"
    );
    assert!(matches!(wire(&portfolio, &mut shortcodes), Err(PortfolioError::Shortcode { .. })));
}

#[test]
fn slice_registers_by_type() {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let slice = InitializedSlice::new(init(store, None, RenderConfig::default()));
    assert_eq!(slice.id, std::any::TypeId::of::<Portfolio>());
    assert_eq!(slice.state.name(), "Portfolio");
    assert!(slice.downcast::<Portfolio>().is_some());
}
