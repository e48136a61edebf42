use chrono::NaiveDate;
use folio_domain::config::RenderConfig;
use folio_domain::portfolio::{PortfolioDraft, Technologies};
use folio_domain::record::{Attachment, FieldValue};
use folio_kernel::prelude::*;
use folio_portfolio::{Portfolio, declare_fields, init};
use folio_store::{MemoryStore, RawEntry, SharedStore};
use std::sync::Arc;

fn site(store: MemoryStore, with_fields: bool) -> Portfolio {
    let mut registry = FieldRegistry::default();
    declare_fields(with_fields.then_some(&mut registry)).unwrap();
    let fields = with_fields.then(|| Arc::new(registry));
    let store: SharedStore = Arc::new(store);
    init(store, fields, RenderConfig::default())
}

fn acme() -> PortfolioDraft {
    PortfolioDraft::new("Acme Site")
        .client_name("Acme <Corp>")
        .project_url("https://acme.test")
        .completed_date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        .technologies(Technologies::HTML | Technologies::REACT)
}

#[test]
fn acme_scenario() {
    let store = MemoryStore::new();
    let id = store.insert("portfolio", acme()).unwrap();
    let portfolio = site(store, true);

    let html = portfolio.render_item(id);

    assert!(html.contains("<p><strong>Client:</strong> Acme &lt;Corp&gt;</p>"));
    assert!(html.contains(
        r#"<a href="https://acme.test" target="_blank" rel="noopener noreferrer">https://acme.test</a>"#
    ));
    assert!(html.contains("<p><strong>Technologies:</strong> HTML, React</p>"));
    assert!(html.contains("<p><strong>Completed:</strong> 05/01/2024</p>"));
    assert!(!html.contains("portfolio-gallery"));
    assert!(!html.contains("Acme <Corp>"));
}

#[test]
fn scalars_are_escaped() {
    let store = MemoryStore::new();
    let entry = RawEntry::new(r#"Tom & "Jerry" <b>"#)
        .field("client_name", r#"<script>alert("x")</script>"#)
        .field("completed_date", "soon & later");
    let id = store.insert_raw("portfolio", entry).unwrap();
    let html = site(store, true).render_item(id);

    assert!(html.contains("<h3>Tom &amp; &quot;Jerry&quot; &lt;b&gt;</h3>"));
    assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"));
    assert!(html.contains("<p><strong>Completed:</strong> soon &amp; later</p>"));
    assert!(!html.contains("<script>"));
}

#[test]
fn absent_technologies_and_empty_gallery_are_omitted() {
    let store = MemoryStore::new();
    let id = store.insert("portfolio", PortfolioDraft::new("Bare").gallery(Vec::new())).unwrap();
    let html = site(store, true).render_item(id);

    assert!(!html.contains("Technologies"));
    assert!(!html.contains("portfolio-gallery"));
    assert!(html.contains("<p><strong>Client:</strong> </p>"));
    assert!(html.contains(r#"<a href="" target="_blank""#));
}

#[test]
fn gallery_uses_thumbnail_renditions() {
    let store = MemoryStore::new();
    let gallery = vec![
        Attachment::new("/full/a.png", "First \"shot\"").with_size("thumbnail", "/thumb/a.png"),
        Attachment::new("/full/b.png", "Second"),
    ];
    let id = store.insert("portfolio", PortfolioDraft::new("Shots").gallery(gallery)).unwrap();
    let html = site(store, true).render_item(id);

    assert!(html.contains(
        r#"<div class="portfolio-gallery"><img src="/thumb/a.png" alt="First &quot;shot&quot;" /><img src="/full/b.png" alt="Second" /></div>"#
    ));
}

#[test]
fn thumbnail_and_body_are_rendered() {
    let store = MemoryStore::new();
    let thumbnail = Attachment::new("/full/cover.png", "Cover").with_size("medium", "/medium/cover.png");
    let draft = PortfolioDraft::new("Covered").thumbnail(thumbnail).body("<em>Trusted</em> markup");
    let id = store.insert("portfolio", draft).unwrap();
    let html = site(store, true).render_item(id);

    assert!(html.starts_with(
        r#"<div class="portfolio-item"><img src="/medium/cover.png" class="attachment-medium size-medium" alt="Cover" /><h3>Covered</h3>"#
    ));
    assert!(html.ends_with(r#"<div class="portfolio-content"><em>Trusted</em> markup</div></div>"#));
}

#[test]
fn empty_listing_is_a_single_placeholder() {
    let html = site(MemoryStore::new(), true).render_listing();
    assert_eq!(html, "<p>No portfolio items found.</p>");
}

#[test]
fn listing_keeps_query_order() {
    let store = MemoryStore::new();
    for title in ["One", "Two", "Three"] {
        store.insert("portfolio", PortfolioDraft::new(title)).unwrap();
    }
    store.insert_raw("page", RawEntry::new("Not a portfolio")).unwrap();
    let html = site(store, true).render_listing();

    assert!(html.starts_with(r#"<div class="portfolio-items">"#));
    assert_eq!(html.matches(r#"<div class="portfolio-item">"#).count(), 3);
    let three = html.find("<h3>Three</h3>").unwrap();
    let two = html.find("<h3>Two</h3>").unwrap();
    let one = html.find("<h3>One</h3>").unwrap();
    assert!(three < two && two < one);
    assert!(!html.contains("Not a portfolio"));
}

#[test]
fn missing_field_capability_degrades() {
    let store = MemoryStore::new();
    let id = store.insert("portfolio", acme()).unwrap();
    let html = site(store, false).render_item(id);

    assert!(html.contains("<h3>Acme Site</h3>"));
    assert!(html.contains("<p><strong>Client:</strong> </p>"));
    assert!(!html.contains("Technologies"));
}

#[test]
fn malformed_legacy_values_are_ignored() {
    let store = MemoryStore::new();
    let entry = RawEntry::new("Legacy")
        .field("technologies_used", "HTML")
        .field("gallery", FieldValue::List(vec!["a.png".into()]))
        .field("project_url", "javascript:alert(1)");
    let id = store.insert_raw("portfolio", entry).unwrap();
    let html = site(store, true).render_item(id);

    assert!(!html.contains("Technologies"));
    assert!(!html.contains("portfolio-gallery"));
    assert!(!html.contains("javascript"));
}

#[test]
fn collected_items_mirror_the_listing() {
    let store = MemoryStore::new();
    let first = store.insert("portfolio", acme()).unwrap();
    let second = store.insert("portfolio", PortfolioDraft::new("Second")).unwrap();
    let portfolio = site(store, true);

    let items = portfolio.collect_items();
    let ids: Vec<_> = items.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![second, first]);

    let acme = &items[1];
    assert_eq!(acme.client_name.as_deref(), Some("Acme <Corp>"));
    assert_eq!(acme.technologies, vec!["HTML", "React"]);

    let json = serde_json::to_value(acme).unwrap();
    assert_eq!(json["projectUrl"], "https://acme.test");
}
