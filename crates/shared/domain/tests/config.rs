use folio_domain::config::{FieldsConfig, FolioConfig, RenderConfig, ServerConfig, StoreConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4680);

    assert!(StoreConfig::default().seed.is_none());
    assert!(FieldsConfig::default().enabled);

    let render = RenderConfig::default();
    assert_eq!(render.thumbnail_size, "medium");
    assert_eq!(render.gallery_size, "thumbnail");
    assert_eq!(render.empty_message, "No portfolio items found.");
}

#[test]
fn folio_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "store": { "seed": "/tmp/seed.json" },
        "fields": { "enabled": false },
        "content": { "snippets": { "cta": "<a href=\"/contact\">Contact</a>" } }
    });

    let cfg: FolioConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.store.seed.as_deref(), Some(std::path::Path::new("/tmp/seed.json")));
    assert!(!cfg.fields.enabled);
    assert_eq!(cfg.render.thumbnail_size, "medium");
    assert_eq!(cfg.content.snippets.get("cta").map(String::as_str), Some(r#"<a href="/contact">Contact</a>"#));
}

#[test]
fn deref_mut_detaches_clones() {
    let original = FolioConfig::default();
    let mut edited = original.clone();
    edited.server.port = 9000;

    assert_eq!(original.server.port, 4680);
    assert_eq!(edited.server.port, 9000);
}
