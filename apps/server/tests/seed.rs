use folio::domain::config::FolioConfig;
use folio::domain::record::Pagination;
use folio::store::EntityStore;
use folio_server::Server;
use std::io::Write;

#[test]
fn builds_from_a_seed_file() {
    let mut seed = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        seed,
        r#"[
            {{"kind": "portfolio", "draft": {{"title": "Seeded", "technologies": ["CSS"]}}}},
            {{"kind": "portfolio", "raw": {{"title": "Legacy", "fields": {{"technologies_used": "CSS"}}}}}}
        ]"#
    )
    .unwrap();

    let mut cfg = FolioConfig::default();
    cfg.store.seed = Some(seed.path().to_path_buf());
    let server = Server::builder().config(cfg).build().unwrap();

    let ids = server.state().store.query("portfolio", Pagination::All);
    assert_eq!(ids.len(), 2);
    assert_eq!(server.state().store.get_title(ids[0]), "Legacy");
}

#[test]
fn missing_seed_fails_start_up() {
    let mut cfg = FolioConfig::default();
    cfg.store.seed = Some("does/not/exist.json".into());

    let err = Server::builder().config(cfg).build().unwrap_err();
    assert!(err.to_string().contains("Failed to seed the store"));
}

#[test]
fn seeded_bodies_run_the_snippet_filter() {
    let mut seed = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(seed, r#"[{{"kind": "portfolio", "draft": {{"title": "Seeded", "body": "See [year]"}}}}]"#).unwrap();

    let mut cfg = FolioConfig::default();
    cfg.store.seed = Some(seed.path().to_path_buf());
    cfg.content.snippets.insert("year".to_owned(), "2024".to_owned());
    let server = Server::builder().config(cfg).build().unwrap();

    let store = &server.state().store;
    let id = store.query("portfolio", Pagination::All)[0];
    assert_eq!(store.get_body(id, true), "<p>See 2024</p>");
    assert_eq!(store.get_body(id, false), "See [year]");
}

#[test]
fn invalid_snippet_name_fails_start_up() {
    let mut cfg = FolioConfig::default();
    cfg.content.snippets.insert("not valid".to_owned(), String::new());

    let err = Server::builder().config(cfg).build().unwrap_err();
    assert!(err.to_string().contains("Invalid content snippets"));
}
