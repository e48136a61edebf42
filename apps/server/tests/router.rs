use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use folio::domain::config::FolioConfig;
use folio::domain::portfolio::{PortfolioDraft, Technologies};
use folio::store::{MemoryStore, ParagraphFilter, SharedStore};
use folio_server::{Server, content_store, router};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> axum::Router {
    let store = MemoryStore::new().with_filter(ParagraphFilter);
    store
        .insert(
            "portfolio",
            PortfolioDraft::new("Acme Site")
                .client_name("Acme <Corp>")
                .project_url("https://acme.test")
                .technologies(Technologies::HTML | Technologies::REACT)
                .body("Built in a week."),
        )
        .unwrap();
    store.insert("portfolio", PortfolioDraft::new("Second")).unwrap();

    let store: SharedStore = Arc::new(store);
    let server = Server::builder().store(store).build().unwrap();
    router::init(server.state().clone())
}

async fn get(uri: &str) -> (StatusCode, String) {
    send(Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn send(request: Request<Body>) -> (StatusCode, String) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn health_reports_up() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "up");
}

#[tokio::test]
async fn archive_renders_the_listing() {
    let (status, body) = get("/portfolio").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(r#"<div class="portfolio-items">"#));
    assert!(body.find("<h3>Second</h3>").unwrap() < body.find("<h3>Acme Site</h3>").unwrap());
    assert!(body.contains("Acme &lt;Corp&gt;"));
    assert!(body.contains(r#"<div class="portfolio-content"><p>Built in a week.</p></div>"#));
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let (status, _) = get("/projects").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shortcode_endpoint_matches_archive() {
    let (_, archive) = get("/portfolio").await;
    let (status, shortcode) = get("/shortcodes/portfolio_items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shortcode, archive);

    let (status, _) = get("/shortcodes/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn render_expands_templates() {
    let request = Request::post("/render")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("<main>[portfolio_items]</main>[unknown]"))
        .unwrap();
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(r#"<main><div class="portfolio-items">"#));
    assert!(body.ends_with("</main>[unknown]"));
}

#[tokio::test]
async fn rest_payload_is_structured() {
    let (status, body) = get("/api/portfolio").await;
    assert_eq!(status, StatusCode::OK);

    let items: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(items.as_array().map(Vec::len), Some(2));
    assert_eq!(items[1]["clientName"], "Acme <Corp>");
    assert_eq!(items[1]["technologies"], serde_json::json!(["HTML", "React"]));
}

#[tokio::test]
async fn admin_listing_has_augmented_columns() {
    let (status, body) = get("/admin/portfolio").await;
    assert_eq!(status, StatusCode::OK);

    let listing: serde_json::Value = serde_json::from_str(&body).unwrap();
    let keys: Vec<_> = listing["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|column| column["key"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(keys[3..], ["client_name", "completed_date", "technologies_used"]);
    assert_eq!(listing["rows"][1]["cells"]["technologies_used"], "HTML, React");

    let (status, _) = get("/admin/page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bodies_expand_configured_snippets() {
    let mut cfg = FolioConfig::default();
    cfg.content.snippets.insert("cta".to_owned(), r#"<a href="/contact">Contact us</a>"#.to_owned());

    let store = content_store(&cfg).unwrap();
    store
        .insert(
            "portfolio",
            PortfolioDraft::new("Snippets").body("Built with care.\n\n[cta]\n\n[portfolio_items]"),
        )
        .unwrap();
    let store: SharedStore = Arc::new(store);
    let server = Server::builder().config(cfg).store(store).build().unwrap();

    let request = Request::get("/portfolio").body(Body::empty()).unwrap();
    let response = router::init(server.state().clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();

    assert!(body.contains(
        "<div class=\"portfolio-content\"><p>Built with care.</p>\n<p><a href=\"/contact\">Contact us</a></p>\n<p>[portfolio_items]</p></div>"
    ));
    assert_eq!(body.matches(r#"<div class="portfolio-items">"#).count(), 1);
}
