use super::{ApiState, health};
use crate::shortcode::Attributes;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use tracing::debug;

/// Host-level routes: health and placement directive rendering.
pub fn system_router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/shortcodes/{name}", get(render_shortcode))
        .route("/render", post(render_template))
}

async fn render_shortcode(State(state): State<ApiState>, Path(name): Path<String>) -> Response {
    if !state.shortcodes.contains(&name) {
        return (StatusCode::NOT_FOUND, format!("Unknown shortcode: {name}")).into_response();
    }
    match state.shortcodes.render(&name, &Attributes::new()) {
        Ok(markup) => Html(markup).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

async fn render_template(State(state): State<ApiState>, body: String) -> Html<String> {
    debug!(bytes = body.len(), "Expanding template");
    Html(state.shortcodes.expand(&body).into_owned())
}
