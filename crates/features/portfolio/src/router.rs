use crate::Portfolio;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use folio_domain::constants::PORTFOLIO;
use folio_kernel::server::ApiState;
use tracing::warn;

/// Archive, REST and admin routes of the portfolio type.
pub fn portfolio_router() -> Router<ApiState> {
    Router::new()
        .route("/{slug}", get(archive))
        .route("/api/{rest_base}", get(collection))
        .route("/admin/{kind}", get(admin))
}

fn slice(state: &ApiState) -> Result<&Portfolio, Response> {
    state.try_get_slice::<Portfolio>().map_err(|err| {
        warn!(error = %err, "Portfolio slice not registered");
        (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
    })
}

fn not_found() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

async fn archive(State(state): State<ApiState>, Path(slug): Path<String>) -> Response {
    let archived = state
        .types
        .by_slug(&slug)
        .is_some_and(|ty| ty.name == PORTFOLIO && ty.config.has_archive);
    if !archived {
        return not_found();
    }
    match slice(&state) {
        Ok(portfolio) => Html(portfolio.render_listing()).into_response(),
        Err(response) => response,
    }
}

async fn collection(State(state): State<ApiState>, Path(rest_base): Path<String>) -> Response {
    if !state.types.by_rest_base(&rest_base).is_some_and(|ty| ty.name == PORTFOLIO) {
        return not_found();
    }
    match slice(&state) {
        Ok(portfolio) => Json(portfolio.collect_items()).into_response(),
        Err(response) => response,
    }
}

async fn admin(State(state): State<ApiState>, Path(kind): Path<String>) -> Response {
    if kind != PORTFOLIO || state.types.get(&kind).is_none() {
        return not_found();
    }
    match slice(&state) {
        Ok(portfolio) => Json(portfolio.admin_listing()).into_response(),
        Err(response) => response,
    }
}
