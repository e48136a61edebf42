use axum::Router;
use folio::kernel::server::ApiState;
use tower_http::trace::TraceLayer;

/// The complete HTTP surface with request tracing.
pub fn init(state: ApiState) -> Router {
    folio::server::router().layer(TraceLayer::new_for_http()).with_state(state)
}
