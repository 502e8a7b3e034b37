use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        error::not_found,
        health::{healthz, livez},
        pages::{index, lindex},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// A request whose client goes away, or that exceeds `request_timeout`, has
/// its handler future dropped together with any store call still in flight.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/lindex", get(lindex))
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
