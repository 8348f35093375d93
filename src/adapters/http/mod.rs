//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own router; `api_router` merges them and adds
//! request tracing and a per-request timeout.

mod error;
pub mod reviews;
pub mod sessions;

use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub use error::{ErrorResponse, CORRELATION_HEADER};
pub use reviews::{review_routes, ReviewHandlers};
pub use sessions::{session_routes, SessionHandlers};

/// Full API router.
pub fn api_router(
    sessions: SessionHandlers,
    reviews: ReviewHandlers,
    request_timeout: Duration,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(session_routes(sessions))
        .merge(review_routes(reviews))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}
