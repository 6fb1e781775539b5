//! HTTP route handlers for the allocations dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health          - Liveness check
//! GET  /health/ready    - Readiness check (dataset loaded)
//!
//! # Dashboard
//! GET  /                - Dashboard page (`item`, `filter` query params)
//! GET  /export.csv      - Displayed batches as a CSV download
//!
//! # API
//! POST /api/selection   - Highlight rows, returns recomputed totals
//! GET  /api/batches     - Current selection as JSON
//! ```

pub mod api;
pub mod dashboard;
pub mod export;
pub mod health;

use axum::{Router, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Create the page and API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/", get(dashboard::index))
        .route("/export.csv", get(export::download))
        .merge(api::router())
}

/// Build the full application router with request tracing.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
