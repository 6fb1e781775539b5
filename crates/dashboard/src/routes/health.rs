//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness response body.
#[derive(Debug, Serialize)]
pub struct Readiness {
    pub status: &'static str,
    pub records: usize,
    pub excluded_rows: usize,
}

/// Readiness health check endpoint.
///
/// The dataset is loaded before the server binds, so this reports what was
/// loaded. An empty dataset is reported as unavailable.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let dataset = state.dataset();
    let records = dataset.len();
    let status = if dataset.is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        status,
        Json(Readiness {
            status: if status.is_success() { "ok" } else { "empty" },
            records,
            excluded_rows: dataset.report().excluded_rows,
        }),
    )
}
