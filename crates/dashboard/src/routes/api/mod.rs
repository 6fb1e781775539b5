//! JSON API for the dashboard page script.

pub mod selection;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/selection", post(selection::update_selection))
        .route("/api/batches", get(selection::batches))
}
