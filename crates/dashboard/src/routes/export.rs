//! CSV download of the displayed batches.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use soh_allocations_core::export;

use crate::{error::AppError, state::AppState};

/// Download filename for the current item.
fn export_filename(item_id: &str) -> String {
    if item_id.is_empty() {
        "allocations.csv".to_string()
    } else {
        format!("allocations-{item_id}.csv")
    }
}

/// Export the displayed batches as CSV.
///
/// # Errors
///
/// Returns an error if CSV serialization fails.
#[instrument(skip(state))]
pub async fn download(State(state): State<AppState>) -> Result<Response, AppError> {
    let session = state.session().await;
    let batches = &session.view().batches;
    let csv = export::to_csv_string(batches)?;
    let filename = export_filename(session.controller().item_id());

    tracing::info!(rows = batches.len(), %filename, "Exporting batches");

    Ok((
        StatusCode::OK,
        [
            ("Content-Type", "text/csv"),
            (
                "Content-Disposition",
                &format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
