//! Row highlight and selection API handlers.

use askama::Template;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use soh_allocations_core::{AvailabilityFilter, BatchView, ControllerState, InputEvent, Totals};

use crate::{error::AppError, filters, state::AppState};

/// Request for highlighting rows.
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    /// Positions in the displayed rows; empty clears the highlight.
    pub indices: Vec<usize>,
}

/// Response for a highlight change.
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub totals: Totals,
    /// Rendered totals block, ready to swap into the page.
    pub summary_html: String,
}

/// Current selection snapshot.
#[derive(Debug, Serialize)]
pub struct BatchesResponse {
    pub state: ControllerState,
    pub item: String,
    pub filter: AvailabilityFilter,
    pub title: String,
    pub highlight: Vec<usize>,
    pub batches: Vec<BatchView>,
    pub totals: Totals,
}

/// Totals block partial.
#[derive(Template)]
#[template(path = "partials/summary.html")]
pub struct SummaryTemplate {
    pub totals: Totals,
}

/// Replace the highlighted rows and return the recomputed totals.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if an index is outside the displayed rows.
#[instrument(skip(state))]
pub async fn update_selection(
    State(state): State<AppState>,
    Json(body): Json<SelectionRequest>,
) -> Result<Json<SelectionResponse>, AppError> {
    let mut session = state.session().await;

    let rows = session.displayed_rows();
    if let Some(bad) = body.indices.iter().find(|&&idx| idx >= rows) {
        return Err(AppError::BadRequest(format!(
            "highlight index {bad} out of range for {rows} displayed rows"
        )));
    }

    let totals = session
        .dispatch(InputEvent::HighlightChanged(body.indices))
        .totals;
    let summary_html = SummaryTemplate { totals }.render()?;

    Ok(Json(SelectionResponse {
        totals,
        summary_html,
    }))
}

/// Return the current selection.
#[instrument(skip(state))]
pub async fn batches(State(state): State<AppState>) -> Json<BatchesResponse> {
    let session = state.session().await;
    let controller = session.controller();
    let view = session.view();

    Json(BatchesResponse {
        state: session.state(),
        item: controller.item_id().to_string(),
        filter: controller.filter(),
        title: view.title.clone(),
        highlight: controller.highlight().to_vec(),
        batches: view.batches.clone(),
        totals: view.totals,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::routes::app;
    use crate::test_support::state;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn post_selection(indices: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/selection")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "indices": indices }).to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_highlight_recomputes_totals() {
        let router = app(state());
        send(&router, get("/?item=1001")).await;

        let (status, body) = send(&router, post_selection(&json!([1]))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totals"]["system_qty_sum"], "5");
        assert_eq!(body["totals"]["reserved_qty_sum"], "0");
        let html = body["summary_html"].as_str().unwrap();
        assert!(html.contains("Total system qty"));

        let (_, body) = send(&router, post_selection(&json!([]))).await;
        assert_eq!(body["totals"]["system_qty_sum"], "15");
    }

    #[tokio::test]
    async fn test_out_of_range_highlight_is_rejected() {
        let router = app(state());
        send(&router, get("/?item=1001")).await;

        let (status, _) = send(&router, post_selection(&json!([2]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_batches_snapshot() {
        let router = app(state());

        let (_, idle) = send(&router, get("/api/batches")).await;
        assert_eq!(idle["state"], "idle");
        assert_eq!(idle["title"], "Allocations Report");

        send(&router, get("/?item=1001&filter=unavailable")).await;
        let (status, body) = send(&router, get("/api/batches")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "displaying");
        assert_eq!(body["filter"], "unavailable");
        assert_eq!(body["batches"].as_array().unwrap().len(), 1);
        assert_eq!(body["batches"][0]["bdc"], "QCLOCK");
        assert_eq!(body["batches"][0]["status"], "not_allocated");
    }
}
