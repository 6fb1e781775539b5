//! Dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use soh_allocations_core::{AvailabilityFilter, BatchView, Controller, Totals};

use crate::{
    components::{FilterOption, ScatterPlot, TableColumn, availability_options, batch_columns},
    error::AppError,
    filters,
    session::DashboardView,
    state::AppState,
};

/// Query parameters for the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Item number as typed.
    pub item: Option<String>,
    /// Availability filter value or label.
    pub filter: Option<String>,
}

impl DashboardQuery {
    /// Parse the filter parameter; a blank value means "unchanged".
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown filter.
    pub fn availability_filter(&self) -> Result<Option<AvailabilityFilter>, AppError> {
        match self.filter.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<AvailabilityFilter>()
                .map(Some)
                .map_err(AppError::BadRequest),
        }
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub title: String,
    pub item: String,
    pub filter: AvailabilityFilter,
    /// Highlighted row positions, restored into the page script.
    pub highlight: Vec<usize>,
    pub filter_options: Vec<FilterOption>,
    pub columns: [TableColumn; 7],
    pub batches: Vec<BatchView>,
    pub totals: Totals,
    pub plot: ScatterPlot,
    pub record_count: usize,
}

impl DashboardTemplate {
    fn new(
        view: &DashboardView,
        controller: &Controller,
        record_count: usize,
    ) -> Self {
        let filter = controller.filter();
        Self {
            title: view.title.clone(),
            item: controller.item_id().to_string(),
            filter,
            highlight: controller.highlight().to_vec(),
            filter_options: availability_options(filter),
            columns: batch_columns(),
            batches: view.batches.clone(),
            totals: view.totals,
            plot: ScatterPlot::layout(&view.batches),
            record_count,
        }
    }
}

/// Dashboard page handler.
///
/// Applies the `item` and `filter` parameters to the shared session, then
/// renders whatever the session published.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<DashboardTemplate, AppError> {
    let filter = query.availability_filter()?;

    let mut session = state.session().await;
    session.apply_inputs(query.item.as_deref(), filter);

    Ok(DashboardTemplate::new(
        session.view(),
        session.controller(),
        state.dataset().len(),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::routes::app;
    use crate::test_support::state;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn get(uri: &str) -> (StatusCode, String) {
        let response = app(state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_filter_param_parsing() {
        let query = DashboardQuery {
            item: None,
            filter: Some("Not available batches".to_string()),
        };
        assert_eq!(
            query.availability_filter().unwrap(),
            Some(AvailabilityFilter::UnavailableOnly)
        );

        let blank = DashboardQuery {
            item: None,
            filter: Some("  ".to_string()),
        };
        assert_eq!(blank.availability_filter().unwrap(), None);

        let bad = DashboardQuery {
            item: None,
            filter: Some("some".to_string()),
        };
        assert!(matches!(
            bad.availability_filter(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_idle_page() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Allocations Report"));
        assert!(body.contains("All batches"));
    }

    #[tokio::test]
    async fn test_item_page_renders_rows_and_totals() {
        let (status, body) = get("/?item=1001").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("1001 Widget"));
        assert!(body.contains("LOT-1"));
        assert!(body.contains("LOT-2"));
        assert!(!body.contains("LOT-X"));
        assert!(body.contains("Total system qty"));
        assert!(body.contains("<circle"));
    }

    #[tokio::test]
    async fn test_unknown_item_page() {
        let (status, body) = get("/?item=9999&filter=all").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("9999 does not exist. Please check the item number."));
        assert!(!body.contains("<circle"));
    }

    #[tokio::test]
    async fn test_reload_restores_highlight() {
        let router = app(state());
        let send = |request: Request<Body>| {
            let router = router.clone();
            async move {
                let response = router.oneshot(request).await.unwrap();
                let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
                String::from_utf8(body.to_vec()).unwrap()
            }
        };

        let page = send(Request::builder().uri("/?item=1001").body(Body::empty()).unwrap()).await;
        assert!(page.contains("new Set([])"));

        send(
            Request::builder()
                .method("POST")
                .uri("/api/selection")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"indices":[1]}"#))
                .unwrap(),
        )
        .await;

        let reloaded =
            send(Request::builder().uri("/?item=1001").body(Body::empty()).unwrap()).await;
        assert!(reloaded.contains("new Set([1])"));
        assert!(reloaded.contains("Total system qty: &emsp;5"));
    }

    #[tokio::test]
    async fn test_bad_filter_is_rejected() {
        let (status, _) = get("/?item=1001&filter=sometimes").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
