//! The live dashboard session.
//!
//! A [`Session`] pairs the core [`Controller`] with a [`DashboardView`], the
//! surface the controller publishes into. Handlers render the view; they
//! never read the controller's outputs directly.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use soh_allocations_core::{
    AvailabilityFilter, BatchView, Controller, ControllerState, Dataset, DisplaySurface,
    InputEvent, Totals,
};

/// Last published title, batches and totals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub batches: Vec<BatchView>,
    pub totals: Totals,
}

impl DisplaySurface for DashboardView {
    fn replace_batches(&mut self, batches: &[BatchView]) {
        self.batches = batches.to_vec();
    }

    fn show_totals(&mut self, totals: &Totals) {
        self.totals = *totals;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }
}

/// Controller plus its published view.
#[derive(Debug)]
pub struct Session {
    controller: Controller,
    view: DashboardView,
}

impl Session {
    /// Start an idle session and publish the initial view.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let controller = Controller::new(dataset);
        let mut view = DashboardView::default();
        controller.publish(&mut view);
        Self { controller, view }
    }

    /// Apply one event.
    pub fn dispatch(&mut self, event: InputEvent) -> &DashboardView {
        debug!(?event, "Dispatching dashboard event");
        self.controller.handle(event, &mut self.view);
        &self.view
    }

    /// Apply page inputs, dispatching only the ones that changed.
    ///
    /// Re-submitting the current item or filter leaves the highlight alone.
    pub fn apply_inputs(
        &mut self,
        item: Option<&str>,
        filter: Option<AvailabilityFilter>,
    ) -> &DashboardView {
        if let Some(item) = item.filter(|item| item.trim() != self.controller.item_id()) {
            self.dispatch(InputEvent::ItemChanged(item.to_string()));
        }
        if let Some(filter) = filter.filter(|filter| *filter != self.controller.filter()) {
            self.dispatch(InputEvent::FilterChanged(filter));
        }
        &self.view
    }

    #[must_use]
    pub const fn view(&self) -> &DashboardView {
        &self.view
    }

    #[must_use]
    pub const fn controller(&self) -> &Controller {
        &self.controller
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.controller.state()
    }

    /// Number of rows currently displayed.
    #[must_use]
    pub fn displayed_rows(&self) -> usize {
        self.view.batches.len()
    }
}
