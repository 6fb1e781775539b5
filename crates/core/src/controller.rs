//! Reactive dashboard controller.
//!
//! The controller owns the current inputs (item number, availability filter,
//! highlighted rows) and the derived outputs (selection, totals, title). Each
//! [`InputEvent`] is handled to completion before the next one, and every
//! result is pushed to a [`DisplaySurface`].
//!
//! ```text
//!          ItemChanged(id)
//!   Idle ───────────────────► Displaying ──┐ ItemChanged(id), FilterChanged
//!    ▲                          │   ▲      │ or HighlightChanged
//!    └──── ItemChanged("") ─────┘   └──────┘
//! ```
//!
//! Item and filter changes replace the selection wholesale and reset the
//! highlight. Highlight changes only recompute and republish the totals.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Dataset;
use crate::query;
use crate::record::InventoryRecord;
use crate::summary::{self, Totals};
use crate::types::{AllocationStatus, AvailabilityFilter, ColorToken};

/// Title shown before any item has been entered.
pub const IDLE_TITLE: &str = "Allocations Report";

/// Something the user did on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum InputEvent {
    /// The item number text changed.
    ItemChanged(String),
    /// The availability selector changed.
    FilterChanged(AvailabilityFilter),
    /// The set of highlighted rows changed (positions in the displayed rows).
    HighlightChanged(Vec<usize>),
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    /// No item entered.
    Idle,
    /// An item has been entered; the selection may be empty.
    Displaying,
}

/// One displayed batch: a plot point and a table row share these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchView {
    pub man_date: NaiveDate,
    pub system_qty: Decimal,
    pub reserved_qty: Decimal,
    pub avail_qty: Decimal,
    pub bdc: String,
    pub batch: String,
    pub sales: String,
    pub status: AllocationStatus,
    pub fill_color: ColorToken,
    pub line_color: ColorToken,
}

impl From<&InventoryRecord> for BatchView {
    fn from(record: &InventoryRecord) -> Self {
        Self {
            man_date: record.man_date,
            system_qty: record.system_qty,
            reserved_qty: record.reserved_qty,
            avail_qty: record.avail_qty,
            bdc: record.bdc.clone(),
            batch: record.batch.clone(),
            sales: record.sales.clone(),
            status: record.allocation_status,
            fill_color: record.fill_color,
            line_color: record.line_color,
        }
    }
}

/// Where the controller publishes its results.
pub trait DisplaySurface {
    /// Replace all plotted points and table rows.
    fn replace_batches(&mut self, batches: &[BatchView]);

    /// Replace the totals block.
    fn show_totals(&mut self, totals: &Totals);

    /// Replace the title.
    fn set_title(&mut self, title: &str);
}

/// The dashboard session.
#[derive(Debug, Clone)]
pub struct Controller {
    dataset: Arc<Dataset>,
    item_id: String,
    filter: AvailabilityFilter,
    selection: Vec<usize>,
    highlight: Vec<usize>,
    totals: Totals,
}

impl Controller {
    /// Create an idle controller over a loaded dataset.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            item_id: String::new(),
            filter: AvailabilityFilter::default(),
            selection: Vec::new(),
            highlight: Vec::new(),
            totals: Totals::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        if self.item_id.is_empty() {
            ControllerState::Idle
        } else {
            ControllerState::Displaying
        }
    }

    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    #[must_use]
    pub const fn filter(&self) -> AvailabilityFilter {
        self.filter
    }

    #[must_use]
    pub fn highlight(&self) -> &[usize] {
        &self.highlight
    }

    #[must_use]
    pub const fn totals(&self) -> &Totals {
        &self.totals
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The currently selected records, in dataset order.
    #[must_use]
    pub fn selection(&self) -> Vec<&InventoryRecord> {
        let records = self.dataset.records();
        self.selection
            .iter()
            .filter_map(|&pos| records.get(pos))
            .collect()
    }

    /// The current selection as display rows.
    #[must_use]
    pub fn batches(&self) -> Vec<BatchView> {
        self.selection().into_iter().map(BatchView::from).collect()
    }

    /// The title for the current inputs.
    ///
    /// The display name comes from the first selected record. An item with
    /// no records left after filtering is reported as missing.
    #[must_use]
    pub fn title(&self) -> String {
        if self.item_id.is_empty() {
            return IDLE_TITLE.to_string();
        }

        self.selection()
            .first()
            .map_or_else(
                || {
                    format!(
                        "{} does not exist. Please check the item number.",
                        self.item_id
                    )
                },
                |record| format!("{} {}", self.item_id, record.name),
            )
    }

    /// Apply one input event and publish the results.
    pub fn handle<S>(&mut self, event: InputEvent, surface: &mut S)
    where
        S: DisplaySurface + ?Sized,
    {
        match event {
            InputEvent::ItemChanged(item_id) => {
                self.item_id = item_id.trim().to_string();
                self.requery();
                self.publish(surface);
            }
            InputEvent::FilterChanged(filter) => {
                self.filter = filter;
                self.requery();
                self.publish(surface);
            }
            InputEvent::HighlightChanged(highlight) => {
                self.highlight = highlight;
                self.totals = summary::summarize_highlight(&self.selection(), &self.highlight);
                debug!(
                    highlighted = self.highlight.len(),
                    system_qty = %self.totals.system_qty_sum,
                    "Highlight changed"
                );
                surface.show_totals(&self.totals);
            }
        }
    }

    /// Publish the full current view (used for a fresh surface).
    pub fn publish<S>(&self, surface: &mut S)
    where
        S: DisplaySurface + ?Sized,
    {
        surface.set_title(&self.title());
        surface.replace_batches(&self.batches());
        surface.show_totals(&self.totals);
    }

    fn requery(&mut self) {
        self.selection = if self.item_id.is_empty() {
            Vec::new()
        } else {
            query::query_positions(&self.dataset, &self.item_id, self.filter)
        };
        self.highlight.clear();
        self.totals = summary::summarize(self.selection());

        debug!(
            item = %self.item_id,
            filter = %self.filter,
            matches = self.selection.len(),
            "Selection updated"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::record::tests::record;

    /// Records everything published to it.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        titles: Vec<String>,
        batches: Vec<Vec<BatchView>>,
        totals: Vec<Totals>,
    }

    impl DisplaySurface for RecordingSurface {
        fn replace_batches(&mut self, batches: &[BatchView]) {
            self.batches.push(batches.to_vec());
        }

        fn show_totals(&mut self, totals: &Totals) {
            self.totals.push(*totals);
        }

        fn set_title(&mut self, title: &str) {
            self.titles.push(title.to_string());
        }
    }

    fn controller() -> Controller {
        Controller::new(Arc::new(Dataset::from_records(vec![
            record("1001", "AVAIL", 10, 10),
            record("1001", "QCLOCK", 5, 0),
            record("2002", "QCLOCK", 3, 1),
        ])))
    }

    #[test]
    fn test_starts_idle() {
        let ctl = controller();
        assert_eq!(ctl.state(), ControllerState::Idle);
        assert_eq!(ctl.title(), IDLE_TITLE);
        assert!(ctl.selection().is_empty());
        assert_eq!(*ctl.totals(), Totals::default());
    }

    #[test]
    fn test_item_change_publishes_everything() {
        let mut ctl = controller();
        let mut surface = RecordingSurface::default();

        ctl.handle(InputEvent::ItemChanged("1001".to_string()), &mut surface);

        assert_eq!(ctl.state(), ControllerState::Displaying);
        assert_eq!(surface.titles, vec!["1001 Item 1001"]);
        assert_eq!(surface.batches.len(), 1);
        assert_eq!(surface.batches[0].len(), 2);
        assert_eq!(surface.batches[0][0].status, AllocationStatus::FullyAllocated);
        assert_eq!(surface.batches[0][1].status, AllocationStatus::NotAllocated);
        assert_eq!(surface.totals[0].system_qty_sum, Decimal::from(15));
        assert_eq!(surface.totals[0].reserved_qty_sum, Decimal::from(10));
    }

    #[test]
    fn test_unknown_item_is_not_an_error() {
        let mut ctl = controller();
        let mut surface = RecordingSurface::default();

        ctl.handle(InputEvent::ItemChanged("9999".to_string()), &mut surface);

        assert_eq!(ctl.state(), ControllerState::Displaying);
        assert_eq!(
            surface.titles,
            vec!["9999 does not exist. Please check the item number."]
        );
        assert!(surface.batches[0].is_empty());
        assert_eq!(surface.totals[0], Totals::default());
    }

    #[test]
    fn test_filter_change_requeries() {
        let mut ctl = controller();
        let mut surface = RecordingSurface::default();

        ctl.handle(InputEvent::ItemChanged("1001".to_string()), &mut surface);
        ctl.handle(
            InputEvent::FilterChanged(AvailabilityFilter::UnavailableOnly),
            &mut surface,
        );

        assert_eq!(surface.batches.len(), 2);
        assert_eq!(surface.batches[1].len(), 1);
        assert_eq!(surface.batches[1][0].bdc, "QCLOCK");
        assert_eq!(surface.totals[1].system_qty_sum, Decimal::from(5));
    }

    #[test]
    fn test_filtered_out_item_is_reported_missing() {
        let mut ctl = controller();
        let mut surface = RecordingSurface::default();

        ctl.handle(InputEvent::ItemChanged("2002".to_string()), &mut surface);
        ctl.handle(
            InputEvent::FilterChanged(AvailabilityFilter::AvailableOnly),
            &mut surface,
        );

        assert_eq!(surface.titles[0], "2002 Item 2002");
        assert!(ctl.selection().is_empty());
        assert_eq!(
            surface.titles[1],
            "2002 does not exist. Please check the item number."
        );
    }

    #[test]
    fn test_highlight_publishes_totals_only() {
        let mut ctl = controller();
        let mut surface = RecordingSurface::default();

        ctl.handle(InputEvent::ItemChanged("1001".to_string()), &mut surface);
        ctl.handle(InputEvent::HighlightChanged(vec![1]), &mut surface);

        assert_eq!(surface.titles.len(), 1);
        assert_eq!(surface.batches.len(), 1);
        assert_eq!(surface.totals.len(), 2);
        assert_eq!(surface.totals[1].system_qty_sum, Decimal::from(5));
        assert_eq!(ctl.selection().len(), 2);

        ctl.handle(InputEvent::HighlightChanged(vec![]), &mut surface);
        assert_eq!(surface.totals[2].system_qty_sum, Decimal::from(15));
    }

    #[test]
    fn test_requery_clears_highlight() {
        let mut ctl = controller();
        let mut surface = RecordingSurface::default();

        ctl.handle(InputEvent::ItemChanged("1001".to_string()), &mut surface);
        ctl.handle(InputEvent::HighlightChanged(vec![0]), &mut surface);
        ctl.handle(InputEvent::FilterChanged(AvailabilityFilter::All), &mut surface);

        assert!(ctl.highlight().is_empty());
        assert_eq!(ctl.totals().system_qty_sum, Decimal::from(15));
    }

    #[test]
    fn test_clearing_item_returns_to_idle() {
        let mut ctl = controller();
        let mut surface = RecordingSurface::default();

        ctl.handle(InputEvent::ItemChanged("1001".to_string()), &mut surface);
        ctl.handle(InputEvent::ItemChanged("   ".to_string()), &mut surface);

        assert_eq!(ctl.state(), ControllerState::Idle);
        assert_eq!(surface.titles[1], IDLE_TITLE);
        assert!(surface.batches[1].is_empty());
        assert_eq!(surface.totals[1], Totals::default());
    }

    #[test]
    fn test_event_serde_shape() {
        let event: InputEvent =
            serde_json::from_str(r#"{"event":"highlight_changed","value":[0,2]}"#).unwrap();
        assert_eq!(event, InputEvent::HighlightChanged(vec![0, 2]));

        let event: InputEvent =
            serde_json::from_str(r#"{"event":"filter_changed","value":"available"}"#).unwrap();
        assert_eq!(
            event,
            InputEvent::FilterChanged(AvailabilityFilter::AvailableOnly)
        );
    }
}
