//! Batch table and control definitions.
//!
//! Column order matches the CSV export so the table and the download agree.

use serde::Serialize;

use soh_allocations_core::AvailabilityFilter;
use soh_allocations_core::export::EXPORT_HEADERS;

/// Column definition for the batch table.
#[derive(Debug, Clone, Serialize)]
pub struct TableColumn {
    /// Field of `BatchView` shown in this column.
    pub key: &'static str,
    /// Display label for the column header.
    pub label: &'static str,
    /// Right-align numeric columns.
    pub numeric: bool,
}

impl TableColumn {
    const fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            numeric: false,
        }
    }

    const fn numeric(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            numeric: true,
        }
    }
}

/// The batch table columns, in display order.
#[must_use]
pub fn batch_columns() -> [TableColumn; 7] {
    let [batch, system, reserved, avail, date, bdc, sales] = EXPORT_HEADERS;
    [
        TableColumn::text("batch", batch),
        TableColumn::numeric("system_qty", system),
        TableColumn::numeric("reserved_qty", reserved),
        TableColumn::numeric("avail_qty", avail),
        TableColumn::text("man_date", date),
        TableColumn::text("bdc", bdc),
        TableColumn::text("sales", sales),
    ]
}

/// Option for the availability selector.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOption {
    /// Form value.
    pub value: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Currently chosen.
    pub selected: bool,
}

/// Availability selector options with `current` marked selected.
#[must_use]
pub fn availability_options(current: AvailabilityFilter) -> Vec<FilterOption> {
    AvailabilityFilter::ALL
        .iter()
        .map(|filter| FilterOption {
            value: filter.as_str(),
            label: filter.label(),
            selected: *filter == current,
        })
        .collect()
}
