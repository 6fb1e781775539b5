//! Stock-on-hand record models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::classify;
use crate::types::{AllocationStatus, AvailabilityClass, ColorToken, FillClass, ItemNumber};

/// A typed, validated source row before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRow {
    /// Canonical item number.
    pub item: ItemNumber,
    /// Warehouse location code.
    pub batch_location: String,
    /// Quantity on hand according to the system.
    pub system_qty: Decimal,
    /// Quantity reserved against demand.
    pub reserved_qty: Decimal,
    /// Quantity still available for allocation.
    pub avail_qty: Decimal,
    /// Manufacturing date.
    pub man_date: NaiveDate,
    /// Composite batch label.
    pub batch: String,
    /// Sales reference.
    pub sales: String,
    /// Batch disposition code.
    pub bdc: String,
    /// Item display name.
    pub name: String,
}

/// One row of the sanitized dataset.
///
/// Derived attributes are computed once from the [`BatchRow`] when the record
/// is built and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub item: ItemNumber,
    pub batch_location: String,
    pub system_qty: Decimal,
    pub reserved_qty: Decimal,
    pub avail_qty: Decimal,
    pub man_date: NaiveDate,
    pub batch: String,
    pub sales: String,
    pub bdc: String,
    pub name: String,
    pub allocation_status: AllocationStatus,
    pub fill_class: FillClass,
    pub availability_class: AvailabilityClass,
    pub fill_color: ColorToken,
    pub line_color: ColorToken,
}

impl From<BatchRow> for InventoryRecord {
    fn from(row: BatchRow) -> Self {
        let allocation_status = classify::classify_allocation(row.system_qty, row.reserved_qty);
        let availability_class = classify::classify_availability(&row.bdc);
        let line_color = classify::line_color_for(&row.bdc);

        Self {
            item: row.item,
            batch_location: row.batch_location,
            system_qty: row.system_qty,
            reserved_qty: row.reserved_qty,
            avail_qty: row.avail_qty,
            man_date: row.man_date,
            batch: row.batch,
            sales: row.sales,
            bdc: row.bdc,
            name: row.name,
            allocation_status,
            fill_class: allocation_status.fill_class(),
            availability_class,
            fill_color: classify::fill_color_for(allocation_status),
            line_color,
        }
    }
}
