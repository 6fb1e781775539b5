//! Item query command.
//!
//! Drives the same controller as the dashboard and prints what it publishes.

use std::io::Write;
use std::sync::Arc;

use rust_decimal::Decimal;

use soh_allocations_core::export::EXPORT_HEADERS;
use soh_allocations_core::{
    AvailabilityFilter, BatchView, Controller, Dataset, DisplaySurface, InputEvent, Totals,
};

use super::CommandError;

/// Collects the controller's output for printing.
#[derive(Debug, Default)]
pub struct TextReport {
    pub title: String,
    pub batches: Vec<BatchView>,
    pub totals: Totals,
}

impl DisplaySurface for TextReport {
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

impl TextReport {
    /// Run the item and filter through a fresh controller.
    pub fn for_item(dataset: Arc<Dataset>, item: &str, filter: AvailabilityFilter) -> Self {
        let mut controller = Controller::new(dataset);
        let mut report = Self::default();
        controller.handle(InputEvent::FilterChanged(filter), &mut report);
        controller.handle(InputEvent::ItemChanged(item.to_string()), &mut report);
        report
    }

    /// Write the title, an aligned table and the totals block.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self.title)?;
        writeln!(out)?;

        if self.batches.is_empty() {
            writeln!(out, "No batches to show.")?;
        } else {
            let rows: Vec<[String; 7]> = self.batches.iter().map(row_cells).collect();
            let mut widths = EXPORT_HEADERS.map(str::len);
            for row in &rows {
                for (width, cell) in widths.iter_mut().zip(row) {
                    *width = (*width).max(cell.len());
                }
            }

            write_row(out, &EXPORT_HEADERS.map(ToString::to_string), &widths)?;
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            writeln!(out, "{}", rule.join("  "))?;
            for row in &rows {
                write_row(out, row, &widths)?;
            }
        }

        writeln!(out)?;
        writeln!(out, "*Selected item(s):")?;
        writeln!(out, "Total system qty:    {}", quantity(self.totals.system_qty_sum))?;
        writeln!(out, "Total available qty: {}", quantity(self.totals.avail_qty_sum))?;
        writeln!(out, "Total reserved qty:  {}", quantity(self.totals.reserved_qty_sum))?;
        Ok(())
    }
}

/// Print the report for `item`.
pub fn run<W: Write>(
    dataset: Arc<Dataset>,
    item: &str,
    filter: AvailabilityFilter,
    out: &mut W,
) -> Result<(), CommandError> {
    let report = TextReport::for_item(dataset, item, filter);
    tracing::debug!(rows = report.batches.len(), "Query complete");
    report.write_to(out)?;
    Ok(())
}

fn row_cells(batch: &BatchView) -> [String; 7] {
    [
        batch.batch.clone(),
        quantity(batch.system_qty),
        quantity(batch.reserved_qty),
        quantity(batch.avail_qty),
        batch.man_date.format("%Y-%m-%d").to_string(),
        batch.bdc.clone(),
        batch.sales.clone(),
    ]
}

fn write_row<W: Write>(out: &mut W, cells: &[String; 7], widths: &[usize; 7]) -> std::io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())
}

fn quantity(value: Decimal) -> String {
    value.normalize().to_string()
}
