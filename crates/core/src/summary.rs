//! Quantity totals over a selection of records.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::InventoryRecord;

/// Summed quantities for a set of batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub system_qty_sum: Decimal,
    pub avail_qty_sum: Decimal,
    pub reserved_qty_sum: Decimal,
}

impl Totals {
    /// Add one record's quantities.
    #[must_use]
    pub fn add(self, record: &InventoryRecord) -> Self {
        Self {
            system_qty_sum: self.system_qty_sum + record.system_qty,
            avail_qty_sum: self.avail_qty_sum + record.avail_qty,
            reserved_qty_sum: self.reserved_qty_sum + record.reserved_qty,
        }
    }
}

/// Sum quantities over `records`. Empty input yields zero totals.
pub fn summarize<'a, I>(records: I) -> Totals
where
    I: IntoIterator<Item = &'a InventoryRecord>,
{
    records.into_iter().fold(Totals::default(), Totals::add)
}

/// Totals over the highlighted rows of a selection.
///
/// `highlight` holds positions within `selection`. An empty highlight means
/// "nothing picked" and falls back to the whole selection. Positions past
/// the end are ignored and duplicates count once.
#[must_use]
pub fn summarize_highlight(selection: &[&InventoryRecord], highlight: &[usize]) -> Totals {
    if highlight.is_empty() {
        return summarize(selection.iter().copied());
    }

    let picked: BTreeSet<usize> = highlight.iter().copied().collect();
    summarize(picked.into_iter().filter_map(|idx| selection.get(idx).copied()))
}
