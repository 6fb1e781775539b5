//! Item and availability queries over a loaded dataset.

use crate::dataset::Dataset;
use crate::record::InventoryRecord;
use crate::types::AvailabilityFilter;

/// Select the records of one item, optionally restricted by availability.
///
/// Matching is exact, case-sensitive string equality on the canonical item
/// number; surrounding whitespace in `item_id` is ignored. Dataset order is
/// preserved. An unknown item yields an empty vector.
#[must_use]
pub fn query<'a>(
    dataset: &'a Dataset,
    item_id: &str,
    filter: AvailabilityFilter,
) -> Vec<&'a InventoryRecord> {
    matching(dataset, item_id, filter)
        .map(|(_, record)| record)
        .collect()
}

/// Like [`query`], but returns positions within [`Dataset::records`].
#[must_use]
pub fn query_positions(dataset: &Dataset, item_id: &str, filter: AvailabilityFilter) -> Vec<usize> {
    matching(dataset, item_id, filter)
        .map(|(position, _)| position)
        .collect()
}

fn matching<'a>(
    dataset: &'a Dataset,
    item_id: &str,
    filter: AvailabilityFilter,
) -> impl Iterator<Item = (usize, &'a InventoryRecord)> + 'a {
    let item_id = item_id.trim().to_owned();
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(move |(_, record)| record.item == *item_id)
        .filter(move |(_, record)| filter.admits(record.availability_class))
}
