//! Item export command.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use soh_allocations_core::{AvailabilityFilter, Dataset, export};

use super::CommandError;
use super::query::TextReport;

/// Write the item's batches as CSV to `output`, or stdout.
pub fn run(
    dataset: Arc<Dataset>,
    item: &str,
    filter: AvailabilityFilter,
    output: Option<&Path>,
) -> Result<(), CommandError> {
    let report = TextReport::for_item(dataset, item, filter);

    match output {
        Some(path) => {
            export::write_csv(File::create(path)?, &report.batches)?;
            tracing::info!(
                rows = report.batches.len(),
                path = %path.display(),
                "Export written"
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            export::write_csv(&mut lock, &report.batches)?;
            lock.flush()?;
        }
    }
    Ok(())
}
