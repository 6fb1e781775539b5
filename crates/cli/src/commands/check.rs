//! Dataset validation command.

use std::io::Write;

use soh_allocations_core::Dataset;

use super::CommandError;

/// Print the load counts and any unknown BDC codes.
pub fn run<W: Write>(dataset: &Dataset, out: &mut W) -> Result<(), CommandError> {
    let report = dataset.report();

    writeln!(out, "Raw rows:      {}", report.raw_rows)?;
    writeln!(out, "Excluded rows: {}", report.excluded_rows)?;
    writeln!(out, "Loaded rows:   {}", report.loaded_rows())?;

    if report.unknown_bdc_codes.is_empty() {
        writeln!(out, "Unknown BDC codes: none")?;
    } else {
        let codes: Vec<&str> = report.unknown_bdc_codes.iter().map(String::as_str).collect();
        writeln!(out, "Unknown BDC codes: {}", codes.join(", "))?;
    }
    Ok(())
}
