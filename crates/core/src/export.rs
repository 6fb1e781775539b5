//! CSV export of displayed batches.

use std::io::Write;

use crate::controller::BatchView;

/// Header row of the export, matching the dashboard table columns.
pub const EXPORT_HEADERS: [&str; 7] = [
    "Batch",
    "System Qty",
    "Reserved Qty",
    "Available Qty",
    "Manufacturing Date",
    "BDC",
    "Sales Number",
];

/// Write `batches` as CSV, header first.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_csv<W: Write>(out: W, batches: &[BatchView]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(EXPORT_HEADERS)?;

    for batch in batches {
        writer.write_record([
            batch.batch.clone(),
            batch.system_qty.to_string(),
            batch.reserved_qty.to_string(),
            batch.avail_qty.to_string(),
            batch.man_date.format("%Y-%m-%d").to_string(),
            batch.bdc.clone(),
            batch.sales.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Render `batches` as a CSV string.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_csv_string(batches: &[BatchView]) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_csv(&mut buf, batches)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
