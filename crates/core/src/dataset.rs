//! Dataset loading and sanitizing.
//!
//! The physical SOH export is a CSV file with one row per batch. Loading it
//! runs the whole sanitizing pipeline in one pass:
//!
//! 1. Check that every required column is present
//! 2. Drop rows whose `batch_loc` is a placeholder or lab location
//! 3. Normalize the item number and parse quantities and dates
//! 4. Classify each row into an immutable [`InventoryRecord`]
//!
//! Any row that cannot be typed fails the whole load. A malformed item
//! number means the upstream export is broken, and silently skipping rows
//! would hide that.

use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::classify;
use crate::record::{BatchRow, InventoryRecord};
use crate::types::{ItemNumber, ItemNumberError};

/// Location codes excluded from the dataset by default.
pub const DEFAULT_EXCLUDED_LOCATIONS: [&str; 10] = [
    "lab",
    "CCLMISSING",
    "HMISSING",
    "OMISSING",
    "VMISSING",
    "GMISSING",
    "RMISSING",
    "BMISSING",
    "CHPMISSING",
    "CDDMISSING",
];

/// Columns the source file must provide.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "item",
    "batch_loc",
    "system_qty",
    "man_date",
    "reserved_qty",
    "avail",
    "comb",
    "sales",
    "bdc",
    "name",
];

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const SLASH_DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%d/%m/%Y"];

/// Errors that abort a dataset load.
///
/// Row numbers are 1-based and count data rows (the header is not a row).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}: invalid item number: {source}")]
    InvalidItem {
        row: usize,
        #[source]
        source: ItemNumberError,
    },

    #[error("row {row}: invalid {column} `{value}`")]
    InvalidQuantity {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: invalid man_date `{value}`")]
    InvalidDate { row: usize, value: String },
}

/// Options controlling a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Rows whose `batch_loc` matches one of these (exactly) are dropped.
    pub excluded_locations: BTreeSet<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            excluded_locations: DEFAULT_EXCLUDED_LOCATIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl LoadOptions {
    /// Replace the exclusion set.
    #[must_use]
    pub fn with_excluded_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_locations = locations.into_iter().map(Into::into).collect();
        self
    }
}

/// Counts gathered while loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows read from the source.
    pub raw_rows: usize,
    /// Rows dropped because of their location.
    pub excluded_rows: usize,
    /// BDC codes without a dedicated classification rule.
    pub unknown_bdc_codes: BTreeSet<String>,
}

impl LoadReport {
    /// Rows kept in the dataset.
    #[must_use]
    pub const fn loaded_rows(&self) -> usize {
        self.raw_rows - self.excluded_rows
    }
}

/// The sanitized, classified dataset.
///
/// Built once at startup and never mutated; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<InventoryRecord>,
    report: LoadReport,
}

impl Dataset {
    /// Load a dataset from CSV text with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the source cannot be read, lacks required
    /// columns, or contains a row that cannot be typed.
    pub fn load<R: Read>(source: R, options: &LoadOptions) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);

        let columns = ColumnIndex::from_headers(reader.headers()?)?;
        let mut report = LoadReport::default();
        let mut records = Vec::new();

        for (idx, result) in reader.records().enumerate() {
            let row = idx + 1;
            let raw = result?;
            report.raw_rows += 1;

            let location = columns.get(&raw, columns.batch_loc);
            if options.excluded_locations.contains(location) {
                report.excluded_rows += 1;
                continue;
            }

            let batch = columns.parse_row(&raw, row)?;
            if !classify::is_known_bdc(&batch.bdc)
                && report.unknown_bdc_codes.insert(batch.bdc.clone())
            {
                warn!(
                    bdc = %batch.bdc,
                    row,
                    "Unrecognized BDC code, classifying as not available"
                );
            }
            records.push(InventoryRecord::from(batch));
        }

        info!(
            raw_rows = report.raw_rows,
            excluded_rows = report.excluded_rows,
            loaded_rows = report.loaded_rows(),
            "Dataset loaded"
        );

        Ok(Self { records, report })
    }

    /// Load a dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Open`] if the file cannot be opened, otherwise
    /// the same errors as [`Dataset::load`].
    pub fn load_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Loading dataset");
        Self::load(std::io::BufReader::new(file), options)
    }

    /// Build a dataset from records that were produced elsewhere.
    #[must_use]
    pub fn from_records(records: Vec<InventoryRecord>) -> Self {
        let report = LoadReport {
            raw_rows: records.len(),
            ..LoadReport::default()
        };
        Self { records, report }
    }

    #[must_use]
    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub const fn report(&self) -> &LoadReport {
        &self.report
    }
}

/// Positions of the required columns within a row.
struct ColumnIndex {
    item: usize,
    batch_loc: usize,
    system_qty: usize,
    man_date: usize,
    reserved_qty: usize,
    avail: usize,
    comb: usize,
    sales: usize,
    bdc: usize,
    name: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let positions: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name, idx))
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !positions.contains_key(*col))
            .map(ToString::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let at = |col: &str| positions.get(col).copied().unwrap_or_default();
        Ok(Self {
            item: at("item"),
            batch_loc: at("batch_loc"),
            system_qty: at("system_qty"),
            man_date: at("man_date"),
            reserved_qty: at("reserved_qty"),
            avail: at("avail"),
            comb: at("comb"),
            sales: at("sales"),
            bdc: at("bdc"),
            name: at("name"),
        })
    }

    fn get<'r>(&self, raw: &'r csv::StringRecord, idx: usize) -> &'r str {
        raw.get(idx).unwrap_or("")
    }

    fn parse_row(&self, raw: &csv::StringRecord, row: usize) -> Result<BatchRow, LoadError> {
        let item = ItemNumber::parse(self.get(raw, self.item))
            .map_err(|source| LoadError::InvalidItem { row, source })?;

        Ok(BatchRow {
            item,
            batch_location: self.get(raw, self.batch_loc).to_string(),
            system_qty: parse_quantity(self.get(raw, self.system_qty), row, "system_qty")?,
            reserved_qty: parse_quantity(self.get(raw, self.reserved_qty), row, "reserved_qty")?,
            avail_qty: parse_quantity(self.get(raw, self.avail), row, "avail")?,
            man_date: parse_date(self.get(raw, self.man_date))
                .ok_or_else(|| LoadError::InvalidDate {
                    row,
                    value: self.get(raw, self.man_date).to_string(),
                })?,
            batch: self.get(raw, self.comb).to_string(),
            sales: self.get(raw, self.sales).to_string(),
            bdc: self.get(raw, self.bdc).to_string(),
            name: self.get(raw, self.name).to_string(),
        })
    }
}

/// Parse a non-negative quantity. Spreadsheet exports sometimes use
/// scientific notation for large values.
fn parse_quantity(value: &str, row: usize, column: &'static str) -> Result<Decimal, LoadError> {
    let invalid = || LoadError::InvalidQuantity {
        row,
        column,
        value: value.to_string(),
    };

    let qty = Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| invalid())?;

    if qty.is_sign_negative() && !qty.is_zero() {
        return Err(invalid());
    }
    Ok(qty.normalize())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
        .ok()
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            SLASH_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{AllocationStatus, AvailabilityClass};

    const HEADER: &str = "item,batch_loc,system_qty,man_date,reserved_qty,avail,comb,sales,bdc,name\n";

    fn load(body: &str) -> Result<Dataset, LoadError> {
        Dataset::load(format!("{HEADER}{body}").as_bytes(), &LoadOptions::default())
    }

    #[test]
    fn test_load_classifies_rows() {
        let ds = load(
            "1001,A01,10,2024-01-15,10,0,1001-B1,S100,AVAIL,Widget\n\
             1001,A02,5,2024-02-01,0,5,1001-B2,S101,QCLOCK,Widget\n",
        )
        .unwrap();

        assert_eq!(ds.len(), 2);
        let first = &ds.records()[0];
        assert_eq!(first.item.as_str(), "1001");
        assert_eq!(first.allocation_status, AllocationStatus::FullyAllocated);
        assert_eq!(first.availability_class, AvailabilityClass::Available);
        assert_eq!(first.batch, "1001-B1");
        assert_eq!(first.man_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

        let second = &ds.records()[1];
        assert_eq!(second.allocation_status, AllocationStatus::NotAllocated);
        assert_eq!(second.availability_class, AvailabilityClass::Unavailable);
    }

    #[test]
    fn test_load_normalizes_float_item_numbers() {
        let ds = load("1001.0,A01,1,2024-01-15,0,1,B,S,AVAIL,Widget\n").unwrap();
        assert_eq!(ds.records()[0].item.as_str(), "1001");
    }

    #[test]
    fn test_load_excludes_placeholder_locations() {
        let ds = load(
            "1001,lab,1,2024-01-15,0,1,B1,S,AVAIL,Widget\n\
             1001,A01,1,2024-01-15,0,1,B2,S,AVAIL,Widget\n\
             1001,HMISSING,1,2024-01-15,0,1,B3,S,AVAIL,Widget\n\
             1001,CDDMISSING,1,2024-01-15,0,1,B4,S,AVAIL,Widget\n\
             1001,LAB,1,2024-01-15,0,1,B5,S,AVAIL,Widget\n",
        )
        .unwrap();

        let batches: Vec<&str> = ds.records().iter().map(|r| r.batch.as_str()).collect();
        assert_eq!(batches, vec!["B2", "B5"]);
        assert_eq!(ds.report().raw_rows, 5);
        assert_eq!(ds.report().excluded_rows, 3);
        assert_eq!(ds.report().loaded_rows(), ds.len());
    }

    #[test]
    fn test_exclusion_matches_trimmed_location() {
        let ds = load(
            "1001, lab ,1,2024-01-15,0,1,B1,S,AVAIL,Widget\n\
             1001,\tHMISSING,1,2024-01-15,0,1,B2,S,AVAIL,Widget\n\
             1001, A01 ,1,2024-01-15,0,1,B3,S,AVAIL,Widget\n",
        )
        .unwrap();
        assert_eq!(ds.report().excluded_rows, 2);
        assert_eq!(ds.records()[0].batch_location, "A01");
    }

    #[test]
    fn test_excluded_rows_are_not_validated() {
        let ds = load("not-a-number,lab,x,never,y,z,B,S,AVAIL,Widget\n").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_custom_exclusion_set() {
        let options = LoadOptions::default().with_excluded_locations(["QUARANTINE"]);
        let ds = Dataset::load(
            format!(
                "{HEADER}1001,lab,1,2024-01-15,0,1,B1,S,AVAIL,Widget\n\
                 1001,QUARANTINE,1,2024-01-15,0,1,B2,S,AVAIL,Widget\n"
            )
            .as_bytes(),
            &options,
        )
        .unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].batch_location, "lab");
    }

    #[test]
    fn test_missing_columns_are_all_reported() {
        let err = Dataset::load(
            "item,batch_loc,system_qty\n1001,A01,1\n".as_bytes(),
            &LoadOptions::default(),
        )
        .unwrap_err();

        match err {
            LoadError::MissingColumns(cols) => {
                assert_eq!(
                    cols,
                    vec!["man_date", "reserved_qty", "avail", "comb", "sales", "bdc", "name"]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_item_fails_whole_load() {
        let err = load(
            "1001,A01,1,2024-01-15,0,1,B1,S,AVAIL,Widget\n\
             ABC,A01,1,2024-01-15,0,1,B2,S,AVAIL,Widget\n",
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::InvalidItem { row: 2, .. }));
    }

    #[test]
    fn test_bad_quantity_fails_load() {
        let err = load("1001,A01,-3,2024-01-15,0,1,B1,S,AVAIL,Widget\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidQuantity {
                row: 1,
                column: "system_qty",
                ..
            }
        ));

        let err = load("1001,A01,1,2024-01-15,,1,B1,S,AVAIL,Widget\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidQuantity {
                column: "reserved_qty",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_date_fails_load() {
        let err = load("1001,A01,1,someday,0,1,B1,S,AVAIL,Widget\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { row: 1, .. }));
    }

    #[test]
    fn test_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(parse_date("2024-03-07"), Some(expected));
        assert_eq!(parse_date("2024-03-07 00:00:00"), Some(expected));
        assert_eq!(parse_date("2024-03-07T12:30:00"), Some(expected));
        assert_eq!(parse_date("2024/03/07"), None);
    }

    #[test]
    fn test_slash_dates_read_month_first() {
        assert_eq!(
            parse_date("03/07/2024"),
            NaiveDate::from_ymd_opt(2024, 3, 7)
        );
        assert_eq!(
            parse_date("07/03/2024"),
            NaiveDate::from_ymd_opt(2024, 7, 3)
        );
        assert_eq!(
            parse_date("20/11/2023"),
            NaiveDate::from_ymd_opt(2023, 11, 20)
        );
        assert_eq!(parse_date("13/13/2023"), None);
    }

    #[test]
    fn test_quantities_accept_float_renderings() {
        let ds = load("1001,A01,12.0,2024-01-15,2.50,9.5,B1,S,AVAIL,Widget\n").unwrap();
        let rec = &ds.records()[0];
        assert_eq!(rec.system_qty, Decimal::from(12));
        assert_eq!(rec.reserved_qty, Decimal::new(25, 1));
        assert_eq!(rec.system_qty.to_string(), "12");
    }

    #[test]
    fn test_unknown_bdc_codes_are_reported_not_fatal() {
        let ds = load(
            "1001,A01,1,2024-01-15,0,1,B1,S,HOLD,Widget\n\
             1001,A01,1,2024-01-15,0,1,B2,S,HOLD,Widget\n\
             1001,A01,1,2024-01-15,0,1,B3,S,AVAIL,Widget\n",
        )
        .unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.report().unknown_bdc_codes.iter().collect::<Vec<_>>(),
            vec!["HOLD"]
        );
    }

    #[test]
    fn test_extra_columns_and_order_are_ignored() {
        let ds = Dataset::load(
            "name,bdc,sales,comb,avail,reserved_qty,man_date,system_qty,batch_loc,item,extra\n\
             Widget,AVAIL,S1,B1,3,2,2024-01-15,5,A01,77,ignored\n"
                .as_bytes(),
            &LoadOptions::default(),
        )
        .unwrap();
        let rec = &ds.records()[0];
        assert_eq!(rec.item.as_str(), "77");
        assert_eq!(rec.allocation_status, AllocationStatus::PartiallyAllocated);
    }

    #[test]
    fn test_load_path_missing_file() {
        let err = Dataset::load_path("/definitely/not/here.csv", &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
