//! End-to-end tests for the Allocations Report.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p soh-allocations-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `allocation_scenarios` - load, query, totals and controller over a CSV fixture
//! - `dashboard_http` - the dashboard router driven through a full session
//!
//! Nothing here needs a running server; the router is exercised in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use soh_allocations_core::{Dataset, LoadError, LoadOptions};

/// A physical SOH export covering every classification branch.
///
/// - `1001`: fully allocated AVAIL batch and an unallocated QCLOCK batch, plus
///   a `lab` row that must be dropped
/// - `2002`: partially allocated QCPASSED batch
/// - `3003`: batches only in placeholder `*MISSING` locations
/// - `4004`: unknown BDC code
pub const SOH_CSV: &str = "\
item,batch_loc,system_qty,man_date,reserved_qty,avail,comb,sales,bdc,name,extra
1001.0,A01,10,2024-01-15,10,0,LOT-1,S-100,AVAIL,Widget,x
1001,A02,5,2024-02-20 00:00:00,0,5,LOT-2,S-101,QCLOCK,Widget,x
1001,lab,99,2024-03-01,0,99,LOT-X,S-999,AVAIL,Widget,x
2002,B01,8,20/11/2023,3,5,LOT-9,S-200,QCPASSED,Gadget,x
3003,HMISSING,4,2024-01-01,0,4,LOT-M,S-300,AVAIL,Ghost,x
3003,CDDMISSING,6,2024-01-02,0,6,LOT-N,S-301,AVAIL,Ghost,x
4004,C01,2,2024-04-01T08:30:00,0,2,LOT-Q,S-400,HOLD,Sprocket,x
";

/// Data rows in [`SOH_CSV`].
pub const RAW_ROWS: usize = 7;

/// Rows in [`SOH_CSV`] at excluded locations.
pub const EXCLUDED_ROWS: usize = 3;

/// Load a CSV fixture with default options.
///
/// # Errors
///
/// Returns the loader's error for an invalid fixture.
pub fn load(csv: &str) -> Result<Arc<Dataset>, LoadError> {
    Dataset::load(csv.as_bytes(), &LoadOptions::default()).map(Arc::new)
}

/// Load [`SOH_CSV`].
///
/// # Errors
///
/// Returns the loader's error if the fixture is invalid.
pub fn fixture() -> Result<Arc<Dataset>, LoadError> {
    load(SOH_CSV)
}
