//! Shared fixtures for handler and session tests.

use std::sync::Arc;

use soh_allocations_core::{Dataset, LoadOptions};

use crate::state::AppState;

pub const SOH_CSV: &str = "\
item,batch_loc,system_qty,man_date,reserved_qty,avail,comb,sales,bdc,name
1001.0,A01,10,2024-01-15,10,0,LOT-1,S-100,AVAIL,Widget
1001,A02,5,2024-02-20,0,5,LOT-2,S-101,QCLOCK,Widget
2002,B01,3,2023-11-02,1,2,LOT-9,S-200,QCPASSED,Gadget
1001,lab,99,2024-03-01,0,99,LOT-X,S-999,AVAIL,Widget
";

/// The fixture dataset loaded with default options.
#[allow(clippy::unwrap_used)]
pub fn dataset() -> Arc<Dataset> {
    Arc::new(Dataset::load(SOH_CSV.as_bytes(), &LoadOptions::default()).unwrap())
}

pub fn state() -> AppState {
    AppState::new(dataset())
}
