//! SOH Allocations Core - stock-on-hand allocation pipeline.
//!
//! This crate holds everything the front ends know about batches. It is
//! shared by:
//! - `soh-allocations-dashboard` - Web dashboard (scatter plot, batch table, totals, export)
//! - `soh-allocations-cli` - Command-line checks, queries and exports
//!
//! # Architecture
//!
//! The pipeline runs leaf-first:
//!
//! 1. [`classify`] - pure per-row status and colour rules
//! 2. [`dataset`] - CSV loading, location exclusion, item normalization
//! 3. [`query`] - item and availability selection
//! 4. [`summary`] - quantity totals over a selection or highlight
//! 5. [`controller`] - event-driven session publishing to a display surface
//!
//! The crate does no network I/O and owns no global state. The loaded
//! [`Dataset`] is immutable and meant to be shared behind an `Arc`.
//!
//! # Modules
//!
//! - [`types`] - Item numbers, statuses, filters and colour tokens
//! - [`record`] - Source rows and classified records
//! - [`export`] - CSV export of displayed batches

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod classify;
pub mod controller;
pub mod dataset;
pub mod export;
pub mod query;
pub mod record;
pub mod summary;
pub mod types;

pub use controller::{BatchView, Controller, ControllerState, DisplaySurface, InputEvent};
pub use dataset::{Dataset, LoadError, LoadOptions, LoadReport};
pub use query::query;
pub use record::{BatchRow, InventoryRecord};
pub use summary::{Totals, summarize};
pub use types::*;
