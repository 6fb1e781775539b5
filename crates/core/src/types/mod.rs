//! Core types for SOH allocations.
//!
//! This module provides type-safe wrappers for the domain concepts shared by
//! the classifier, loader, query engine and front ends.

pub mod color;
pub mod item;
pub mod status;

pub use color::ColorToken;
pub use item::{ItemNumber, ItemNumberError};
pub use status::*;
