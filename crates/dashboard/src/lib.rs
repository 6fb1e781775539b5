//! Allocations Report dashboard library.
//!
//! Serves the reactive allocations dashboard over HTTP. The binary loads the
//! SOH dataset once, wraps it in [`state::AppState`] and serves
//! [`routes::app`].
//!
//! # Security
//!
//! There is no authentication. Bind to an internal interface only.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod routes;
pub mod session;
pub mod state;

#[cfg(test)]
mod test_support;
