//! Subcommand implementations.

pub mod check;
pub mod export;
pub mod query;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use soh_allocations_core::{Dataset, LoadError, LoadOptions};

/// Errors shared by the subcommands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Neither `--data` nor `SOH_DATA_PATH` was given.
    #[error("No dataset given: pass --data or set SOH_DATA_PATH")]
    MissingDataPath,

    /// The dataset failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Resolve the dataset path and load it.
///
/// An empty `excluded_locations` keeps the default exclusion set.
pub fn load(
    data: Option<PathBuf>,
    excluded_locations: Vec<String>,
) -> Result<Arc<Dataset>, CommandError> {
    let path = data
        .or_else(|| std::env::var_os("SOH_DATA_PATH").map(PathBuf::from))
        .ok_or(CommandError::MissingDataPath)?;

    let options = if excluded_locations.is_empty() {
        LoadOptions::default()
    } else {
        LoadOptions::default().with_excluded_locations(excluded_locations)
    };

    tracing::info!(path = %path.display(), "Loading dataset");
    Ok(Arc::new(Dataset::load_path(&path, &options)?))
}
