//! Dataset source port
//!
//! Defines the interface for loading a dataset. A source either yields every
//! row in order or fails with `ReconcileError::RowParse` naming the bad row.

use crate::core::models::Dataset;
use crate::error::Result;

/// Loads one dataset
///
/// Implementations handle reading concrete formats (CSV files, in-memory
/// fixtures, etc.)
pub trait DatasetSource {
    /// Label used in messages and in the loaded [`Dataset`]
    fn name(&self) -> &str;

    /// Load every row, in input order
    fn load(&self) -> Result<Dataset>;
}

impl DatasetSource for Dataset {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Dataset> {
        Ok(self.clone())
    }
}
