//! Reconciliation errors
//!
//! A duplicated key is normally not an error: it is reported as the
//! `DUPLICATE_KEY` relationship. It only becomes [`ReconcileError::DuplicateKey`]
//! when the configuration asks for strict duplicate handling.

use thiserror::Error;

use crate::core::models::{RecordKey, Summary};

/// Errors produced by the reconciliation engine and its adapters
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Bad key, field or comparator configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Both datasets were empty
    #[error("both datasets are empty; nothing to reconcile")]
    EmptyDataset,

    /// A malformed input row
    #[error("{dataset}: row {row}: {reason}")]
    RowParse {
        /// Dataset label (usually the file path)
        dataset: String,
        /// 1-based row number, counting the header row
        row: u64,
        /// What was wrong with the row
        reason: String,
    },

    /// A key appeared more than once while duplicates are configured as errors
    #[error("duplicate key '{key}'")]
    DuplicateKey {
        /// The duplicated key
        key: RecordKey,
    },

    /// Differences were found (raised only by the failing writer)
    #[error("reconciliation failed: {} difference(s) found ({summary})", summary.differences())]
    ReconciliationFailure {
        /// Counts per relationship at the time of failure
        summary: Summary,
    },

    /// No writer registered under the requested name
    #[error("unknown writer '{name}' (available: {available})")]
    UnknownWriter {
        /// Requested name
        name: String,
        /// Comma-separated registered names
        available: String,
    },

    /// No reconciler registered under the requested name
    #[error("unknown reconciler '{name}' (available: {available})")]
    UnknownReconciler {
        /// Requested name
        name: String,
        /// Comma-separated registered names
        available: String,
    },

    /// I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV reading or writing failure
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// JSON serialization failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ReconcileError {
    /// Shorthand for a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether this error signals "differences found" rather than a defect
    #[must_use]
    pub const fn is_reconciliation_failure(&self) -> bool {
        matches!(self, Self::ReconciliationFailure { .. })
    }
}

/// Result alias for reconciliation operations
pub type Result<T> = std::result::Result<T, ReconcileError>;
