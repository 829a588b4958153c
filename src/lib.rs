//! reconciler - Compare two tabular datasets record by record
//!
//! Records are matched by key, matched pairs are compared field by field, and
//! every key is classified (identical, different, only on one side, or
//! ambiguous because of duplicates). The resulting report is rendered by a
//! pluggable writer: human-readable, structured CSV, JSON, or a failing
//! writer for CI gates.
//!
//! ```
//! use reconciler::core::models::{Dataset, FieldMap, Relationship};
//! use reconciler::core::services::{KeyedReconciler, ReconcileConfig, Reconciler};
//!
//! let row = |id: &str, name: &str| FieldMap::new().with("id", id).with("name", name);
//! let source = Dataset::new("source", vec![row("1", "A"), row("2", "B")]);
//! let target = Dataset::new("target", vec![row("1", "A"), row("2", "C")]);
//!
//! let config = ReconcileConfig { key: vec!["id".into()], ..ReconcileConfig::default() };
//! let report = KeyedReconciler::new(&config)?.reconcile(&source, &target)?;
//! assert_eq!(report.summary().count(Relationship::MatchedDifferent), 1);
//! # Ok::<(), reconciler::ReconcileError>(())
//! ```

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;
pub mod output;
pub mod registry;

pub use error::{ReconcileError, Result};
