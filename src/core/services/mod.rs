//! Business logic services
//!
//! Pure orchestration logic that operates on domain models.
//! These services have no I/O dependencies - they operate on
//! data passed in and return results.
//!
//! - [`matcher`] - Group records by key and classify each key
//! - [`comparator`] - Compare matched record pairs field by field
//! - [`reconciler`] - Drive both over full datasets and build the report

pub mod comparator;
pub mod matcher;
pub mod reconciler;

pub use comparator::{Comparator, FieldComparator, ValueComparator};
pub use matcher::{KeyMatch, MatchKind, match_records};
pub use reconciler::{
    DuplicatePolicy, KeyedReconciler, NoOpReconciler, ReconcileConfig, Reconciler,
};
