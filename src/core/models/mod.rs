//! Domain models for reconciliation
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Dataset`] - Rows loaded from one input
//! - [`Record`] - A dataset row and its identity key
//! - [`RecordKey`] / [`KeyStrategy`] - Record identity and how it is derived
//! - [`Relationship`] - How a key relates across source and target
//! - [`FieldDiff`] - Per-field comparison outcome
//! - [`ReconciliationReport`] - The ordered, immutable result of a run

mod dataset;
mod field_diff;
mod key;
mod record;
mod relationship;
mod report;
mod value;

pub use dataset::Dataset;
pub use field_diff::{FieldDiff, FieldStatus};
pub use key::{KeyExtractor, KeyStrategy, RecordKey};
pub use record::{FieldMap, Record};
pub use relationship::Relationship;
pub use report::{DuplicateCandidates, ReconciliationReport, RecordDiff, Summary};
pub use value::FieldValue;
