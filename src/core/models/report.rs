//! Reconciliation report
//!
//! The complete, ordered result of one reconciliation run. A report is built
//! once from its record diffs and cannot be modified afterwards; the summary
//! is always derived from the diffs it holds.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FieldDiff, Record, RecordKey, Relationship};

/// Counts per relationship
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Summary {
    /// Keys matched with identical fields
    pub matched_identical: usize,
    /// Keys matched with differing fields
    pub matched_different: usize,
    /// Keys present only in the source
    pub only_in_source: usize,
    /// Keys present only in the target
    pub only_in_target: usize,
    /// Keys appearing more than once on either side
    pub duplicate_key: usize,
}

impl Summary {
    /// Count for one relationship
    #[must_use]
    pub const fn count(&self, relationship: Relationship) -> usize {
        match relationship {
            Relationship::MatchedIdentical => self.matched_identical,
            Relationship::MatchedDifferent => self.matched_different,
            Relationship::OnlyInSource => self.only_in_source,
            Relationship::OnlyInTarget => self.only_in_target,
            Relationship::DuplicateKey => self.duplicate_key,
        }
    }

    const fn increment(&mut self, relationship: Relationship) {
        match relationship {
            Relationship::MatchedIdentical => self.matched_identical += 1,
            Relationship::MatchedDifferent => self.matched_different += 1,
            Relationship::OnlyInSource => self.only_in_source += 1,
            Relationship::OnlyInTarget => self.only_in_target += 1,
            Relationship::DuplicateKey => self.duplicate_key += 1,
        }
    }

    /// Number of distinct keys
    #[must_use]
    pub const fn total(&self) -> usize {
        self.matched_identical
            + self.matched_different
            + self.only_in_source
            + self.only_in_target
            + self.duplicate_key
    }

    /// Number of keys with any relationship other than `MATCHED_IDENTICAL`
    #[must_use]
    pub const fn differences(&self) -> usize {
        self.total() - self.matched_identical
    }

    /// Whether anything other than identical matches was found
    #[must_use]
    pub const fn has_differences(&self) -> bool {
        self.differences() > 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Relationship::ALL
            .into_iter()
            .map(|r| format!("{r}={}", self.count(r)))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Every record sharing a duplicated key
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DuplicateCandidates {
    /// Source records with the key, in dataset order
    pub source: Vec<Record>,
    /// Target records with the key, in dataset order
    pub target: Vec<Record>,
}

/// Reconciliation outcome for one key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDiff {
    /// The key
    pub key: RecordKey,

    /// How the key relates across the datasets
    pub relationship: Relationship,

    /// Field comparison results; empty unless the key was compared
    pub field_diffs: Vec<FieldDiff>,

    /// All candidate records for `DUPLICATE_KEY` entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<DuplicateCandidates>,
}

impl RecordDiff {
    /// Entry for a key with no field comparison
    #[must_use]
    pub const fn uncompared(key: RecordKey, relationship: Relationship) -> Self {
        Self {
            key,
            relationship,
            field_diffs: Vec::new(),
            candidates: None,
        }
    }

    /// Entry for a compared pair; the relationship follows from the diffs
    #[must_use]
    pub fn compared(key: RecordKey, field_diffs: Vec<FieldDiff>) -> Self {
        let relationship = if field_diffs.iter().any(FieldDiff::is_difference) {
            Relationship::MatchedDifferent
        } else {
            Relationship::MatchedIdentical
        };
        Self {
            key,
            relationship,
            field_diffs,
            candidates: None,
        }
    }

    /// Entry for a duplicated key with its candidate records attached
    #[must_use]
    pub const fn duplicate(key: RecordKey, candidates: DuplicateCandidates) -> Self {
        Self {
            key,
            relationship: Relationship::DuplicateKey,
            field_diffs: Vec::new(),
            candidates: Some(candidates),
        }
    }

    /// Field diffs that are not `UNCHANGED`
    pub fn changes(&self) -> impl Iterator<Item = &FieldDiff> {
        self.field_diffs.iter().filter(|d| d.is_difference())
    }
}

/// The complete result of a reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconciliationReport {
    record_diffs: Vec<RecordDiff>,
    summary: Summary,
}

impl ReconciliationReport {
    /// Build a report from record diffs in their final order
    #[must_use]
    pub fn new(record_diffs: Vec<RecordDiff>) -> Self {
        let mut summary = Summary::default();
        for diff in &record_diffs {
            summary.increment(diff.relationship);
        }
        Self {
            record_diffs,
            summary,
        }
    }

    /// A report with no keys
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record diffs in report order
    #[must_use]
    pub fn record_diffs(&self) -> &[RecordDiff] {
        &self.record_diffs
    }

    /// Counts per relationship
    #[must_use]
    pub const fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Find the entry for a key
    #[must_use]
    pub fn get(&self, key: &RecordKey) -> Option<&RecordDiff> {
        self.record_diffs.iter().find(|d| &d.key == key)
    }

    /// Entries whose relationship is a difference
    pub fn differences(&self) -> impl Iterator<Item = &RecordDiff> {
        self.record_diffs.iter().filter(|d| d.relationship.is_difference())
    }

    /// Whether the report holds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_diffs.is_empty()
    }
}
