//! Reconciler service - orchestrates matching and field comparison
//!
//! The keyed reconciler drives the matcher once over both datasets, then the
//! field comparator once per single-record match, and assembles the report in
//! the matcher's key order. It performs no I/O.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::thread;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::comparator::{Comparator, FieldComparator};
use super::matcher::{KeyMatch, MatchKind, match_records};
use crate::core::models::{
    Dataset, DuplicateCandidates, FieldDiff, KeyExtractor, KeyStrategy, ReconciliationReport,
    Record, RecordDiff, Relationship,
};
use crate::error::{ReconcileError, Result};

/// What to do when a key appears more than once on either side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Report the key as `DUPLICATE_KEY`
    #[default]
    Report,
    /// Abort the run with [`ReconcileError::DuplicateKey`]
    Error,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "report" => Ok(Self::Report),
            "error" => Ok(Self::Error),
            _ => Err(format!("Invalid duplicate policy: {s}. Use: report, error")),
        }
    }
}

/// Reconciliation settings
///
/// Deserializes from the `[reconcile]` table of the configuration file:
///
/// ```toml
/// key = ["id"]
/// default_comparator = "exact"
/// ignore = ["updated_at"]
/// duplicates = "report"
/// parallelism = 1
///
/// [comparators]
/// amount = "numeric:0.01"
/// name = "case-insensitive"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcileConfig {
    /// Fields forming the record key; empty means "first field of each record"
    pub key: Vec<String>,

    /// Comparator for fields without an override
    pub default_comparator: Comparator,

    /// Per-field comparator overrides
    pub comparators: BTreeMap<String, Comparator>,

    /// Fields left out of the comparison
    pub ignore: Vec<String>,

    /// Duplicate key handling
    pub duplicates: DuplicatePolicy,

    /// Worker threads for field comparison (1 = compare on the calling thread)
    pub parallelism: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            key: Vec::new(),
            default_comparator: Comparator::Exact,
            comparators: BTreeMap::new(),
            ignore: Vec::new(),
            duplicates: DuplicatePolicy::Report,
            parallelism: 1,
        }
    }
}

impl ReconcileConfig {
    /// Key strategy described by this configuration
    #[must_use]
    pub fn key_strategy(&self) -> KeyStrategy {
        if self.key.is_empty() {
            KeyStrategy::FirstField
        } else {
            KeyStrategy::fields(self.key.iter().cloned())
        }
    }

    /// Field comparator described by this configuration
    #[must_use]
    pub fn field_comparator(&self) -> FieldComparator {
        let with_overrides = self
            .comparators
            .iter()
            .fold(FieldComparator::new(self.default_comparator), |acc, (field, comparator)| {
                acc.with_override(field.clone(), *comparator)
            });
        self.ignore.iter().fold(with_overrides, |acc, field| acc.ignoring(field.clone()))
    }

    /// Check the configuration for mistakes that do not depend on the data
    pub fn validate(&self) -> Result<()> {
        if let Some(blank) = self.key.iter().find(|f| f.trim().is_empty()) {
            return Err(ReconcileError::config(format!("blank key field name {blank:?}")));
        }
        if let Some(ignored) = self.key.iter().find(|f| self.ignore.contains(f)) {
            return Err(ReconcileError::config(format!(
                "key field '{ignored}' cannot also be ignored"
            )));
        }
        if self.parallelism == 0 {
            return Err(ReconcileError::config("parallelism must be at least 1"));
        }
        Ok(())
    }
}

/// Produces a reconciliation report from two datasets
pub trait Reconciler: Send + Sync + fmt::Debug {
    /// Reconcile `source` against `target`
    fn reconcile(&self, source: &Dataset, target: &Dataset) -> Result<ReconciliationReport>;
}

/// Reconciler that always reports nothing
///
/// A placeholder for wiring and tests; never inspects its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReconciler;

impl Reconciler for NoOpReconciler {
    fn reconcile(&self, _source: &Dataset, _target: &Dataset) -> Result<ReconciliationReport> {
        Ok(ReconciliationReport::empty())
    }
}

/// Key-based reconciler: match by key, compare fields of single matches
#[derive(Clone)]
pub struct KeyedReconciler {
    extractor: Arc<dyn KeyExtractor + Send + Sync>,
    comparator: FieldComparator,
    duplicates: DuplicatePolicy,
    parallelism: usize,
}

impl fmt::Debug for KeyedReconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedReconciler")
            .field("key_fields", &self.extractor.key_fields())
            .field("comparator", &self.comparator)
            .field("duplicates", &self.duplicates)
            .field("parallelism", &self.parallelism)
            .finish()
    }
}

impl KeyedReconciler {
    /// Build a reconciler from configuration
    pub fn new(config: &ReconcileConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            extractor: Arc::new(config.key_strategy()),
            comparator: config.field_comparator(),
            duplicates: config.duplicates,
            parallelism: config.parallelism,
        })
    }

    /// Replace the key extractor with a caller-supplied one
    #[must_use]
    pub fn with_key_extractor(mut self, extractor: impl KeyExtractor + Send + Sync + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Replace the field comparator (for custom equality policies)
    #[must_use]
    pub fn with_comparator(mut self, comparator: FieldComparator) -> Self {
        self.comparator = comparator;
        self
    }

    fn ensure_key_fields_present(&self, dataset: &Dataset) -> Result<()> {
        if dataset.is_empty() {
            return Ok(());
        }
        match self.extractor.key_fields().iter().find(|f| !dataset.has_field(f)) {
            Some(missing) => Err(ReconcileError::config(format!(
                "key field '{missing}' is absent from every record of '{}'",
                dataset.name
            ))),
            None => Ok(()),
        }
    }

    fn to_records(&self, dataset: &Dataset) -> Vec<Record> {
        dataset
            .rows
            .iter()
            .map(|row| Record::keyed(row.clone(), self.extractor.as_ref()))
            .collect()
    }

    fn compare_pairs(&self, pairs: &[(&Record, &Record)]) -> Vec<Vec<FieldDiff>> {
        let compare = |(source, target): &(&Record, &Record)| self.comparator.compare(source, target);

        if self.parallelism <= 1 || pairs.len() < 2 {
            return pairs.iter().map(compare).collect();
        }

        let chunk_size = pairs.len().div_ceil(self.parallelism);
        debug!("comparing {} pair(s) on {} worker(s)", pairs.len(), self.parallelism);
        thread::scope(|scope| {
            let workers: Vec<_> = pairs
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move || chunk.iter().map(compare).collect::<Vec<_>>()))
                .collect();
            workers
                .into_iter()
                .flat_map(|worker| worker.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        })
    }

    fn assemble(&self, matches: Vec<KeyMatch<'_>>) -> Result<Vec<RecordDiff>> {
        let pairs: Vec<(&Record, &Record)> = matches
            .iter()
            .filter(|m| m.kind() == MatchKind::Candidate)
            .map(|m| (m.source[0], m.target[0]))
            .collect();
        let mut compared = self.compare_pairs(&pairs).into_iter();

        let mut diffs = Vec::with_capacity(matches.len());
        for m in matches {
            let key = m.key.clone();
            let diff = match m.kind() {
                MatchKind::OnlyInSource => RecordDiff::uncompared(key, Relationship::OnlyInSource),
                MatchKind::OnlyInTarget => RecordDiff::uncompared(key, Relationship::OnlyInTarget),
                MatchKind::Candidate => RecordDiff::compared(key, compared.next().unwrap_or_default()),
                MatchKind::Duplicate => {
                    if self.duplicates == DuplicatePolicy::Error {
                        return Err(ReconcileError::DuplicateKey { key });
                    }
                    debug!(
                        "key '{key}' is ambiguous: {} source / {} target record(s)",
                        m.source.len(),
                        m.target.len()
                    );
                    RecordDiff::duplicate(
                        key,
                        DuplicateCandidates {
                            source: m.source.into_iter().cloned().collect(),
                            target: m.target.into_iter().cloned().collect(),
                        },
                    )
                },
            };
            diffs.push(diff);
        }
        Ok(diffs)
    }
}

impl Reconciler for KeyedReconciler {
    fn reconcile(&self, source: &Dataset, target: &Dataset) -> Result<ReconciliationReport> {
        if source.is_empty() && target.is_empty() {
            return Err(ReconcileError::EmptyDataset);
        }
        self.ensure_key_fields_present(source)?;
        self.ensure_key_fields_present(target)?;

        let source_records = self.to_records(source);
        let target_records = self.to_records(target);
        debug!(
            "reconciling {} source row(s) against {} target row(s)",
            source_records.len(),
            target_records.len()
        );

        let matches = match_records(&source_records, &target_records);
        let report = ReconciliationReport::new(self.assemble(matches)?);

        info!("reconciled {} key(s): {}", report.summary().total(), report.summary());
        Ok(report)
    }
}
