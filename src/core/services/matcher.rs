//! Record matcher service - groups records by key
//!
//! Pure function over its inputs: builds a key index for each side
//! (duplicates preserved) and classifies every key. Keys come out in
//! first-seen order, source records first, then keys seen only in the target,
//! so the result is deterministic without requiring keys to be sortable.

use std::collections::HashMap;

use crate::core::models::{Record, RecordKey};

/// How a key's record counts classify it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// One source record, no target record
    OnlyInSource,
    /// One target record, no source record
    OnlyInTarget,
    /// One record on each side; compare fields
    Candidate,
    /// More than one record on either side
    Duplicate,
}

/// All records sharing one key
#[derive(Debug, Clone)]
pub struct KeyMatch<'a> {
    /// The shared key
    pub key: &'a RecordKey,
    /// Source records with this key, in dataset order
    pub source: Vec<&'a Record>,
    /// Target records with this key, in dataset order
    pub target: Vec<&'a Record>,
}

impl KeyMatch<'_> {
    /// Classify this key by its record counts
    #[must_use]
    pub fn kind(&self) -> MatchKind {
        match (self.source.len(), self.target.len()) {
            (1, 0) => MatchKind::OnlyInSource,
            (0, 1) => MatchKind::OnlyInTarget,
            (1, 1) => MatchKind::Candidate,
            _ => MatchKind::Duplicate,
        }
    }
}

/// Group source and target records by key
///
/// Every key present on either side appears exactly once in the result.
#[must_use]
pub fn match_records<'a>(source: &'a [Record], target: &'a [Record]) -> Vec<KeyMatch<'a>> {
    let mut index: HashMap<&'a RecordKey, usize> = HashMap::new();
    let mut matches: Vec<KeyMatch<'a>> = Vec::new();

    for record in source {
        let i = slot_for(&mut index, &mut matches, &record.key);
        matches[i].source.push(record);
    }
    for record in target {
        let i = slot_for(&mut index, &mut matches, &record.key);
        matches[i].target.push(record);
    }

    matches
}

fn slot_for<'a>(
    index: &mut HashMap<&'a RecordKey, usize>,
    matches: &mut Vec<KeyMatch<'a>>,
    key: &'a RecordKey,
) -> usize {
    *index.entry(key).or_insert_with(|| {
        matches.push(KeyMatch {
            key,
            source: Vec::new(),
            target: Vec::new(),
        });
        matches.len() - 1
    })
}
