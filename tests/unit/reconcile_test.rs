//! Tests for matching, comparison and report assembly through the public API

use reconciler::ReconcileError;
use reconciler::core::models::{
    Dataset, FieldMap, FieldStatus, Record, RecordKey, Relationship, Summary,
};
use reconciler::core::services::{
    Comparator, DuplicatePolicy, FieldComparator, KeyedReconciler, MatchKind, ReconcileConfig,
    Reconciler, match_records,
};

use crate::common::{DatasetBuilder, keyed_on, reference_source, reference_target};

// =============================================================================
// REFERENCE SCENARIO
// =============================================================================

#[test]
fn test_reference_scenario_entries() {
    let report = keyed_on(&["id"]).reconcile(&reference_source(), &reference_target()).unwrap();

    let identical = report.get(&RecordKey::single("1")).unwrap();
    assert_eq!(identical.relationship, Relationship::MatchedIdentical);

    let different = report.get(&RecordKey::single("2")).unwrap();
    assert_eq!(different.relationship, Relationship::MatchedDifferent);
    let changes: Vec<_> = different.changes().collect();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].field_name, "name");
    assert_eq!(changes[0].status, FieldStatus::Changed);
    assert_eq!(changes[0].source_value.as_ref().unwrap().as_text(), "B");
    assert_eq!(changes[0].target_value.as_ref().unwrap().as_text(), "C");

    let only_target = report.get(&RecordKey::single("3")).unwrap();
    assert_eq!(only_target.relationship, Relationship::OnlyInTarget);
    assert!(only_target.field_diffs.is_empty());
}

#[test]
fn test_reference_scenario_summary() {
    let report = keyed_on(&["id"]).reconcile(&reference_source(), &reference_target()).unwrap();
    assert_eq!(
        *report.summary(),
        Summary {
            matched_identical: 1,
            matched_different: 1,
            only_in_source: 0,
            only_in_target: 1,
            duplicate_key: 0,
        }
    );
}

#[test]
fn test_first_field_is_default_key() {
    let reconciler = KeyedReconciler::new(&ReconcileConfig::default()).unwrap();
    let report = reconciler.reconcile(&reference_source(), &reference_target()).unwrap();
    assert_eq!(report.summary().matched_different, 1);
    assert_eq!(report.summary().only_in_target, 1);
}

// =============================================================================
// DUPLICATES
// =============================================================================

#[test]
fn test_duplicate_scenario() {
    let source = DatasetBuilder::new("source", &["id", "name"])
        .row(&["5", "A"])
        .row(&["5", "B"])
        .build();
    let target = DatasetBuilder::new("target", &["id", "name"]).row(&["5", "A"]).build();

    let report = keyed_on(&["id"]).reconcile(&source, &target).unwrap();
    assert_eq!(report.record_diffs().len(), 1);

    let entry = &report.record_diffs()[0];
    assert_eq!(entry.relationship, Relationship::DuplicateKey);
    assert!(entry.field_diffs.is_empty());
    assert_eq!(report.summary().duplicate_key, 1);
}

#[test]
fn test_duplicates_on_target_only() {
    let source = DatasetBuilder::new("source", &["id"]).row(&["7"]).build();
    let target = DatasetBuilder::new("target", &["id"]).row(&["7"]).row(&["7"]).build();

    let report = keyed_on(&["id"]).reconcile(&source, &target).unwrap();
    let candidates = report.record_diffs()[0].candidates.as_ref().unwrap();
    assert_eq!(candidates.source.len(), 1);
    assert_eq!(candidates.target.len(), 2);
}

#[test]
fn test_strict_duplicates_abort() {
    let config = ReconcileConfig {
        key: vec!["id".to_string()],
        duplicates: DuplicatePolicy::Error,
        ..ReconcileConfig::default()
    };
    let target = DatasetBuilder::new("target", &["id"]).row(&["7"]).row(&["7"]).build();
    let err = KeyedReconciler::new(&config)
        .unwrap()
        .reconcile(&Dataset::default(), &target)
        .unwrap_err();
    match err {
        ReconcileError::DuplicateKey { key } => assert_eq!(key, RecordKey::single("7")),
        other => panic!("unexpected error: {other}"),
    }
}

// =============================================================================
// KEYS
// =============================================================================

#[test]
fn test_composite_key() {
    let source = DatasetBuilder::new("source", &["invoice", "line", "amount"])
        .row(&["INV-1", "1", "10"])
        .row(&["INV-1", "2", "20"])
        .build();
    let target = DatasetBuilder::new("target", &["invoice", "line", "amount"])
        .row(&["INV-1", "2", "25"])
        .row(&["INV-1", "1", "10"])
        .build();

    let report = keyed_on(&["invoice", "line"]).reconcile(&source, &target).unwrap();
    assert_eq!(report.summary().matched_identical, 1);
    assert_eq!(report.summary().matched_different, 1);
    let changed = report.get(&RecordKey::new(["INV-1", "2"])).unwrap();
    assert_eq!(changed.relationship, Relationship::MatchedDifferent);
}

#[test]
fn test_report_order_follows_source_then_target() {
    let source = DatasetBuilder::new("source", &["id"]).row(&["b"]).row(&["a"]).build();
    let target = DatasetBuilder::new("target", &["id"]).row(&["c"]).row(&["a"]).build();

    let report = keyed_on(&["id"]).reconcile(&source, &target).unwrap();
    let keys: Vec<String> = report.record_diffs().iter().map(|d| d.key.to_string()).collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
}

#[test]
fn test_missing_key_field_in_some_rows() {
    let source = Dataset::new(
        "source",
        vec![
            FieldMap::new().with("id", "1").with("region", "eu"),
            FieldMap::new().with("id", "2"),
        ],
    );
    let report = keyed_on(&["id", "region"]).reconcile(&source, &Dataset::default()).unwrap();
    assert!(report.get(&RecordKey::new(["2", ""])).is_some());
}

// =============================================================================
// FIELD COMPARISON
// =============================================================================

#[test]
fn test_comparator_override_from_config() {
    let config = ReconcileConfig {
        key: vec!["id".to_string()],
        comparators: [("amount".to_string(), Comparator::Numeric { tolerance: 0.01 })]
            .into_iter()
            .collect(),
        ..ReconcileConfig::default()
    };
    let source = DatasetBuilder::new("source", &["id", "amount"]).row(&["1", "10.00"]).build();
    let target = DatasetBuilder::new("target", &["id", "amount"]).row(&["1", "10.001"]).build();

    let report = KeyedReconciler::new(&config).unwrap().reconcile(&source, &target).unwrap();
    assert_eq!(report.summary().matched_identical, 1);
}

#[test]
fn test_numeric_comparator_is_idempotent_for_non_finite_values() {
    let config = ReconcileConfig {
        key: vec!["id".to_string()],
        comparators: [("amount".to_string(), Comparator::Numeric { tolerance: 0.01 })]
            .into_iter()
            .collect(),
        ..ReconcileConfig::default()
    };
    let dataset = DatasetBuilder::new("ledger", &["id", "amount"])
        .row(&["1", "inf"])
        .row(&["2", "NaN"])
        .row(&["3", "-Infinity"])
        .row(&["4", "10.00"])
        .build();

    let report = KeyedReconciler::new(&config).unwrap().reconcile(&dataset, &dataset).unwrap();
    assert!(!report.summary().has_differences(), "{}", report.summary());
    assert_eq!(report.summary().matched_identical, 4);
}

#[test]
fn test_ignored_fields_are_not_reported() {
    let config = ReconcileConfig {
        key: vec!["id".to_string()],
        ignore: vec!["updated_at".to_string()],
        ..ReconcileConfig::default()
    };
    let source = DatasetBuilder::new("source", &["id", "updated_at"]).row(&["1", "monday"]).build();
    let target = DatasetBuilder::new("target", &["id", "updated_at"]).row(&["1", "tuesday"]).build();

    let report = KeyedReconciler::new(&config).unwrap().reconcile(&source, &target).unwrap();
    let entry = &report.record_diffs()[0];
    assert_eq!(entry.relationship, Relationship::MatchedIdentical);
    assert!(entry.field_diffs.iter().all(|d| d.field_name != "updated_at"));
}

#[test]
fn test_added_and_removed_fields() {
    let source = Record::new(RecordKey::single("1"), FieldMap::new().with("id", "1").with("old", "x"));
    let target = Record::new(RecordKey::single("1"), FieldMap::new().with("id", "1").with("new", "y"));

    let diffs = FieldComparator::default().compare(&source, &target);
    let statuses: Vec<(&str, FieldStatus)> =
        diffs.iter().map(|d| (d.field_name.as_str(), d.status)).collect();
    assert_eq!(
        statuses,
        vec![
            ("id", FieldStatus::Unchanged),
            ("old", FieldStatus::Removed),
            ("new", FieldStatus::Added),
        ]
    );
}

#[test]
fn test_custom_comparator_plugs_in() {
    #[derive(Debug)]
    struct DigitsOnly;

    impl reconciler::core::services::ValueComparator for DigitsOnly {
        fn equals(
            &self,
            source: &reconciler::core::models::FieldValue,
            target: &reconciler::core::models::FieldValue,
        ) -> bool {
            let digits = |v: &reconciler::core::models::FieldValue| {
                v.as_text().chars().filter(char::is_ascii_digit).collect::<String>()
            };
            digits(source) == digits(target)
        }
    }

    let source = DatasetBuilder::new("source", &["id", "phone"]).row(&["1", "555-0100"]).build();
    let target = DatasetBuilder::new("target", &["id", "phone"]).row(&["1", "(555) 0100"]).build();

    let reconciler = keyed_on(&["id"]).with_comparator(FieldComparator::new(DigitsOnly));
    let report = reconciler.reconcile(&source, &target).unwrap();
    assert_eq!(report.summary().matched_identical, 1);
}

// =============================================================================
// MATCHER
// =============================================================================

#[test]
fn test_matcher_classifies_keys() {
    let rec = |id: &str| Record::new(RecordKey::single(id), FieldMap::new().with("id", id));
    let source = vec![rec("1"), rec("2"), rec("2")];
    let target = vec![rec("1"), rec("3")];

    let kinds: Vec<(String, MatchKind)> = match_records(&source, &target)
        .iter()
        .map(|m| (m.key.to_string(), m.kind()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("1".to_string(), MatchKind::Candidate),
            ("2".to_string(), MatchKind::Duplicate),
            ("3".to_string(), MatchKind::OnlyInTarget),
        ]
    );
}

// =============================================================================
// EMPTY INPUT
// =============================================================================

#[test]
fn test_both_empty_is_error() {
    let err = keyed_on(&["id"]).reconcile(&Dataset::default(), &Dataset::default()).unwrap_err();
    assert!(matches!(err, ReconcileError::EmptyDataset));
}

#[test]
fn test_empty_source_reports_everything_only_in_target() {
    let report = keyed_on(&["id"]).reconcile(&Dataset::default(), &reference_target()).unwrap();
    assert_eq!(report.summary().only_in_target, 3);
    assert!(report.record_diffs().iter().all(|d| d.field_diffs.is_empty()));
}
