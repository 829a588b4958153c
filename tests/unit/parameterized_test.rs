//! Parameterized tests using test-case
//!
//! These tests use test-case to run the same test logic with different inputs.

use reconciler::core::models::{FieldValue, RecordKey, Relationship};
use reconciler::core::services::{Comparator, DuplicatePolicy, ValueComparator};
use test_case::test_case;

// =============================================================================
// Comparator Parsing Tests
// =============================================================================

#[test_case("exact", Comparator::Exact ; "exact")]
#[test_case("STRICT", Comparator::Strict ; "strict uppercase")]
#[test_case("case-insensitive", Comparator::CaseInsensitive ; "case insensitive dashed")]
#[test_case("case_insensitive", Comparator::CaseInsensitive ; "case insensitive underscored")]
#[test_case("ci", Comparator::CaseInsensitive ; "case insensitive short")]
#[test_case("numeric", Comparator::Numeric { tolerance: 0.0 } ; "numeric without tolerance")]
#[test_case("numeric:0.25", Comparator::Numeric { tolerance: 0.25 } ; "numeric with tolerance")]
fn test_comparator_parsing(input: &str, expected: Comparator) {
    assert_eq!(input.parse::<Comparator>().unwrap(), expected);
}

#[test_case("fuzzy" ; "unknown name")]
#[test_case("numeric:-1" ; "negative tolerance")]
#[test_case("numeric:abc" ; "non numeric tolerance")]
#[test_case("numeric:inf" ; "infinite tolerance")]
#[test_case("exact:1" ; "argument on exact")]
fn test_comparator_parsing_rejects(input: &str) {
    assert!(input.parse::<Comparator>().is_err());
}

// =============================================================================
// Comparator Semantics Tests
// =============================================================================

#[test_case(Comparator::Exact, "abc", "abc", true ; "exact equal")]
#[test_case(Comparator::Exact, " abc ", "abc", true ; "exact trims")]
#[test_case(Comparator::Exact, "abc", "ABC", false ; "exact is case sensitive")]
#[test_case(Comparator::Strict, " abc", "abc", false ; "strict keeps whitespace")]
#[test_case(Comparator::CaseInsensitive, "Alice ", "alice", true ; "case insensitive trims and folds")]
#[test_case(Comparator::Numeric { tolerance: 0.0 }, "1.0", "1", true ; "numeric formats")]
#[test_case(Comparator::Numeric { tolerance: 0.01 }, "10.00", "10.005", true ; "numeric within tolerance")]
#[test_case(Comparator::Numeric { tolerance: 0.01 }, "10.00", "10.02", false ; "numeric beyond tolerance")]
#[test_case(Comparator::Numeric { tolerance: 0.5 }, "n/a", "n/a", true ; "numeric falls back to text")]
#[test_case(Comparator::Numeric { tolerance: 0.5 }, "1", "n/a", false ; "numeric against text")]
#[test_case(Comparator::Numeric { tolerance: 0.01 }, "inf", "inf", true ; "numeric infinity equals itself")]
#[test_case(Comparator::Numeric { tolerance: 0.01 }, "NaN", "nan", true ; "numeric nan equals nan")]
#[test_case(Comparator::Numeric { tolerance: 0.01 }, "infinity", "Inf", true ; "numeric infinity spellings")]
#[test_case(Comparator::Numeric { tolerance: 0.01 }, "inf", "-inf", false ; "numeric infinity sign differs")]
#[test_case(Comparator::Numeric { tolerance: 1e300 }, "inf", "1e308", false ; "numeric infinity against finite")]
#[test_case(Comparator::Numeric { tolerance: 0.01 }, "NaN", "0", false ; "numeric nan against finite")]
fn test_comparator_equals(comparator: Comparator, a: &str, b: &str, expected: bool) {
    let (a, b) = (FieldValue::from(a), FieldValue::from(b));
    assert_eq!(comparator.equals(&a, &b), expected, "{comparator}: {a:?} vs {b:?}");
}

#[test_case(FieldValue::Integer(1), FieldValue::from("1"), true ; "integer and text")]
#[test_case(FieldValue::Float(2.5), FieldValue::from("2.5"), true ; "float and text")]
#[test_case(FieldValue::Bool(true), FieldValue::from("true"), true ; "bool and text")]
#[test_case(FieldValue::Null, FieldValue::from(""), true ; "null renders empty")]
fn test_typed_values_compare_by_text(a: FieldValue, b: FieldValue, expected: bool) {
    assert_eq!(Comparator::Exact.equals(&a, &b), expected);
}

// =============================================================================
// Relationship Tests
// =============================================================================

#[test_case("MATCHED_IDENTICAL", Relationship::MatchedIdentical ; "identical")]
#[test_case("matched_different", Relationship::MatchedDifferent ; "different lowercase")]
#[test_case("ONLY_IN_SOURCE", Relationship::OnlyInSource ; "only source")]
#[test_case("ONLY_IN_TARGET", Relationship::OnlyInTarget ; "only target")]
#[test_case("DUPLICATE_KEY", Relationship::DuplicateKey ; "duplicate")]
fn test_relationship_parsing(input: &str, expected: Relationship) {
    assert_eq!(input.parse::<Relationship>().unwrap(), expected);
    assert!(expected.as_str().eq_ignore_ascii_case(input));
}

#[test_case(Relationship::MatchedIdentical, false ; "identical is not a difference")]
#[test_case(Relationship::MatchedDifferent, true ; "different")]
#[test_case(Relationship::OnlyInSource, true ; "only source")]
#[test_case(Relationship::OnlyInTarget, true ; "only target")]
#[test_case(Relationship::DuplicateKey, true ; "duplicate")]
fn test_relationship_is_difference(relationship: Relationship, expected: bool) {
    assert_eq!(relationship.is_difference(), expected);
}

// =============================================================================
// Key Rendering Tests
// =============================================================================

#[test_case(&["1"], "1" ; "single")]
#[test_case(&["INV-1", "2"], "INV-1|2" ; "composite")]
#[test_case(&["a|b", "c"], "a\\|b|c" ; "separator escaped")]
#[test_case(&["a\\", "b"], "a\\\\|b" ; "escape escaped")]
#[test_case(&["", ""], "|" ; "empty parts")]
fn test_key_rendering(parts: &[&str], rendered: &str) {
    let key = RecordKey::new(parts.iter().copied());
    assert_eq!(key.to_string(), rendered);
    assert_eq!(RecordKey::parse(rendered), key);
}

// =============================================================================
// Duplicate Policy Tests
// =============================================================================

#[test_case("report", DuplicatePolicy::Report ; "report")]
#[test_case("Error", DuplicatePolicy::Error ; "error mixed case")]
fn test_duplicate_policy_parsing(input: &str, expected: DuplicatePolicy) {
    assert_eq!(input.parse::<DuplicatePolicy>().unwrap(), expected);
}
