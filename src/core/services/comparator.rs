//! Field comparator service - per-field deltas for a matched record pair
//!
//! Field order is the union of both records' fields: source order first,
//! then fields only the target has. Equality is decided per field by a
//! [`ValueComparator`], with a configurable default.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::models::{FieldDiff, FieldStatus, FieldValue, Record};

/// Equality policy for two present field values
pub trait ValueComparator: Send + Sync + fmt::Debug {
    /// Whether the two values are considered equal
    fn equals(&self, source: &FieldValue, target: &FieldValue) -> bool;
}

/// Named built-in comparators, selectable from configuration
///
/// Parsed from `exact`, `strict`, `case-insensitive` or `numeric[:tolerance]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Comparator {
    /// Text equality after trimming surrounding whitespace
    #[default]
    Exact,
    /// Byte-for-byte text equality
    Strict,
    /// Trimmed, case-insensitive text equality
    CaseInsensitive,
    /// Numbers within an absolute tolerance; falls back to `Exact` for non-numbers
    Numeric {
        /// Largest allowed absolute difference
        tolerance: f64,
    },
}

impl ValueComparator for Comparator {
    fn equals(&self, source: &FieldValue, target: &FieldValue) -> bool {
        match self {
            Self::Exact => source.as_text().trim() == target.as_text().trim(),
            Self::Strict => source.as_text() == target.as_text(),
            Self::CaseInsensitive => {
                source.as_text().trim().to_lowercase() == target.as_text().trim().to_lowercase()
            },
            Self::Numeric { tolerance } => match (source.as_number(), target.as_number()) {
                (Some(a), Some(b)) if a.is_finite() && b.is_finite() => (a - b).abs() <= *tolerance,
                (Some(a), Some(b)) => same_non_finite(a, b),
                _ => Self::Exact.equals(source, target),
            },
        }
    }
}

/// NaN matches NaN and infinities match by sign; a finite number matches neither
fn same_non_finite(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan())
        || (a.is_infinite() && b.is_infinite() && a.is_sign_positive() == b.is_sign_positive())
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Strict => write!(f, "strict"),
            Self::CaseInsensitive => write!(f, "case-insensitive"),
            Self::Numeric { tolerance } => write!(f, "numeric:{tolerance}"),
        }
    }
}

impl std::str::FromStr for Comparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let (name, arg) = s.split_once(':').map_or((s.as_str(), None), |(n, a)| (n, Some(a)));
        match (name, arg) {
            ("exact", None) => Ok(Self::Exact),
            ("strict", None) => Ok(Self::Strict),
            ("case-insensitive" | "case_insensitive" | "ci", None) => Ok(Self::CaseInsensitive),
            ("numeric", None) => Ok(Self::Numeric { tolerance: 0.0 }),
            ("numeric", Some(tol)) => match tol.trim().parse::<f64>() {
                Ok(tolerance) if tolerance.is_finite() && tolerance >= 0.0 => {
                    Ok(Self::Numeric { tolerance })
                },
                _ => Err(format!("Invalid numeric tolerance: {tol}")),
            },
            _ => Err(format!(
                "Invalid comparator: {s}. Use: exact, strict, case-insensitive, numeric[:tolerance]"
            )),
        }
    }
}

impl TryFrom<String> for Comparator {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Comparator> for String {
    fn from(value: Comparator) -> Self {
        value.to_string()
    }
}

/// Compares matched record pairs field by field
#[derive(Debug, Clone)]
pub struct FieldComparator {
    default: Arc<dyn ValueComparator>,
    overrides: HashMap<String, Arc<dyn ValueComparator>>,
    ignored: HashSet<String>,
}

impl Default for FieldComparator {
    fn default() -> Self {
        Self::new(Comparator::Exact)
    }
}

impl FieldComparator {
    /// Create a comparator with the given default policy
    #[must_use]
    pub fn new(default: impl ValueComparator + 'static) -> Self {
        Self {
            default: Arc::new(default),
            overrides: HashMap::new(),
            ignored: HashSet::new(),
        }
    }

    /// Use a different policy for one field
    #[must_use]
    pub fn with_override(
        mut self,
        field: impl Into<String>,
        comparator: impl ValueComparator + 'static,
    ) -> Self {
        self.overrides.insert(field.into(), Arc::new(comparator));
        self
    }

    /// Leave a field out of the comparison entirely
    #[must_use]
    pub fn ignoring(mut self, field: impl Into<String>) -> Self {
        self.ignored.insert(field.into());
        self
    }

    fn comparator_for(&self, field: &str) -> &dyn ValueComparator {
        self.overrides.get(field).map_or(self.default.as_ref(), |c| c.as_ref())
    }

    /// Compare two records sharing a key
    #[must_use]
    pub fn compare(&self, source: &Record, target: &Record) -> Vec<FieldDiff> {
        let source_names = source.fields.names();
        let target_only = target.fields.names().filter(|name| !source.fields.contains(name));

        source_names
            .chain(target_only)
            .filter(|name| !self.ignored.contains(*name))
            .map(|name| {
                let source_value = source.get(name);
                let target_value = target.get(name);
                let status = match (source_value, target_value) {
                    (Some(s), Some(t)) if self.comparator_for(name).equals(s, t) => {
                        FieldStatus::Unchanged
                    },
                    (Some(_), Some(_)) => FieldStatus::Changed,
                    (Some(_), None) => FieldStatus::Removed,
                    (None, _) => FieldStatus::Added,
                };
                FieldDiff {
                    field_name: name.to_string(),
                    source_value: source_value.cloned(),
                    target_value: target_value.cloned(),
                    status,
                }
            })
            .collect()
    }
}
