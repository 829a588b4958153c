//! Per-field comparison results

use serde::{Deserialize, Serialize};

use super::FieldValue;

/// Outcome of comparing one field of a matched record pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldStatus {
    /// Present on both sides and equal
    Unchanged,
    /// Present on both sides and different
    Changed,
    /// Present only on the target record
    Added,
    /// Present only on the source record
    Removed,
}

impl FieldStatus {
    /// All statuses
    pub const ALL: [Self; 4] = [Self::Unchanged, Self::Changed, Self::Added, Self::Removed];

    /// Canonical name, as used in structured output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unchanged => "UNCHANGED",
            Self::Changed => "CHANGED",
            Self::Added => "ADDED",
            Self::Removed => "REMOVED",
        }
    }
}

impl std::fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FieldStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid field status: {s}"))
    }
}

/// Comparison result for a single field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDiff {
    /// Field name
    pub field_name: String,

    /// Value on the source record, if the field is present there
    pub source_value: Option<FieldValue>,

    /// Value on the target record, if the field is present there
    pub target_value: Option<FieldValue>,

    /// Comparison outcome
    pub status: FieldStatus,
}

impl FieldDiff {
    /// Whether this field contributes to a `MATCHED_DIFFERENT` outcome
    #[must_use]
    pub fn is_difference(&self) -> bool {
        self.status != FieldStatus::Unchanged
    }
}
