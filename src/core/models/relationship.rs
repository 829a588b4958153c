//! Key relationships
//!
//! How a key's records relate between the source and target datasets.

use serde::{Deserialize, Serialize};

/// Classification of one key across both datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relationship {
    /// Exactly one source record, no target record
    OnlyInSource,
    /// Exactly one target record, no source record
    OnlyInTarget,
    /// One record on each side, all compared fields equal
    MatchedIdentical,
    /// One record on each side, at least one field differs
    MatchedDifferent,
    /// More than one record on either side; not compared
    DuplicateKey,
}

impl Relationship {
    /// All relationships in report order
    pub const ALL: [Self; 5] = [
        Self::MatchedIdentical,
        Self::MatchedDifferent,
        Self::OnlyInSource,
        Self::OnlyInTarget,
        Self::DuplicateKey,
    ];

    /// Canonical name, as used in structured output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnlyInSource => "ONLY_IN_SOURCE",
            Self::OnlyInTarget => "ONLY_IN_TARGET",
            Self::MatchedIdentical => "MATCHED_IDENTICAL",
            Self::MatchedDifferent => "MATCHED_DIFFERENT",
            Self::DuplicateKey => "DUPLICATE_KEY",
        }
    }

    /// Whether this relationship counts as a difference
    #[must_use]
    pub const fn is_difference(self) -> bool {
        !matches!(self, Self::MatchedIdentical)
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Relationship {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid relationship: {s}"))
    }
}
