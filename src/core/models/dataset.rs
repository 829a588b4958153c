//! Dataset model
//!
//! A named, ordered collection of rows as delivered by a dataset source.
//! Keys are not extracted yet; that is the reconciler's job.

use super::FieldMap;

/// A loaded dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Label used in messages (usually the file path)
    pub name: String,

    /// Rows in input order
    pub rows: Vec<FieldMap>,
}

impl Dataset {
    /// Create a dataset from rows
    #[must_use]
    pub fn new(name: impl Into<String>, rows: Vec<FieldMap>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether any row has the field
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.rows.iter().any(|row| row.contains(name))
    }
}
