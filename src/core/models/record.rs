//! Record model
//!
//! A record is one row of a dataset: an ordered set of named fields plus the
//! identity key extracted from them.

use serde::{Serialize, Serializer};

use super::{FieldValue, KeyExtractor, RecordKey};

/// Ordered mapping of field name to value
///
/// Insertion order is preserved. Setting an existing field replaces its value
/// in place without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, FieldValue)>,
}

impl FieldMap {
    /// Create an empty field map
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set a field, keeping its original position if it already exists
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Builder-style [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a field value by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Whether the field is present (an explicit null counts as present)
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for FieldMap
where
    N: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(n, v)| (n, v)))
    }
}

/// A dataset row with its extracted identity key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Identity key
    pub key: RecordKey,

    /// Field values in column order
    pub fields: FieldMap,
}

impl Record {
    /// Create a record with an explicit key
    #[must_use]
    pub const fn new(key: RecordKey, fields: FieldMap) -> Self {
        Self { key, fields }
    }

    /// Create a record, deriving its key with the given extractor
    #[must_use]
    pub fn keyed<K: KeyExtractor + ?Sized>(fields: FieldMap, extractor: &K) -> Self {
        let key = extractor.extract(&fields);
        Self { key, fields }
    }

    /// Look up a field value by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}
