//! Record identity keys
//!
//! A [`RecordKey`] is one or more string components. Composite keys render as
//! a single string with `|` between components; `|` and `\` inside a
//! component are escaped with a backslash so [`RecordKey::parse`] restores the
//! exact components.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::FieldMap;

/// Component separator in the rendered key
const SEPARATOR: char = '|';
const ESCAPE: char = '\\';

/// Identity key of a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(Vec<String>);

impl RecordKey {
    /// Build a key from its components
    #[must_use]
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// A single-component key
    #[must_use]
    pub fn single(value: impl Into<String>) -> Self {
        Self(vec![value.into()])
    }

    /// Key components
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Parse a rendered key back into its components
    #[must_use]
    pub fn parse(rendered: &str) -> Self {
        let mut parts = Vec::new();
        let mut current = String::new();
        let mut chars = rendered.chars();
        while let Some(c) = chars.next() {
            match c {
                ESCAPE => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    } else {
                        current.push(ESCAPE);
                    }
                },
                SEPARATOR => parts.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
        parts.push(current);
        Self(parts)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            for c in part.chars() {
                if c == SEPARATOR || c == ESCAPE {
                    write!(f, "{ESCAPE}")?;
                }
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl Serialize for RecordKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rendered = String::deserialize(deserializer)?;
        Ok(Self::parse(&rendered))
    }
}

/// Derives a record's identity key from its fields
///
/// Implemented by [`KeyStrategy`] and by any `Fn(&FieldMap) -> RecordKey`
/// closure, so library callers can plug in their own key function.
pub trait KeyExtractor {
    /// Compute the key for a set of fields
    fn extract(&self, fields: &FieldMap) -> RecordKey;

    /// Field names this extractor reads, used to validate configuration
    ///
    /// Extractors that cannot name their fields (closures) return an empty
    /// list and are not validated.
    fn key_fields(&self) -> &[String] {
        &[]
    }
}

impl<F> KeyExtractor for F
where
    F: Fn(&FieldMap) -> RecordKey,
{
    fn extract(&self, fields: &FieldMap) -> RecordKey {
        self(fields)
    }
}

/// Configured way of deriving record keys
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeyStrategy {
    /// Use the value of the first field of each record
    #[default]
    FirstField,
    /// Use the values of these fields, in order
    Fields(Vec<String>),
}

impl KeyStrategy {
    /// Key on the given field names
    #[must_use]
    pub fn fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fields(names.into_iter().map(Into::into).collect())
    }
}

impl KeyExtractor for KeyStrategy {
    fn extract(&self, fields: &FieldMap) -> RecordKey {
        match self {
            Self::FirstField => {
                let value = fields.iter().next().map(|(_, v)| v.as_text().into_owned());
                RecordKey::single(value.unwrap_or_default())
            },
            Self::Fields(names) => RecordKey::new(names.iter().map(|name| {
                fields.get(name).map(|v| v.as_text().into_owned()).unwrap_or_else(|| {
                    log::warn!("record is missing key field '{name}'; using an empty key part");
                    String::new()
                })
            })),
        }
    }

    fn key_fields(&self) -> &[String] {
        match self {
            Self::FirstField => &[],
            Self::Fields(names) => names,
        }
    }
}
