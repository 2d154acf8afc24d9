//! Canonical ordered string sequences for product options.
//!
//! The backing store delivers sizes, colors, and extra images in three
//! different shapes depending on how the row was seeded: a native JSON
//! array (`["S","M"]`), a JSON-encoded array inside a string
//! (`"[\"S\",\"M\"]"`), or a comma-delimited string (`"S,M,L"`).
//! [`OptionList`] normalizes all three at ingestion; downstream code only
//! ever sees an ordered `&[String]` and never re-parses.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// An ordered sequence of option strings (sizes, colors, image URLs).
///
/// Absent, `null`, and empty inputs all normalize to the empty sequence,
/// so callers branch on [`OptionList::is_empty`] rather than on whether
/// the field was present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct OptionList(Vec<String>);

impl OptionList {
    /// Create an empty option list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Normalize a raw wire value into an ordered sequence.
    ///
    /// Accepts the three shapes observed in the backing store:
    /// native array, JSON-encoded array string, and delimited string.
    /// Whitespace around delimited entries is trimmed; empty entries
    /// are dropped.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Array(items) => Self(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .filter(|s| !s.is_empty())
                    .collect(),
            ),
            serde_json::Value::String(raw) => Self::from_raw(raw),
            _ => Self::new(),
        }
    }

    /// Normalize a raw string: a JSON-encoded array if it parses as one,
    /// otherwise a comma-delimited list.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::new();
        }
        if trimmed.starts_with('[')
            && let Ok(serde_json::Value::Array(items)) = serde_json::from_str(trimmed)
        {
            return Self(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }
        Self(
            trimmed
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    /// The normalized entries, in ingestion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence contains the given entry.
    #[must_use]
    pub fn contains(&self, entry: &str) -> bool {
        self.0.iter().any(|s| s == entry)
    }

    /// Iterate over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for OptionList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

impl From<Vec<&str>> for OptionList {
    fn from(items: Vec<&str>) -> Self {
        Self(items.into_iter().map(String::from).collect())
    }
}

impl<'a> IntoIterator for &'a OptionList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for OptionList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Null => Ok(Self::new()),
            v @ (serde_json::Value::Array(_) | serde_json::Value::String(_)) => {
                Ok(Self::from_value(&v))
            }
            other => Err(de::Error::custom(format!(
                "expected array or string for option list, got {other}"
            ))),
        }
    }
}
