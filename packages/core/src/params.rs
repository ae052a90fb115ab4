//! Caller-supplied parameter bags.
//!
//! A bag is the flat map of named inputs staged for one invocation.
//! Operations pull their positional identifiers out of the bag by name;
//! whatever remains is forwarded verbatim as the trailing structured
//! argument of add/update-shaped remote calls. Extraction is destructive
//! so the forwarded remainder never duplicates an already-extracted value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An order-irrelevant mapping from parameter name to a loosely-typed value.
///
/// Extraction removes the key from the bag; an absent key yields `None`
/// (the absent sentinel, not an error) and leaves the bag untouched, so a
/// second extraction of the same key within one invocation is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamBag {
    entries: Map<String, Value>,
}

impl ParamBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stages a parameter, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Removes `key` from the bag and returns its value.
    ///
    /// Returns `None` for an absent key; no other entry is affected either way.
    pub fn extract(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Reads `key` without removing it.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Consumes the bag into the JSON object forwarded as a trailing argument.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }
}

impl From<Map<String, Value>> for ParamBag {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ParamBag {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
