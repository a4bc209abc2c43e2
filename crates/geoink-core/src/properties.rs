//! Ordered key/value property mappings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An insertion-ordered mapping of unique string keys to string values.
///
/// Iteration order is the order keys were first inserted, which is what the
/// property editor displays. An IndexMap keeps that order stable across
/// lookups and removals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
    inner: IndexMap<String, String>,
}

impl Properties {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from key/value pairs, in order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            inner: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Insert or replace a value. New keys go to the end of the ordering;
    /// existing keys keep their position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.inner.insert(key.into(), value.into())
    }

    /// Remove a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.inner.shift_remove(key)
    }

    /// Rename a key in place.
    ///
    /// The renamed entry keeps its position in the ordering and carries its
    /// value over to the new name. When an entry under the new name already
    /// exists elsewhere, that entry is removed (last write wins). Returns
    /// false when `old` is not present.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        let Some(old_index) = self.inner.get_index_of(old) else {
            return false;
        };
        if old == new {
            return true;
        }
        let entries: Vec<(String, String)> = self.inner.drain(..).collect();
        for (index, (key, value)) in entries.into_iter().enumerate() {
            if index == old_index {
                self.inner.insert(new.to_string(), value);
            } else if key != new {
                self.inner.insert(key, value);
            }
        }
        true
    }

    /// Iterate entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
