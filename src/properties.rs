//! Streams-properties store.
//!
//! Holds the key/value pairs sent alongside every statement as
//! `streamsProperties`. Entries keep their insertion order for display;
//! blank keys are skipped when the request payload is built.

use std::collections::HashMap;

/// Ordered collection of editable streams properties
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    entries: Vec<(String, String)>,
}

impl PropertyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing an existing entry in place.
    ///
    /// Keys and values are trimmed; a blank key is ignored.
    pub fn set(&mut self, key: &str, value: &str) {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        let value = value.trim().to_string();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    /// Remove a property; true if it was present.
    pub fn unset(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        self.entries.len() != before
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the request payload map, skipping blank keys.
    pub fn as_map(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .filter(|(key, _)| !key.trim().is_empty())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
