//! Selection store for checklist rows.
//!
//! Membership is tracked by flat node key, so it stays stable while the flat
//! node objects are refreshed in place.

use std::collections::HashSet;

use crate::node::FlatKey;

/// Set of explicitly selected flat nodes.
///
/// Only full selection is stored. Partial selection is derived from
/// descendant membership by the propagator.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<FlatKey>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: FlatKey) -> bool {
        self.selected.contains(&key)
    }

    /// Get the number of selected keys.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Iterate over selected keys in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = FlatKey> + '_ {
        self.selected.iter().copied()
    }

    /// Select all given keys.
    /// Returns the keys that were newly selected.
    pub fn select(&mut self, keys: impl IntoIterator<Item = FlatKey>) -> Vec<FlatKey> {
        keys.into_iter()
            .filter(|key| self.selected.insert(*key))
            .collect()
    }

    /// Deselect all given keys. Absent keys are ignored.
    /// Returns the keys that were removed.
    pub fn deselect(&mut self, keys: impl IntoIterator<Item = FlatKey>) -> Vec<FlatKey> {
        keys.into_iter()
            .filter(|key| self.selected.remove(key))
            .collect()
    }

    /// Flip membership of a single key.
    /// Returns true if the key is selected afterwards.
    pub fn toggle(&mut self, key: FlatKey) -> bool {
        if self.selected.remove(&key) {
            false
        } else {
            self.selected.insert(key);
            true
        }
    }

    /// Keep only keys accepted by `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(FlatKey) -> bool) {
        self.selected.retain(|key| keep(*key));
    }

    /// Clear all selection.
    /// Returns the keys that were deselected.
    pub fn clear(&mut self) -> Vec<FlatKey> {
        self.selected.drain().collect()
    }
}
