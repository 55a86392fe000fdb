//! Hierarchy queries over the flat sequence.
//!
//! No parent/child links are stored. Hierarchy is recovered from the
//! pre-order ordering of rows and each row's level.

use std::collections::HashMap;

use crate::flatten::Flattener;
use crate::node::{FlatKey, FlatNode};

/// Read-only view answering descendant and ancestor queries.
#[derive(Debug, Clone, Copy)]
pub struct TraversalIndex<'a> {
    rows: &'a [FlatKey],
    positions: &'a HashMap<FlatKey, usize>,
    flattener: &'a Flattener,
}

impl<'a> TraversalIndex<'a> {
    pub fn new(
        rows: &'a [FlatKey],
        positions: &'a HashMap<FlatKey, usize>,
        flattener: &'a Flattener,
    ) -> Self {
        Self {
            rows,
            positions,
            flattener,
        }
    }

    /// Index of a node in the flat sequence.
    pub fn position(&self, key: FlatKey) -> Option<usize> {
        self.positions.get(&key).copied()
    }

    fn node(&self, key: FlatKey) -> Option<&'a FlatNode> {
        self.flattener.get(key)
    }

    fn level(&self, key: FlatKey) -> Option<u16> {
        self.node(key).map(|n| n.level)
    }

    /// The contiguous run of deeper rows immediately following `key`.
    ///
    /// Stops at the first row whose level is not greater than the node's own
    /// level, or at the end of the sequence.
    pub fn descendants(&self, key: FlatKey) -> Vec<FlatKey> {
        let (Some(start), Some(level)) = (self.position(key), self.level(key)) else {
            return Vec::new();
        };
        self.rows[start + 1..]
            .iter()
            .copied()
            .take_while(|k| self.level(*k).is_some_and(|l| l > level))
            .collect()
    }

    /// Direct children: descendants exactly one level deeper.
    pub fn children(&self, key: FlatKey) -> Vec<FlatKey> {
        let Some(level) = self.level(key) else {
            return Vec::new();
        };
        self.descendants(key)
            .into_iter()
            .filter(|k| self.level(*k) == Some(level + 1))
            .collect()
    }

    /// Nearest preceding row with a strictly lower level.
    ///
    /// Returns None for roots.
    pub fn parent(&self, key: FlatKey) -> Option<FlatKey> {
        let level = self.level(key)?;
        if level < 1 {
            return None;
        }
        let start = self.position(key)?;
        self.rows[..start]
            .iter()
            .rev()
            .copied()
            .find(|k| self.level(*k).is_some_and(|l| l < level))
    }

    /// All strict ancestors, nearest first.
    pub fn ancestors(&self, key: FlatKey) -> Vec<FlatKey> {
        let mut out = Vec::new();
        let mut current = self.parent(key);
        while let Some(parent) = current {
            out.push(parent);
            current = self.parent(parent);
        }
        out
    }
}

/// Build the key-to-position lookup for a flat sequence.
pub fn index_positions(rows: &[FlatKey]) -> HashMap<FlatKey, usize> {
    rows.iter().enumerate().map(|(i, k)| (*k, i)).collect()
}
