//! Nested-to-flat transformation.

use std::collections::{HashMap, HashSet};

use log::{debug, trace, warn};

use crate::node::{FlatKey, FlatNode, NestedNode, NodeId, NodePath};

/// Level assigned to root nodes.
pub const ROOT_LEVEL: u16 = 1;

/// Converts nested trees into a pre-order flat sequence.
///
/// Owns the flat node objects and the two correspondence maps between nested
/// and flat nodes. Transforming a nested node whose id already has a flat
/// counterpart updates that counterpart in place instead of allocating a new
/// one, so keys held elsewhere (selection membership) stay valid even when
/// the node moves.
#[derive(Debug, Default)]
pub struct Flattener {
    /// Flat node objects by key.
    nodes: HashMap<FlatKey, FlatNode>,
    /// Nested node (by id) to flat node.
    nested_map: HashMap<NodeId, FlatKey>,
    /// Flat node to nested node (by current location).
    flat_map: HashMap<FlatKey, NodePath>,
    /// Next key to hand out.
    next_key: usize,
}

impl Flattener {
    /// Create an empty flattener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform one nested node into its flat counterpart.
    ///
    /// `level` is taken from the caller rather than from the nested node.
    /// The flat node mapped to `node.id` is reused only if it still carries
    /// that id; otherwise the stale object is dropped and a fresh one is
    /// allocated.
    ///
    /// A single call does not prune other flat nodes recorded at `path`, so
    /// the maps are only bijective again after `retain_materialized`, which
    /// `flatten` runs at the end of every pass.
    pub fn transform(&mut self, node: &NestedNode, path: NodePath, level: u16) -> FlatKey {
        let mapped = self.nested_map.get(&node.id).copied();
        let reusable = mapped.filter(|key| self.nodes.get(key).is_some_and(|flat| flat.id == node.id));

        let key = match reusable {
            Some(key) => {
                if let Some(flat) = self.nodes.get_mut(&key) {
                    flat.name.clone_from(&node.name);
                    flat.id = node.id;
                    flat.active = node.active;
                    flat.level = level;
                    flat.expandable = node.has_children();
                }
                key
            }
            None => {
                if let Some(stale) = mapped {
                    warn!("Flat node {} no longer carries id {}, reallocating", stale, node.id);
                    self.nodes.remove(&stale);
                    self.flat_map.remove(&stale);
                }
                self.allocate(node, level)
            }
        };

        self.flat_map.insert(key, path);
        self.nested_map.insert(node.id, key);
        key
    }

    fn allocate(&mut self, node: &NestedNode, level: u16) -> FlatKey {
        let key = FlatKey(self.next_key);
        self.next_key += 1;
        trace!("Allocated flat node {} for id {}", key, node.id);
        self.nodes.insert(key, FlatNode::from_nested(node, level));
        key
    }

    /// Flatten a list of roots in pre-order.
    ///
    /// Roots get `ROOT_LEVEL`, each child one more than its parent. Flat
    /// nodes for nested nodes no longer present are dropped afterwards.
    ///
    /// A repeated id gets its own row, but only the first occurrence is
    /// reachable by id and keeps its flat node across passes.
    pub fn flatten(&mut self, roots: &[NestedNode]) -> Vec<FlatKey> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        for (index, root) in roots.iter().enumerate() {
            self.collect(root, NodePath::root(index), ROOT_LEVEL, &mut seen, &mut out);
        }
        self.retain_materialized(&out);
        debug!("Flattened {} roots into {} rows", roots.len(), out.len());
        out
    }

    fn collect(
        &mut self,
        node: &NestedNode,
        path: NodePath,
        level: u16,
        seen: &mut HashSet<NodeId>,
        out: &mut Vec<FlatKey>,
    ) {
        let key = if seen.insert(node.id) {
            self.transform(node, path.clone(), level)
        } else {
            warn!("Duplicate id {} at {:?}", node.id, path.0);
            let key = self.allocate(node, level);
            self.flat_map.insert(key, path.clone());
            key
        };
        out.push(key);
        for (index, child) in node.children.iter().enumerate() {
            self.collect(child, path.child(index), level + 1, seen, out);
        }
    }

    /// Drop every flat node and map entry not in `keys`.
    pub fn retain_materialized(&mut self, keys: &[FlatKey]) {
        let live: HashSet<FlatKey> = keys.iter().copied().collect();
        let before = self.nodes.len();
        self.nodes.retain(|key, _| live.contains(key));
        self.flat_map.retain(|key, _| live.contains(key));
        self.nested_map.retain(|_, key| live.contains(key));
        let dropped = before - self.nodes.len();
        if dropped > 0 {
            debug!("Dropped {} stale flat nodes", dropped);
        }
    }

    /// Discard all flat nodes and both maps.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nested_map.clear();
        self.flat_map.clear();
    }

    /// Get a flat node by key.
    pub fn get(&self, key: FlatKey) -> Option<&FlatNode> {
        self.nodes.get(&key)
    }

    /// Flat node for the nested node with `id`.
    pub fn flat_for(&self, id: NodeId) -> Option<FlatKey> {
        self.nested_map.get(&id).copied()
    }

    /// Nested node location for a flat node.
    pub fn nested_for(&self, key: FlatKey) -> Option<&NodePath> {
        self.flat_map.get(&key)
    }

    /// Number of materialized flat nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if nothing is materialized.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
