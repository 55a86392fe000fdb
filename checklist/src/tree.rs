//! Checklist tree with tri-state selection propagation.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::error::ChecklistError;
use crate::flatten::Flattener;
use crate::node::{CheckState, FlatKey, FlatNode, NestedNode, NodeId};
use crate::selection::Selection;
use crate::traversal::{TraversalIndex, index_positions};

/// Keys added and removed by one operation.
pub type SelectionDelta = (Vec<FlatKey>, Vec<FlatKey>);

/// A hierarchical checklist.
///
/// Owns the nested roots, the flattener with its correspondence maps, the
/// flat row sequence, the selection and the expanded set. Every instance is
/// independent.
///
/// Stored membership of a node with descendants is a cache of "every
/// descendant is selected". It is re-synchronized bottom-up after each
/// toggle, nearest ancestor first, so each ancestor reads the already-fixed
/// state of the one below it.
///
/// # Example
///
/// ```
/// use checklist::{Checklist, NestedNode, NodeId};
///
/// let mut list = Checklist::new(vec![NestedNode::branch(
///     1,
///     "root",
///     vec![NestedNode::leaf(2, "a"), NestedNode::leaf(3, "b")],
/// )]);
///
/// let a = list.find(NodeId(2)).unwrap();
/// list.toggle(a);
/// let root = list.find(NodeId(1)).unwrap();
/// assert!(list.partially_selected(root));
/// ```
#[derive(Debug, Default)]
pub struct Checklist {
    roots: Vec<NestedNode>,
    flattener: Flattener,
    rows: Vec<FlatKey>,
    positions: HashMap<FlatKey, usize>,
    selection: Selection,
    /// Ids of expanded rows. Rows start collapsed.
    expanded: HashSet<NodeId>,
}

impl Checklist {
    /// Create a checklist from root nodes.
    pub fn new(roots: Vec<NestedNode>) -> Self {
        let mut list = Self {
            roots,
            ..Default::default()
        };
        list.refresh();
        list
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Replace the tree. Flat nodes, maps, selection and expansion are
    /// discarded.
    pub fn set_roots(&mut self, roots: Vec<NestedNode>) {
        self.flattener.clear();
        self.selection.clear();
        self.expanded.clear();
        self.roots = roots;
        self.refresh();
    }

    /// Swap in new roots but keep flat node identity where possible.
    ///
    /// A node whose id is still present keeps its flat node and its
    /// selection membership, wherever it moved. Stored membership of rows
    /// with descendants is re-derived afterwards.
    pub fn update_roots(&mut self, roots: Vec<NestedNode>) {
        self.roots = roots;
        self.refresh();
    }

    /// Re-flatten the current roots.
    ///
    /// Flat nodes are reused, so selection survives. Selection entries whose
    /// node is no longer materialized are dropped, and rows with descendants
    /// are re-synchronized with what is now below them.
    pub fn refresh(&mut self) {
        self.rows = self.flattener.flatten(&self.roots);
        self.positions = index_positions(&self.rows);
        let positions = &self.positions;
        self.selection.retain(|key| positions.contains_key(&key));

        let flattener = &self.flattener;
        self.expanded.retain(|id| {
            flattener
                .flat_for(*id)
                .and_then(|key| flattener.get(key))
                .is_some_and(|node| node.expandable)
        });

        let (added, removed) = self.resync_branches();
        if !added.is_empty() || !removed.is_empty() {
            debug!("Refresh resync: +{} -{}", added.len(), removed.len());
        }
    }

    /// Re-derive stored membership of every row with descendants.
    ///
    /// Rows are visited in reverse order, so each one reads already-fixed
    /// state from the rows below it.
    ///
    /// Returns (added, removed) keys.
    pub fn resync_branches(&mut self) -> SelectionDelta {
        let mut added = Vec::new();
        let mut removed = Vec::new();
        let branches: Vec<FlatKey> = self
            .iter()
            .filter(|(_, node)| node.expandable)
            .map(|(key, _)| key)
            .collect();
        for key in branches.into_iter().rev() {
            match self.fix_ancestor_state(key) {
                Some(true) => added.push(key),
                Some(false) => removed.push(key),
                None => {}
            }
        }
        (added, removed)
    }

    /// Root nodes in nested form.
    pub fn roots(&self) -> &[NestedNode] {
        &self.roots
    }

    /// Flat rows in display order.
    pub fn rows(&self) -> &[FlatKey] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the tree has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows with their flat nodes.
    pub fn iter(&self) -> impl Iterator<Item = (FlatKey, &FlatNode)> + '_ {
        self.rows
            .iter()
            .filter_map(|key| self.flattener.get(*key).map(|node| (*key, node)))
    }

    /// Get a flat node by key.
    pub fn node(&self, key: FlatKey) -> Option<&FlatNode> {
        self.flattener.get(key)
    }

    /// Get the nested node a flat node was transformed from.
    pub fn nested_node(&self, key: FlatKey) -> Option<&NestedNode> {
        let path = self.flattener.nested_for(key)?;
        NestedNode::at_path(&self.roots, path)
    }

    /// Find the row for a node id.
    pub fn find(&self, id: NodeId) -> Option<FlatKey> {
        self.flattener.flat_for(id).filter(|key| self.positions.contains_key(key))
    }

    /// Find the row for a node id, or fail with `UnknownNode`.
    pub fn require(&self, id: NodeId) -> Result<FlatKey, ChecklistError> {
        self.find(id).ok_or(ChecklistError::UnknownNode(id))
    }

    /// Hierarchy queries over the current rows.
    pub fn index(&self) -> TraversalIndex<'_> {
        TraversalIndex::new(&self.rows, &self.positions, &self.flattener)
    }

    /// All descendants of a row, in display order.
    pub fn descendants(&self, key: FlatKey) -> Vec<FlatKey> {
        self.index().descendants(key)
    }

    /// Parent of a row, or None for roots.
    pub fn parent(&self, key: FlatKey) -> Option<FlatKey> {
        self.index().parent(key)
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    /// Expand a row. Does nothing for rows without children.
    ///
    /// Returns true if the row was collapsed before.
    pub fn expand(&mut self, key: FlatKey) -> bool {
        match self.node(key).map(|n| (n.id, n.expandable)) {
            Some((id, true)) => self.expanded.insert(id),
            _ => false,
        }
    }

    /// Collapse a row.
    ///
    /// Returns true if the row was expanded before.
    pub fn collapse(&mut self, key: FlatKey) -> bool {
        match self.node(key).map(|n| n.id) {
            Some(id) => self.expanded.remove(&id),
            None => false,
        }
    }

    /// Flip a row between expanded and collapsed.
    ///
    /// Returns the new expanded state.
    pub fn toggle_expanded(&mut self, key: FlatKey) -> bool {
        if self.is_expanded(key) {
            self.collapse(key);
            false
        } else {
            self.expand(key)
        }
    }

    /// Whether a row is expanded.
    pub fn is_expanded(&self, key: FlatKey) -> bool {
        self.node(key)
            .is_some_and(|node| self.expanded.contains(&node.id))
    }

    /// Expand every row with children.
    pub fn expand_all(&mut self) {
        let ids: Vec<NodeId> = self
            .iter()
            .filter(|(_, node)| node.expandable)
            .map(|(_, node)| node.id)
            .collect();
        self.expanded.extend(ids);
    }

    /// Collapse every row.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Rows not hidden under a collapsed ancestor, in display order.
    ///
    /// Roots are always visible. Hierarchy and selection queries keep
    /// working on the full row sequence.
    pub fn visible_rows(&self) -> Vec<FlatKey> {
        let mut out = Vec::new();
        // Rows deeper than this level sit under a collapsed row.
        let mut hide_below: Option<u16> = None;
        for (key, node) in self.iter() {
            if let Some(level) = hide_below {
                if node.level > level {
                    continue;
                }
                hide_below = None;
            }
            out.push(key);
            if node.expandable && !self.expanded.contains(&node.id) {
                hide_below = Some(node.level);
            }
        }
        out
    }

    // -------------------------------------------------------------------------
    // Selection queries
    // -------------------------------------------------------------------------

    /// Direct membership in the selection.
    pub fn is_selected(&self, key: FlatKey) -> bool {
        self.selection.is_selected(key)
    }

    /// Whether the row has descendants and all of them are selected.
    pub fn all_selected(&self, key: FlatKey) -> bool {
        let descendants = self.descendants(key);
        !descendants.is_empty() && descendants.iter().all(|d| self.is_selected(*d))
    }

    /// Whether some, but not all, descendants are selected.
    pub fn partially_selected(&self, key: FlatKey) -> bool {
        let descendants = self.descendants(key);
        let any = descendants.iter().any(|d| self.is_selected(*d));
        let all = !descendants.is_empty() && descendants.iter().all(|d| self.is_selected(*d));
        any && !all
    }

    /// Checkbox value to display for a row.
    ///
    /// Rows with descendants show the derived state; leaves show direct
    /// membership.
    pub fn check_state(&self, key: FlatKey) -> CheckState {
        let descendants = self.descendants(key);
        if descendants.is_empty() {
            return if self.is_selected(key) {
                CheckState::Checked
            } else {
                CheckState::Unchecked
            };
        }
        let selected = descendants.iter().filter(|d| self.is_selected(**d)).count();
        if selected == descendants.len() {
            CheckState::Checked
        } else if selected > 0 {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }

    /// The selection store.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected rows in display order.
    pub fn selected_keys(&self) -> Vec<FlatKey> {
        self.rows
            .iter()
            .copied()
            .filter(|key| self.is_selected(*key))
            .collect()
    }

    /// Selected node ids (sorted for deterministic ordering).
    pub fn selected_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<_> = self
            .selection
            .iter()
            .filter_map(|key| self.node(key).map(|n| n.id))
            .collect();
        ids.sort();
        ids
    }

    /// Clear all selection.
    pub fn deselect_all(&mut self) -> Vec<FlatKey> {
        self.selection.clear()
    }

    // -------------------------------------------------------------------------
    // Toggle events
    // -------------------------------------------------------------------------

    /// Toggle a row, choosing branch or leaf handling from its `expandable`
    /// flag.
    pub fn toggle(&mut self, key: FlatKey) -> SelectionDelta {
        match self.node(key).map(|n| n.expandable) {
            Some(true) => self.toggle_branch(key),
            Some(false) => self.toggle_leaf(key),
            None => {
                warn!("Toggle on unknown flat node {}", key);
                (vec![], vec![])
            }
        }
    }

    /// Toggle a row and its whole subtree, then fix ancestors.
    ///
    /// Returns (added, removed) keys.
    pub fn toggle_branch(&mut self, key: FlatKey) -> SelectionDelta {
        if self.node(key).is_none() {
            warn!("Branch toggle on unknown flat node {}", key);
            return (vec![], vec![]);
        }

        let mut added = Vec::new();
        let mut removed = Vec::new();

        let now_selected = self.selection.toggle(key);
        if now_selected {
            added.push(key);
        } else {
            removed.push(key);
        }

        let descendants = self.descendants(key);
        if !descendants.is_empty() {
            if now_selected {
                added.extend(self.selection.select(descendants));
            } else {
                removed.extend(self.selection.deselect(descendants));
            }
        }

        let (up_added, up_removed) = self.check_all_parents(key);
        added.extend(up_added);
        removed.extend(up_removed);
        debug!(
            "Branch toggle {}: +{} -{}",
            key,
            added.len(),
            removed.len()
        );
        (added, removed)
    }

    /// Toggle a single row, then fix ancestors.
    ///
    /// Returns (added, removed) keys.
    pub fn toggle_leaf(&mut self, key: FlatKey) -> SelectionDelta {
        if self.node(key).is_none() {
            warn!("Leaf toggle on unknown flat node {}", key);
            return (vec![], vec![]);
        }

        let (mut added, mut removed) = if self.selection.toggle(key) {
            (vec![key], vec![])
        } else {
            (vec![], vec![key])
        };

        let (up_added, up_removed) = self.check_all_parents(key);
        added.extend(up_added);
        removed.extend(up_removed);
        debug!("Leaf toggle {}: +{} -{}", key, added.len(), removed.len());
        (added, removed)
    }

    /// Fix every strict ancestor of a row, nearest first.
    ///
    /// Returns (added, removed) keys.
    pub fn check_all_parents(&mut self, key: FlatKey) -> SelectionDelta {
        let mut added = Vec::new();
        let mut removed = Vec::new();
        let mut current = self.parent(key);
        while let Some(parent) = current {
            match self.fix_ancestor_state(parent) {
                Some(true) => added.push(parent),
                Some(false) => removed.push(parent),
                None => {}
            }
            current = self.parent(parent);
        }
        (added, removed)
    }

    /// Re-synchronize a row's stored membership with its derived state.
    ///
    /// Returns `Some(true)` if the row was promoted, `Some(false)` if it was
    /// demoted, `None` if unchanged.
    pub fn fix_ancestor_state(&mut self, key: FlatKey) -> Option<bool> {
        let stored = self.is_selected(key);
        let all = self.all_selected(key);
        if stored && !all {
            self.selection.deselect([key]);
            Some(false)
        } else if !stored && all {
            self.selection.select([key]);
            Some(true)
        } else {
            None
        }
    }
}
