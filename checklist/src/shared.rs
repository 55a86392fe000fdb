//! Shared checklist handle.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::tree::{Checklist, SelectionDelta};
use crate::node::{CheckState, FlatKey, FlatNode, NestedNode, NodeId};

/// Unique identifier for a checklist instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChecklistId(usize);

impl ChecklistId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ChecklistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__checklist_{}", self.0)
    }
}

/// A clonable handle to one checklist, for hosts that can trigger toggles
/// from more than one place.
///
/// Each toggle holds the write lock for its whole toggle-and-propagate
/// cycle, so readers never observe a half-propagated selection. Clones share
/// state.
#[derive(Debug)]
pub struct SharedChecklist {
    id: ChecklistId,
    inner: Arc<RwLock<Checklist>>,
    dirty: Arc<AtomicBool>,
}

impl SharedChecklist {
    /// Create a shared checklist from root nodes.
    pub fn new(roots: Vec<NestedNode>) -> Self {
        Self::from_checklist(Checklist::new(roots))
    }

    /// Wrap an existing checklist.
    pub fn from_checklist(list: Checklist) -> Self {
        Self {
            id: ChecklistId::new(),
            inner: Arc::new(RwLock::new(list)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the unique ID.
    pub fn id(&self) -> ChecklistId {
        self.id
    }

    /// Run a closure with read access.
    ///
    /// Returns None if the lock is poisoned.
    pub fn read<R>(&self, f: impl FnOnce(&Checklist) -> R) -> Option<R> {
        self.inner.read().ok().map(|guard| f(&*guard))
    }

    /// Run a closure with exclusive access and mark the checklist dirty.
    ///
    /// Returns None if the lock is poisoned.
    pub fn write<R>(&self, f: impl FnOnce(&mut Checklist) -> R) -> Option<R> {
        let mut guard = self.inner.write().ok()?;
        let result = f(&mut *guard);
        self.dirty.store(true, Ordering::SeqCst);
        Some(result)
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Replace the tree (clears selection).
    pub fn set_roots(&self, roots: Vec<NestedNode>) {
        self.write(|list| list.set_roots(roots));
    }

    /// Swap in new roots, keeping flat node identity where possible.
    pub fn update_roots(&self, roots: Vec<NestedNode>) {
        self.write(|list| list.update_roots(roots));
    }

    /// Re-flatten, keeping selection.
    pub fn refresh(&self) {
        self.write(Checklist::refresh);
    }

    /// Snapshot of the rows with their flat nodes.
    pub fn rows(&self) -> Vec<(FlatKey, FlatNode)> {
        self.read(|list| list.iter().map(|(k, n)| (k, n.clone())).collect::<Vec<_>>())
            .unwrap_or_default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.read(Checklist::len).unwrap_or(0)
    }

    /// Check if the tree has no rows.
    pub fn is_empty(&self) -> bool {
        self.read(Checklist::is_empty).unwrap_or(true)
    }

    /// Find the row for a node id.
    pub fn find(&self, id: NodeId) -> Option<FlatKey> {
        self.read(|list| list.find(id)).flatten()
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    /// Expand a row with children.
    pub fn expand(&self, key: FlatKey) -> bool {
        self.write(|list| list.expand(key)).unwrap_or(false)
    }

    /// Collapse a row.
    pub fn collapse(&self, key: FlatKey) -> bool {
        self.write(|list| list.collapse(key)).unwrap_or(false)
    }

    /// Check if a row is expanded.
    pub fn is_expanded(&self, key: FlatKey) -> bool {
        self.read(|list| list.is_expanded(key)).unwrap_or(false)
    }

    /// Rows not hidden under a collapsed ancestor.
    pub fn visible_rows(&self) -> Vec<FlatKey> {
        self.read(Checklist::visible_rows).unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Check if a row is directly selected.
    pub fn is_selected(&self, key: FlatKey) -> bool {
        self.read(|list| list.is_selected(key)).unwrap_or(false)
    }

    /// Checkbox value for a row.
    pub fn check_state(&self, key: FlatKey) -> CheckState {
        self.read(|list| list.check_state(key)).unwrap_or_default()
    }

    /// Selected node ids, sorted.
    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.read(Checklist::selected_ids).unwrap_or_default()
    }

    /// Toggle a row, dispatching on its `expandable` flag.
    /// Returns (added, removed) keys.
    pub fn toggle(&self, key: FlatKey) -> SelectionDelta {
        self.write(|list| list.toggle(key)).unwrap_or_default()
    }

    /// Toggle a row and its subtree.
    pub fn toggle_branch(&self, key: FlatKey) -> SelectionDelta {
        self.write(|list| list.toggle_branch(key)).unwrap_or_default()
    }

    /// Toggle a single row.
    pub fn toggle_leaf(&self, key: FlatKey) -> SelectionDelta {
        self.write(|list| list.toggle_leaf(key)).unwrap_or_default()
    }

    /// Clear all selection.
    pub fn deselect_all(&self) -> Vec<FlatKey> {
        self.write(Checklist::deselect_all).unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the checklist has changed since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for SharedChecklist {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl Default for SharedChecklist {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
