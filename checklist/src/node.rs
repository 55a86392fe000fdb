//! Node shapes for the checklist tree.
//!
//! A tree exists in two forms: the nested form supplied by the data source
//! (`NestedNode`, parent owns children) and the flat form used for display and
//! traversal (`FlatNode`, one row per node with an explicit level).

use serde::{Deserialize, Serialize};

/// Identifier of a node, unique within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A node in the nested (authoring/storage) form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedNode {
    pub id: NodeId,
    pub name: String,
    /// Depth as written by the data source. Informational only: the
    /// flattener recomputes levels from traversal depth.
    #[serde(default)]
    pub level: u16,
    #[serde(default)]
    pub active: u8,
    #[serde(default, rename = "items", alias = "children")]
    pub children: Vec<NestedNode>,
}

impl NestedNode {
    /// Create a leaf node.
    pub fn leaf(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: NodeId(id),
            name: name.into(),
            level: 0,
            active: 1,
            children: Vec::new(),
        }
    }

    /// Create a branch node with the given children.
    pub fn branch(id: u64, name: impl Into<String>, children: Vec<NestedNode>) -> Self {
        Self {
            children,
            ..Self::leaf(id, name)
        }
    }

    /// Set the active flag.
    pub fn with_active(mut self, active: u8) -> Self {
        self.active = active;
        self
    }

    /// Whether this node has any children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Resolve a child-index path below a list of roots.
    pub fn at_path<'a>(roots: &'a [NestedNode], path: &NodePath) -> Option<&'a NestedNode> {
        let (first, rest) = path.0.split_first()?;
        let mut current = roots.get(*first)?;
        for index in rest {
            current = current.children.get(*index)?;
        }
        Some(current)
    }
}

/// Location of a nested node: child indices from the root list downwards.
///
/// Resolves a flat node back to its nested source. Refreshed on every
/// flatten, so it follows the node when siblings are inserted or removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    /// Path of the root at `index`.
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path of this node's child at `index`.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    /// Number of steps from the root list.
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

/// Handle to one flat node object within a tree instance.
///
/// Handles stay valid while their nested node remains materialized, so
/// selection membership survives a re-flatten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlatKey(pub(crate) usize);

impl std::fmt::Display for FlatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A row in the flat (display/traversal) form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatNode {
    pub id: NodeId,
    pub name: String,
    /// Depth in tree (1 = root).
    pub level: u16,
    /// Whether the source node had children when last transformed.
    pub expandable: bool,
    pub active: u8,
}

impl FlatNode {
    pub(crate) fn from_nested(node: &NestedNode, level: u16) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            level,
            expandable: node.has_children(),
            active: node.active,
        }
    }

    /// Whether the active flag is set.
    pub fn is_active(&self) -> bool {
        self.active != 0
    }

    /// Whether the row has an empty name.
    pub fn has_no_content(&self) -> bool {
        self.name.is_empty()
    }
}

/// Tri-state checkbox value shown for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    /// Fully selected.
    Checked,
    /// Some, but not all, descendants selected.
    Indeterminate,
    /// Nothing selected.
    #[default]
    Unchecked,
}

impl CheckState {
    /// Checkbox marker used by text renderers.
    pub fn marker(self) -> &'static str {
        match self {
            CheckState::Checked => "[x]",
            CheckState::Indeterminate => "[-]",
            CheckState::Unchecked => "[ ]",
        }
    }
}
