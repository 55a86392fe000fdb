//! Hierarchical checklist with tri-state selection.
//!
//! A nested tree is flattened into a level-annotated, pre-order row sequence.
//! Hierarchy queries run over that sequence, and toggling a row propagates
//! selection down to its descendants and up through its ancestors.
//!
//! # Example
//!
//! ```
//! use checklist::{CheckState, Checklist, NodeId, TreeDocument};
//!
//! let mut list = Checklist::new(TreeDocument::sample().into_roots());
//! let mis_clases = list.find(NodeId(3)).unwrap();
//! list.toggle_branch(mis_clases);
//!
//! let root = list.find(NodeId(1)).unwrap();
//! assert_eq!(list.check_state(root), CheckState::Indeterminate);
//! ```

pub mod error;
pub mod flatten;
pub mod node;
pub mod selection;
pub mod traversal;

mod document;
mod shared;
mod tree;

pub use document::TreeDocument;
pub use error::ChecklistError;
pub use flatten::{Flattener, ROOT_LEVEL};
pub use node::{CheckState, FlatKey, FlatNode, NestedNode, NodeId, NodePath};
pub use selection::Selection;
pub use shared::{ChecklistId, SharedChecklist};
pub use traversal::TraversalIndex;
pub use tree::{Checklist, SelectionDelta};
