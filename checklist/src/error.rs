//! Error types

use std::path::PathBuf;

use crate::node::NodeId;

/// Errors from loading tree documents and resolving node ids.
///
/// Tree operations themselves do not fail: missing parents and empty
/// descendant runs are ordinary results.
#[derive(Debug, thiserror::Error)]
pub enum ChecklistError {
    /// Failed to read a tree document.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Tree document is not valid JSON or has the wrong shape.
    #[error("Invalid tree document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The same id appears more than once in a tree.
    #[error("Duplicate node id {0}")]
    DuplicateId(NodeId),

    /// No materialized node has this id.
    #[error("Unknown node id {0}")]
    UnknownNode(NodeId),
}

impl ChecklistError {
    /// Creates an IO error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
