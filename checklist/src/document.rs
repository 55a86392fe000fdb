//! Tree documents supplied by the data source.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChecklistError;
use crate::node::NestedNode;

const SAMPLE: &str = include_str!("../data/aula_virtual.json");

/// A JSON document holding the root list of a nested tree.
///
/// ```json
/// { "result": [ { "id": 1, "name": "Root", "active": 1, "level": 1, "items": [] } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDocument {
    /// Root nodes, in display order.
    pub result: Vec<NestedNode>,
}

impl TreeDocument {
    /// Parse and validate a document from a string.
    pub fn from_json(json: &str) -> Result<Self, ChecklistError> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Parse and validate a document from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, ChecklistError> {
        let doc: Self = serde_json::from_reader(reader)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Read, parse and validate a document file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChecklistError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ChecklistError::io(path, e))?;
        log::debug!("Loaded tree document from {}", path.display());
        Self::from_json(&json)
    }

    /// The bundled "Aula Virtual" permission tree.
    pub fn sample() -> Self {
        serde_json::from_str(SAMPLE).unwrap_or_else(|e| {
            log::error!("Bundled sample document is invalid: {}", e);
            Self { result: Vec::new() }
        })
    }

    /// Check that every node id is unique.
    pub fn validate(&self) -> Result<(), ChecklistError> {
        let mut seen = HashSet::new();
        let mut stack: Vec<&NestedNode> = self.result.iter().collect();
        while let Some(node) = stack.pop() {
            if !seen.insert(node.id) {
                return Err(ChecklistError::DuplicateId(node.id));
            }
            stack.extend(node.children.iter());
        }
        Ok(())
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[NestedNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.result)
    }

    /// Take the root list.
    pub fn into_roots(self) -> Vec<NestedNode> {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;

    #[test]
    fn test_sample_document_is_valid() {
        let doc: TreeDocument = serde_json::from_str(SAMPLE).unwrap();
        doc.validate().unwrap();
        assert_eq!(doc, TreeDocument::sample());
        assert_eq!(doc.node_count(), 11);
    }

    #[test]
    fn test_items_key_and_defaults() {
        let json = r#"{"result": [{"id": 1, "name": "Root", "items": [{"id": 2, "name": "Child"}]}]}"#;
        let doc = TreeDocument::from_json(json).unwrap();
        let root = &doc.result[0];
        assert_eq!(root.id, NodeId(1));
        assert_eq!(root.active, 0);
        assert_eq!(root.children.len(), 1);
        assert!(root.children[0].children.is_empty());
    }

    #[test]
    fn test_children_alias() {
        let json = r#"{"result": [{"id": 1, "name": "Root", "children": [{"id": 2, "name": "Child"}]}]}"#;
        let doc = TreeDocument::from_json(json).unwrap();
        assert_eq!(doc.result[0].children[0].id, NodeId(2));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"{"result": [{"id": 1, "name": "A", "items": [{"id": 1, "name": "B"}]}]}"#;
        let err = TreeDocument::from_json(json).unwrap_err();
        assert!(matches!(err, ChecklistError::DuplicateId(NodeId(1))));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = TreeDocument::from_json("{\"result\": [").unwrap_err();
        assert!(matches!(err, ChecklistError::Parse(_)));
    }

    #[test]
    fn test_from_reader() {
        let json = br#"{"result": []}"#;
        let doc = TreeDocument::from_reader(&json[..]).unwrap();
        assert!(doc.result.is_empty());
    }
}
