//! # Serialized Document
//!
//! The portable snapshot of an editing session. It is the only artifact that
//! crosses from the editor to a later, independent render.
//!
//! ```json
//! {
//!   "version": 1,
//!   "root": "a1b2c3d4-1",
//!   "nodes": {
//!     "a1b2c3d4-1": { "typeName": "Column", "props": { "gap": 15 }, "children": ["a1b2c3d4-2"] },
//!     "a1b2c3d4-2": { "typeName": "Text", "props": { "text": "A" }, "children": [] }
//!   }
//! }
//! ```
//!
//! Unknown extra fields are ignored when reading, so documents written by a
//! newer editor still load.

use crate::error::DocumentError;
use crate::props::Props;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

pub const DOCUMENT_VERSION: u32 = 1;

/// Deepest nesting a document may have, counting the root as level 1
pub const MAX_DEPTH: usize = 128;

/// Identifier of a node, unique within one tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One node of a serialized document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedNode {
    pub type_name: String,

    #[serde(default)]
    pub props: Props,

    /// Ordered child ids
    #[serde(default)]
    pub children: Vec<NodeId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl SerializedNode {
    pub fn new(type_name: impl Into<String>, props: Props) -> Self {
        Self {
            type_name: type_name.into(),
            props,
            children: Vec::new(),
            display_name: None,
        }
    }
}

/// Snapshot of a whole tree: nodes keyed by id plus the root id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedDocument {
    #[serde(default = "default_version")]
    pub version: u32,

    pub root: NodeId,

    pub nodes: BTreeMap<NodeId, SerializedNode>,
}

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

impl SerializedDocument {
    pub fn new(root: NodeId) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            root,
            nodes: BTreeMap::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn node(&self, id: &NodeId) -> Option<&SerializedNode> {
        self.nodes.get(id)
    }

    pub fn root_node(&self) -> Option<&SerializedNode> {
        self.nodes.get(&self.root)
    }

    /// Check the structure is a single-rooted tree: the root exists, every
    /// child reference resolves, no node is reachable twice, and no branch
    /// is nested deeper than [`MAX_DEPTH`].
    ///
    /// Nodes that are present but unreachable from the root are tolerated;
    /// they are simply never rendered.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if !self.nodes.contains_key(&self.root) {
            return Err(DocumentError::MissingRoot(self.root.clone()));
        }

        let mut seen = HashSet::new();
        let mut stack = vec![(&self.root, 1)];
        seen.insert(&self.root);

        while let Some((id, depth)) = stack.pop() {
            if depth > MAX_DEPTH {
                return Err(DocumentError::TooDeep {
                    node: id.clone(),
                    max: MAX_DEPTH,
                });
            }

            let node = self
                .nodes
                .get(id)
                .ok_or_else(|| DocumentError::MissingNode(id.clone()))?;

            for child in &node.children {
                if !self.nodes.contains_key(child) {
                    return Err(DocumentError::MissingChild {
                        parent: id.clone(),
                        child: child.clone(),
                    });
                }
                if !seen.insert(child) {
                    return Err(DocumentError::RepeatedNode(child.clone()));
                }
                stack.push((child, depth + 1));
            }
        }

        Ok(())
    }

    /// Ids reachable from the root in document order (pre-order).
    pub fn reachable_ids(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![self.root.clone()];

        while let Some(id) = stack.pop() {
            if !seen.insert(id.clone()) {
                continue;
            }
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev().cloned());
                order.push(id);
            }
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::PropValue;

    fn sample() -> SerializedDocument {
        let mut doc = SerializedDocument::new(NodeId::from("root"));
        let mut root = SerializedNode::new("Column", Props::new());
        root.children = vec!["a".into(), "b".into()];
        doc.nodes.insert("root".into(), root);
        doc.nodes.insert("a".into(), SerializedNode::new("Text", Props::new().with("text", "A")));
        doc.nodes.insert("b".into(), SerializedNode::new("Text", Props::new().with("text", "B")));
        doc
    }

    #[test]
    fn test_json_shape_uses_camel_case() {
        let json = sample().to_json().unwrap();

        assert!(json.contains("\"typeName\":\"Column\""));
        assert!(json.contains("\"children\":[\"a\",\"b\"]"));
        assert!(json.contains("\"root\":\"root\""));
    }

    #[test]
    fn test_serialization_is_byte_stable() {
        let doc = sample();
        assert_eq!(doc.to_json().unwrap(), doc.clone().to_json().unwrap());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{
            "root": "r",
            "generator": "future-editor",
            "nodes": {
                "r": { "typeName": "Text", "props": { "text": "hi" }, "children": [], "hidden": false, "custom": {} }
            }
        }"#;

        let doc = SerializedDocument::from_json(json).unwrap();
        assert_eq!(doc.version, DOCUMENT_VERSION);
        assert_eq!(doc.root_node().unwrap().props.get("text"), Some(&PropValue::text("hi")));
    }

    #[test]
    fn test_validate_accepts_tree() {
        assert!(sample().validate().is_ok());
        assert_eq!(
            sample().reachable_ids(),
            vec![NodeId::from("root"), NodeId::from("a"), NodeId::from("b")]
        );
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let mut doc = sample();
        doc.root = "nope".into();
        assert!(matches!(doc.validate(), Err(DocumentError::MissingRoot(_))));
    }

    #[test]
    fn test_validate_rejects_dangling_child() {
        let mut doc = sample();
        doc.nodes.get_mut(&NodeId::from("a")).unwrap().children.push("ghost".into());
        assert!(matches!(doc.validate(), Err(DocumentError::MissingChild { .. })));
    }

    #[test]
    fn test_validate_rejects_cycle() {
        let mut doc = sample();
        doc.nodes.get_mut(&NodeId::from("a")).unwrap().children.push("root".into());
        assert!(matches!(doc.validate(), Err(DocumentError::RepeatedNode(_))));
    }

    fn chain(depth: usize) -> SerializedDocument {
        let mut doc = SerializedDocument::new(NodeId::from("n0"));
        for level in 0..depth {
            let mut node = SerializedNode::new("Column", Props::new());
            if level + 1 < depth {
                node.children.push(NodeId::from(format!("n{}", level + 1)));
            }
            doc.nodes.insert(NodeId::from(format!("n{level}")), node);
        }
        doc
    }

    #[test]
    fn test_validate_limits_depth() {
        assert!(chain(MAX_DEPTH).validate().is_ok());

        match chain(MAX_DEPTH + 1).validate() {
            Err(DocumentError::TooDeep { node, max }) => {
                assert_eq!(node, NodeId::from(format!("n{MAX_DEPTH}")));
                assert_eq!(max, MAX_DEPTH);
            }
            other => panic!("expected TooDeep, got {other:?}"),
        }
    }
}
