//! # Serializer
//!
//! Snapshot a tree store into a [`SerializedDocument`] and load one back.
//!
//! Serializing flushes pending debounced writes first, so the snapshot
//! never holds a value older than the last `update_prop`.

use crate::errors::{EditorError, SerializationError};
use crate::node::Node;
use crate::tree::TreeStore;
use sitecraft_common::{SerializedDocument, SerializedNode};
use sitecraft_components::ComponentRegistry;
use std::sync::Arc;

/// Flush pending writes, then snapshot everything reachable from the root
pub fn serialize(tree: &mut TreeStore) -> Result<SerializedDocument, SerializationError> {
    tree.flush_pending();
    snapshot(tree)
}

/// Snapshot the tree as it stands. Pending debounced writes are not
/// included; use [`serialize`] unless that is intended.
pub fn snapshot(tree: &TreeStore) -> Result<SerializedDocument, SerializationError> {
    let root = tree.root().cloned().ok_or(SerializationError::NoRoot)?;
    let mut doc = SerializedDocument::new(root);

    for id in tree.reachable() {
        let node = tree
            .node(&id)
            .ok_or_else(|| SerializationError::DanglingChild(id.clone()))?;
        if !tree.registry().contains(&node.type_name) {
            return Err(SerializationError::UnknownType {
                node: id.clone(),
                type_name: node.type_name.clone(),
            });
        }

        doc.nodes.insert(
            id,
            SerializedNode {
                type_name: node.type_name.clone(),
                props: node.props.clone(),
                children: node.children.clone(),
                display_name: node.display_name.clone(),
            },
        );
    }

    tracing::debug!(nodes = doc.nodes.len(), "Tree serialized");
    Ok(doc)
}

impl TreeStore {
    /// Rebuild an editable tree from a saved document.
    ///
    /// Props are restored exactly as stored. Every type must be registered
    /// and every parent/child pair must satisfy the parent's admission rule.
    pub fn from_document(
        registry: Arc<ComponentRegistry>,
        session_id: &str,
        doc: &SerializedDocument,
    ) -> Result<Self, EditorError> {
        let mut tree = TreeStore::new(registry, session_id);
        tree.load(doc)?;
        Ok(tree)
    }

    /// Populate an empty store from `doc`.
    ///
    /// Loading is all or nothing: a store that already holds nodes is
    /// refused untouched, and a document rejected part way through leaves
    /// the store empty again.
    pub fn load(&mut self, doc: &SerializedDocument) -> Result<(), EditorError> {
        if !self.is_empty() {
            return Err(EditorError::NotEmpty(self.len()));
        }
        doc.validate()?;

        if let Err(err) = self.populate(doc) {
            self.clear();
            return Err(err);
        }
        Ok(())
    }

    fn populate(&mut self, doc: &SerializedDocument) -> Result<(), EditorError> {
        let order = doc.reachable_ids();

        for id in &order {
            if let Some(stored) = doc.node(id) {
                let mut node = Node::new(id.clone(), stored.type_name.clone(), stored.props.clone());
                node.display_name = stored.display_name.clone();
                self.insert_stored(node)?;
            }
        }

        self.set_root(&doc.root)?;
        for id in &order {
            if let Some(stored) = doc.node(id) {
                for child in &stored.children {
                    self.attach_child(id, child, None)?;
                }
            }
        }

        tracing::debug!(nodes = order.len(), "Document loaded into tree");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::ManualClock;
    use sitecraft_common::{NodeId, Props, MAX_DEPTH};
    use std::time::Duration;

    fn tree() -> TreeStore {
        let registry = Arc::new(ComponentRegistry::builtin().unwrap());
        TreeStore::with_clock(registry, "serializer", Box::new(ManualClock::new()))
    }

    #[test]
    fn test_serialize_without_root() {
        let mut tree = tree();
        tree.create_node("Text", Props::new()).unwrap();
        assert_eq!(serialize(&mut tree).unwrap_err(), SerializationError::NoRoot);
    }

    #[test]
    fn test_unattached_nodes_are_left_out() {
        let mut tree = tree();
        let root = tree.create_node("Container", Props::new()).unwrap();
        tree.set_root(&root).unwrap();
        let stray = tree.create_node("Text", Props::new()).unwrap();

        let doc = serialize(&mut tree).unwrap();
        assert_eq!(doc.nodes.len(), 1);
        assert!(doc.node(&stray).is_none());
    }

    #[test]
    fn test_snapshot_skips_pending_but_serialize_flushes() {
        let mut tree = tree();
        let root = tree.create_node("Text", Props::new()).unwrap();
        tree.set_root(&root).unwrap();
        tree.update_prop(&root, "text", "typed".into(), Some(Duration::from_millis(500)))
            .unwrap();

        let stale = snapshot(&tree).unwrap();
        assert_eq!(stale.root_node().unwrap().props.str_or("text", ""), "Hi there");

        let fresh = serialize(&mut tree).unwrap();
        assert_eq!(fresh.root_node().unwrap().props.str_or("text", ""), "typed");
        assert_eq!(tree.pending_writes(), 0);
    }

    #[test]
    fn test_load_rejects_inadmissible_child() {
        let json = r#"{
            "root": "acc",
            "nodes": {
                "acc": { "typeName": "Accordion", "props": {}, "children": ["btn"] },
                "btn": { "typeName": "Button", "props": {}, "children": [] }
            }
        }"#;
        let doc = SerializedDocument::from_json(json).unwrap();
        let registry = Arc::new(ComponentRegistry::builtin().unwrap());

        let err = TreeStore::from_document(registry, "load", &doc).unwrap_err();
        assert!(matches!(err, EditorError::Mutation(_)));
    }

    #[test]
    fn test_load_keeps_stored_props_exactly() {
        let json = r#"{
            "root": "col",
            "nodes": {
                "col": { "typeName": "Column", "props": { "gap": 4 }, "children": ["t"] },
                "t": { "typeName": "Text", "props": { "text": "A" }, "children": [] }
            }
        }"#;
        let doc = SerializedDocument::from_json(json).unwrap();
        let registry = Arc::new(ComponentRegistry::builtin().unwrap());

        let mut tree = TreeStore::from_document(registry, "load", &doc).unwrap();
        let col = NodeId::from("col");
        assert_eq!(tree.node(&col).unwrap().props.len(), 1);
        assert_eq!(serialize(&mut tree).unwrap(), doc);
    }

    fn accordion_with_button() -> SerializedDocument {
        let json = r#"{
            "root": "acc",
            "nodes": {
                "acc": { "typeName": "Accordion", "props": {}, "children": ["item", "btn"] },
                "item": { "typeName": "AccordionItem", "props": {}, "children": [] },
                "btn": { "typeName": "Button", "props": {}, "children": [] }
            }
        }"#;
        SerializedDocument::from_json(json).unwrap()
    }

    #[test]
    fn test_load_refuses_populated_store() {
        let mut tree = tree();
        let text = tree.create_node("Text", Props::new()).unwrap();
        let doc = accordion_with_button();

        let err = tree.load(&doc).unwrap_err();

        assert!(matches!(err, EditorError::NotEmpty(1)));
        assert_eq!(tree.len(), 1);
        assert!(tree.contains(&text));
        assert_eq!(tree.root(), None);
        assert!(!tree.contains(&NodeId::from("acc")));
    }

    #[test]
    fn test_failed_load_leaves_store_empty() {
        let mut tree = tree();

        let err = tree.load(&accordion_with_button()).unwrap_err();

        assert!(matches!(err, EditorError::Mutation(_)));
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.selected(), None);

        // The store is still usable afterwards
        let root = tree.create_node("Container", Props::new()).unwrap();
        tree.set_root(&root).unwrap();
        assert_eq!(serialize(&mut tree).unwrap().nodes.len(), 1);
    }

    #[test]
    fn test_load_rejects_too_deep_document() {
        let mut doc = SerializedDocument::new(NodeId::from("c0"));
        for level in 0..=MAX_DEPTH {
            let mut node = SerializedNode::new("Column", Props::new());
            if level < MAX_DEPTH {
                node.children.push(NodeId::from(format!("c{}", level + 1)));
            }
            doc.nodes.insert(NodeId::from(format!("c{level}")), node);
        }

        let mut tree = tree();
        let err = tree.load(&doc).unwrap_err();

        assert!(matches!(err, EditorError::Document(_)));
        assert!(tree.is_empty());
    }
}
