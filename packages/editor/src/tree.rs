//! # Tree Store
//!
//! Owns every node of one editing session in an arena keyed by id.
//!
//! ## Structural operations
//!
//! - `attach_child` places an unattached node under a parent
//! - `move_node` detaches and reattaches in one step
//! - `delete_node` removes a whole subtree
//!
//! Each validates fully before touching the arena, so a rejected operation
//! leaves the tree exactly as it was.
//!
//! ## Property writes
//!
//! `update_prop` writes immediately, or schedules a debounced write when a
//! window is given. Pending writes are applied by `tick`, forced by `commit`
//! (blur) and `flush_pending`, and dropped when their node is deleted.

use crate::debounce::{Clock, Debouncer, SystemClock, WriteKey};
use crate::errors::{AdmissionError, MutationError};
use crate::id_generator::IdGenerator;
use crate::node::Node;
use sitecraft_common::{NodeId, PropValue, Props};
use sitecraft_components::{ComponentDefinition, ComponentRegistry};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

pub struct TreeStore {
    registry: Arc<ComponentRegistry>,
    nodes: BTreeMap<NodeId, Node>,
    root: Option<NodeId>,
    selected: Option<NodeId>,
    ids: IdGenerator,
    debouncer: Debouncer,
}

impl TreeStore {
    pub fn new(registry: Arc<ComponentRegistry>, session_id: &str) -> Self {
        Self::with_clock(registry, session_id, Box::new(SystemClock::new()))
    }

    pub fn with_clock(
        registry: Arc<ComponentRegistry>,
        session_id: &str,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            nodes: BTreeMap::new(),
            root: None,
            selected: None,
            ids: IdGenerator::new(session_id),
            debouncer: Debouncer::new(clock),
        }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn shared_registry(&self) -> Arc<ComponentRegistry> {
        Arc::clone(&self.registry)
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    pub fn root(&self) -> Option<&NodeId> {
        self.root.as_ref()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn children_of(&self, id: &NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent_of(&self, id: &NodeId) -> Option<&NodeId> {
        self.nodes.get(id).and_then(|n| n.parent.as_ref())
    }

    /// Parent chain from the direct parent up to the topmost ancestor
    pub fn ancestors(&self, id: &NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            chain.push(parent.clone());
            current = self.parent_of(parent);
        }
        chain
    }

    /// All nodes below `id`, pre-order, excluding `id` itself
    pub fn descendants(&self, id: &NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack: Vec<NodeId> = self.children_of(id).iter().rev().cloned().collect();
        while let Some(next) = stack.pop() {
            stack.extend(self.children_of(&next).iter().rev().cloned());
            order.push(next);
        }
        order
    }

    pub fn is_descendant(&self, id: &NodeId, ancestor: &NodeId) -> bool {
        self.ancestors(id).iter().any(|a| a == ancestor)
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn pending_writes(&self) -> usize {
        self.debouncer.len()
    }

    pub fn pending_value(&self, id: &NodeId, prop: &str) -> Option<&PropValue> {
        self.debouncer
            .pending_value(&WriteKey::new(id.clone(), prop))
    }

    /// Time until the next debounced write falls due, for hosts scheduling
    /// their own wake-up
    pub fn next_deadline(&self) -> Option<Duration> {
        self.debouncer.next_deadline()
    }

    pub(crate) fn definition_of(&self, id: &NodeId) -> Result<&ComponentDefinition, MutationError> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;
        self.registry
            .resolve(&node.type_name)
            .map_err(|_| MutationError::UnknownType(node.type_name.clone()))
    }

    // ---------------------------------------------------------------
    // Structure
    // ---------------------------------------------------------------

    /// Create an unattached node whose props are a fresh copy of the type's
    /// defaults with `initial` layered on top
    pub fn create_node(&mut self, type_name: &str, initial: Props) -> Result<NodeId, MutationError> {
        let id = self.next_free_id();
        self.create_node_with_id(id, type_name, initial)
    }

    pub fn create_node_with_id(
        &mut self,
        id: NodeId,
        type_name: &str,
        initial: Props,
    ) -> Result<NodeId, MutationError> {
        if self.nodes.contains_key(&id) {
            return Err(MutationError::DuplicateId(id));
        }
        let defaults = self
            .registry
            .instantiate_defaults(type_name)
            .map_err(|_| MutationError::UnknownType(type_name.to_string()))?;

        let node = Node::new(id.clone(), type_name, initial.merged_over(&defaults));
        tracing::debug!(id = %id, type_name, "Node created");
        self.nodes.insert(id.clone(), node);
        Ok(id)
    }

    /// Restore a node exactly as stored, without layering defaults
    pub(crate) fn insert_stored(&mut self, node: Node) -> Result<(), MutationError> {
        if self.nodes.contains_key(&node.id) {
            return Err(MutationError::DuplicateId(node.id));
        }
        self.registry
            .resolve(&node.type_name)
            .map_err(|_| MutationError::UnknownType(node.type_name.clone()))?;
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Drop every node along with the root, selection and pending writes
    pub(crate) fn clear(&mut self) {
        for id in std::mem::take(&mut self.nodes).into_keys() {
            self.debouncer.cancel_node(&id);
        }
        self.root = None;
        self.selected = None;
    }

    fn next_free_id(&mut self) -> NodeId {
        loop {
            let id = self.ids.next_id();
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }

    /// Make a detached node the root. Any previous root stays in the arena
    /// but is no longer reachable.
    pub fn set_root(&mut self, id: &NodeId) -> Result<(), MutationError> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;
        if node.is_attached() {
            return Err(MutationError::NotDetached(id.clone()));
        }
        self.root = Some(id.clone());
        Ok(())
    }

    /// Check whether `child_type` may sit directly inside `parent`
    pub fn check_admission(&self, parent: &NodeId, child_type: &str) -> Result<(), MutationError> {
        let definition = self.definition_of(parent)?;
        if !definition.can_contain_children {
            return Err(AdmissionError::LeafParent {
                parent_type: definition.type_name.clone(),
            }
            .into());
        }
        if !definition.admission.admits(child_type) {
            return Err(AdmissionError::Rejected {
                parent_type: definition.type_name.clone(),
                child_type: child_type.to_string(),
                rule: definition.admission.describe(),
            }
            .into());
        }
        Ok(())
    }

    /// Attach an unattached node under `parent` at `index` (end if `None`)
    pub fn attach_child(
        &mut self,
        parent: &NodeId,
        child: &NodeId,
        index: Option<usize>,
    ) -> Result<(), MutationError> {
        if !self.nodes.contains_key(parent) {
            return Err(MutationError::ParentNotFound(parent.clone()));
        }
        let child_node = self
            .nodes
            .get(child)
            .ok_or_else(|| MutationError::NodeNotFound(child.clone()))?;
        if child_node.is_attached() {
            return Err(MutationError::AlreadyAttached(child.clone()));
        }
        if self.root.as_ref() == Some(child) {
            return Err(MutationError::RootNotMovable);
        }
        let child_type = child_node.type_name.clone();
        self.check_admission(parent, &child_type)?;
        // A detached subtree may already contain the parent
        if parent == child || self.is_descendant(parent, child) {
            return Err(MutationError::CycleDetected {
                node: child.clone(),
                parent: parent.clone(),
            });
        }

        self.link(parent, child, index);
        tracing::debug!(parent = %parent, child = %child, "Child attached");
        Ok(())
    }

    /// Relocate an attached node under `new_parent` at `index`.
    ///
    /// `index` counts positions after the node has been detached, so moving
    /// within the same parent uses the final position. Out-of-range indices
    /// append.
    pub fn move_node(
        &mut self,
        id: &NodeId,
        new_parent: &NodeId,
        index: usize,
    ) -> Result<(), MutationError> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;
        if !self.nodes.contains_key(new_parent) {
            return Err(MutationError::ParentNotFound(new_parent.clone()));
        }
        if self.root.as_ref() == Some(id) {
            return Err(MutationError::RootNotMovable);
        }
        let type_name = node.type_name.clone();
        self.check_admission(new_parent, &type_name)?;
        if new_parent == id || self.is_descendant(new_parent, id) {
            return Err(MutationError::CycleDetected {
                node: id.clone(),
                parent: new_parent.clone(),
            });
        }

        self.unlink(id);
        self.link(new_parent, id, Some(index));
        tracing::debug!(node = %id, parent = %new_parent, index, "Node moved");
        Ok(())
    }

    /// Remove `id` and its whole subtree. Returns every removed id,
    /// `id` first.
    pub fn delete_node(&mut self, id: &NodeId) -> Result<Vec<NodeId>, MutationError> {
        if !self.nodes.contains_key(id) {
            return Err(MutationError::NodeNotFound(id.clone()));
        }

        let mut removed = vec![id.clone()];
        removed.extend(self.descendants(id));

        self.unlink(id);
        for gone in &removed {
            self.nodes.remove(gone);
            let cancelled = self.debouncer.cancel_node(gone);
            if cancelled > 0 {
                tracing::debug!(node = %gone, cancelled, "Pending writes dropped with deleted node");
            }
        }

        if self.root.as_ref() == Some(id) {
            self.root = None;
        }
        if self.selected.as_ref().map_or(false, |s| removed.contains(s)) {
            self.selected = None;
        }

        tracing::debug!(node = %id, count = removed.len(), "Subtree deleted");
        Ok(removed)
    }

    fn link(&mut self, parent: &NodeId, child: &NodeId, index: Option<usize>) {
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            let at = index
                .unwrap_or(parent_node.children.len())
                .min(parent_node.children.len());
            parent_node.children.insert(at, child.clone());
        }
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent.clone());
        }
    }

    fn unlink(&mut self, id: &NodeId) {
        let parent = self.nodes.get_mut(id).and_then(|n| n.parent.take());
        if let Some(parent) = parent {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|c| c != id);
            }
        }
    }

    // ---------------------------------------------------------------
    // Properties
    // ---------------------------------------------------------------

    /// Set one property. With a non-zero `debounce` the write is deferred
    /// and coalesced with later writes to the same (node, prop); without
    /// one it applies now and supersedes any pending write to that key.
    pub fn update_prop(
        &mut self,
        id: &NodeId,
        prop: &str,
        value: PropValue,
        debounce: Option<Duration>,
    ) -> Result<(), MutationError> {
        if !self.nodes.contains_key(id) {
            return Err(MutationError::NodeNotFound(id.clone()));
        }
        let key = WriteKey::new(id.clone(), prop);

        match debounce {
            Some(window) if !window.is_zero() => {
                self.debouncer.schedule(key, value, window);
            }
            _ => {
                self.debouncer.cancel(&key);
                self.write(&key, value);
            }
        }
        Ok(())
    }

    /// Apply one pending write now (field lost focus). Returns whether
    /// anything was pending.
    pub fn commit(&mut self, id: &NodeId, prop: &str) -> bool {
        let key = WriteKey::new(id.clone(), prop);
        match self.debouncer.take(&key) {
            Some(value) => {
                self.write(&key, value);
                true
            }
            None => false,
        }
    }

    /// Apply the writes whose window has elapsed
    pub fn tick(&mut self) -> usize {
        let due = self.debouncer.take_due();
        let count = due.len();
        for (key, value) in due {
            self.write(&key, value);
        }
        count
    }

    /// Apply every pending write immediately
    pub fn flush_pending(&mut self) -> usize {
        let pending = self.debouncer.take_all();
        let count = pending.len();
        for (key, value) in pending {
            self.write(&key, value);
        }
        if count > 0 {
            tracing::debug!(count, "Pending writes flushed");
        }
        count
    }

    fn write(&mut self, key: &WriteKey, value: PropValue) {
        match self.nodes.get_mut(&key.node) {
            Some(node) => {
                tracing::debug!(node = %key.node, prop = %key.prop, "Property written");
                node.props.set(key.prop.clone(), value);
            }
            None => {
                tracing::warn!(node = %key.node, prop = %key.prop, "Dropped write to missing node");
            }
        }
    }

    pub fn set_display_name(&mut self, id: &NodeId, name: Option<String>) -> Result<(), MutationError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;
        node.display_name = name;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------

    pub fn select(&mut self, id: Option<&NodeId>) -> Result<(), MutationError> {
        if let Some(id) = id {
            if !self.nodes.contains_key(id) {
                return Err(MutationError::NodeNotFound(id.clone()));
            }
        }
        self.selected = id.cloned();
        Ok(())
    }

    /// Ids reachable from the root, pre-order
    pub fn reachable(&self) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        if let Some(root) = &self.root {
            order.push(root.clone());
            seen.insert(root.clone());
            for id in self.descendants(root) {
                if seen.insert(id.clone()) {
                    order.push(id);
                }
            }
        }
        order
    }
}

impl std::fmt::Debug for TreeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeStore")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .field("selected", &self.selected)
            .field("pending", &self.debouncer.len())
            .finish()
    }
}
