//! # Tree Mutations
//!
//! Serialisable user intents against a [`TreeStore`]. Replaying the same
//! list of mutations on a fresh store reproduces the same tree.
//!
//! ## Semantics
//!
//! ### CreateNode
//! - Node starts unattached with the type's defaults plus `props`
//! - An explicit `id` must be unused
//!
//! ### MoveNode
//! - Detach then reattach; rejected moves leave the tree unchanged
//! - Fails if the new parent is inside the moved subtree
//!
//! ### UpdateProp
//! - `debounce_ms > 0` defers and coalesces the write
//! - `CommitProp` forces the pending write for one field
//!
//! ### DeleteNode
//! - Removes the whole subtree and any pending writes aimed at it

use crate::errors::MutationError;
use crate::tree::TreeStore;
use serde::{Deserialize, Serialize};
use sitecraft_common::{NodeId, PropValue, Props};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all_fields = "camelCase")]
pub enum Mutation {
    CreateNode {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<NodeId>,
        type_name: String,
        #[serde(default)]
        props: Props,
    },

    SetRoot {
        node_id: NodeId,
    },

    AttachChild {
        parent_id: NodeId,
        child_id: NodeId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },

    MoveNode {
        node_id: NodeId,
        new_parent_id: NodeId,
        index: usize,
    },

    DeleteNode {
        node_id: NodeId,
    },

    UpdateProp {
        node_id: NodeId,
        prop: String,
        value: PropValue,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        debounce_ms: Option<u64>,
    },

    CommitProp {
        node_id: NodeId,
        prop: String,
    },

    Select {
        #[serde(default)]
        node_id: Option<NodeId>,
    },
}

/// What a successfully applied mutation produced
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Created(NodeId),
    Deleted(Vec<NodeId>),
    Committed(bool),
    Applied,
}

impl Mutation {
    pub fn apply(&self, tree: &mut TreeStore) -> Result<MutationOutcome, MutationError> {
        match self {
            Mutation::CreateNode {
                id,
                type_name,
                props,
            } => {
                let created = match id {
                    Some(id) => tree.create_node_with_id(id.clone(), type_name, props.clone())?,
                    None => tree.create_node(type_name, props.clone())?,
                };
                Ok(MutationOutcome::Created(created))
            }

            Mutation::SetRoot { node_id } => {
                tree.set_root(node_id)?;
                Ok(MutationOutcome::Applied)
            }

            Mutation::AttachChild {
                parent_id,
                child_id,
                index,
            } => {
                tree.attach_child(parent_id, child_id, *index)?;
                Ok(MutationOutcome::Applied)
            }

            Mutation::MoveNode {
                node_id,
                new_parent_id,
                index,
            } => {
                tree.move_node(node_id, new_parent_id, *index)?;
                Ok(MutationOutcome::Applied)
            }

            Mutation::DeleteNode { node_id } => Ok(MutationOutcome::Deleted(tree.delete_node(node_id)?)),

            Mutation::UpdateProp {
                node_id,
                prop,
                value,
                debounce_ms,
            } => {
                let debounce = debounce_ms.map(Duration::from_millis);
                tree.update_prop(node_id, prop, value.clone(), debounce)?;
                Ok(MutationOutcome::Applied)
            }

            Mutation::CommitProp { node_id, prop } => {
                if !tree.contains(node_id) {
                    return Err(MutationError::NodeNotFound(node_id.clone()));
                }
                Ok(MutationOutcome::Committed(tree.commit(node_id, prop)))
            }

            Mutation::Select { node_id } => {
                tree.select(node_id.as_ref())?;
                Ok(MutationOutcome::Applied)
            }
        }
    }

    /// Node the mutation targets, if any
    pub fn target(&self) -> Option<&NodeId> {
        match self {
            Mutation::CreateNode { id, .. } => id.as_ref(),
            Mutation::SetRoot { node_id }
            | Mutation::MoveNode { node_id, .. }
            | Mutation::DeleteNode { node_id }
            | Mutation::UpdateProp { node_id, .. }
            | Mutation::CommitProp { node_id, .. } => Some(node_id),
            Mutation::AttachChild { child_id, .. } => Some(child_id),
            Mutation::Select { node_id } => node_id.as_ref(),
        }
    }
}
