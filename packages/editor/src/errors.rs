//! Error types for the editor

use sitecraft_common::{DocumentError, NodeId};
use sitecraft_components::RegistryError;
use thiserror::Error;

/// A parent refused a child
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdmissionError {
    #[error("{parent_type} cannot contain children")]
    LeafParent { parent_type: String },

    #[error("{parent_type} admits {rule}, not {child_type}")]
    Rejected {
        parent_type: String,
        child_type: String,
        rule: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Parent not found: {0}")]
    ParentNotFound(NodeId),

    #[error("Node id already in use: {0}")]
    DuplicateId(NodeId),

    #[error("Unknown component type: {0}")]
    UnknownType(String),

    #[error(transparent)]
    Admission(#[from] AdmissionError),

    #[error("Moving {node} under {parent} would create a cycle")]
    CycleDetected { node: NodeId, parent: NodeId },

    #[error("Node {0} is already attached; move it instead")]
    AlreadyAttached(NodeId),

    #[error("The root node cannot be attached or moved")]
    RootNotMovable,

    #[error("Node {0} is attached below another node and cannot become the root")]
    NotDetached(NodeId),

    #[error("{type_name} has no setting for {prop}")]
    UnknownSetting { type_name: String, prop: String },

    #[error("Invalid value for {prop}: {reason}")]
    InvalidValue { prop: String, reason: String },
}

/// Invariant violation found while snapshotting a tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SerializationError {
    #[error("Tree has no root")]
    NoRoot,

    #[error("Node {node} has unregistered type {type_name}")]
    UnknownType { node: NodeId, type_name: String },

    #[error("Node {0} is referenced but missing from the tree")]
    DanglingChild(NodeId),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Cannot load a document into a store holding {0} nodes")]
    NotEmpty(usize),
}
