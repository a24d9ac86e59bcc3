use crate::document::NodeId;
use thiserror::Error;

/// Errors reading or validating a serialized document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Malformed document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Root node {0} is not in the document")]
    MissingRoot(NodeId),

    #[error("Node {0} is not in the document")]
    MissingNode(NodeId),

    #[error("Node {parent} references missing child {child}")]
    MissingChild { parent: NodeId, child: NodeId },

    #[error("Node {0} is referenced more than once")]
    RepeatedNode(NodeId),

    #[error("Node {node} is nested deeper than {max} levels")]
    TooDeep { node: NodeId, max: usize },
}
