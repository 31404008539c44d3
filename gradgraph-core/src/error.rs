use crate::node::NodeId;
use thiserror::Error;

/// Custom error type for the gradgraph engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum GradGraphError {
    /// The graph structure does not allow the requested operation: an unknown node id,
    /// an operand that would close a cycle, or an operation whose arity does not match
    /// the number of parents it was given.
    #[error("Invalid topology: {reason}")]
    InvalidTopology { reason: String },

    /// A leaf-only operation was invoked on a derived node.
    #[error("Node {node} is not a leaf (during {context})")]
    NotALeaf { node: NodeId, context: String },

    /// The backward pass met traversal or gradient state it did not set up itself.
    #[error("Stale gradient state: {reason}")]
    StaleGradientState { reason: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl GradGraphError {
    pub(crate) fn topology(reason: impl Into<String>) -> Self {
        GradGraphError::InvalidTopology {
            reason: reason.into(),
        }
    }

    pub(crate) fn stale(reason: impl Into<String>) -> Self {
        GradGraphError::StaleGradientState {
            reason: reason.into(),
        }
    }
}
