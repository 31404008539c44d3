use std::fmt::Debug;

/// Defines the interface every operation attached to a derived node must satisfy.
///
/// An implementation snapshots the values of its operands when the node is built.
/// Both methods are pure functions of that snapshot: the forward value never
/// changes afterwards, and the local gradients are evaluated at the captured
/// operand values rather than at whatever the operands hold later on.
pub trait BackwardOp: Debug {
    /// Forward value of the node, computed from the captured operand values.
    fn evaluate(&self) -> f64;

    /// Partial derivatives of the node's value with respect to each operand.
    ///
    /// The vector **must** contain exactly one entry per parent, in the same order as
    /// the parents of the node. The backward pass rejects a mismatch with
    /// [`GradGraphError::InvalidTopology`](crate::error::GradGraphError::InvalidTopology).
    fn local_gradients(&self) -> Vec<f64>;

    /// Number of operands this operation was captured with.
    fn arity(&self) -> usize;

    /// Diagnostic name, also used as the default name of the node.
    fn name(&self) -> &'static str;
}
