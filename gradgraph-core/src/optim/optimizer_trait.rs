use crate::error::GradGraphError;
use crate::graph::Graph;
use crate::node::NodeId;

/// Trait defining the common interface for update rules.
///
/// An optimizer observes an explicit list of leaf nodes and updates their values
/// from the `accumulated_grad` left on them by the last backward pass.
pub trait Optimizer {
    /// Performs a single optimization step.
    ///
    /// Returns the number of leaves whose value changed. Nodes that are not leaves
    /// are reported with a warning and skipped.
    fn step(&mut self, graph: &mut Graph) -> Result<usize, GradGraphError>;

    /// Clears the accumulated gradients of every observed leaf.
    fn zero_grad(&mut self, graph: &mut Graph) -> Result<(), GradGraphError>;

    /// The nodes this optimizer observes.
    fn params(&self) -> &[NodeId];
}
