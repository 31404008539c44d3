use crate::error::GradGraphError;
use crate::graph::Graph;
use crate::node::NodeId;
use crate::ops::Operand;

/// The base trait for models built on a [`Graph`].
///
/// A module owns a set of leaf nodes (its parameters) and knows how to build the
/// derived part of the graph from them. Parameters are listed explicitly, so an
/// optimizer is handed exactly the leaves it should update.
pub trait Module: std::fmt::Debug {
    /// Builds the forward computation for `inputs` and returns the output node.
    fn forward(&self, graph: &mut Graph, inputs: &[Operand]) -> Result<NodeId, GradGraphError>;

    /// Leaf nodes trained by this module.
    fn parameters(&self) -> Vec<NodeId>;

    /// Parameters paired with their node names. Unnamed leaves fall back to `param{i}`.
    fn named_parameters(&self, graph: &Graph) -> Vec<(String, NodeId)> {
        self.parameters()
            .into_iter()
            .enumerate()
            .map(|(i, id)| {
                let name = graph
                    .name(id)
                    .ok()
                    .flatten()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("param{}", i));
                (name, id)
            })
            .collect()
    }
}
