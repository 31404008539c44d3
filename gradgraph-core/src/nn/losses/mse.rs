// gradgraph-core/src/nn/losses/mse.rs

use crate::error::GradGraphError;
use crate::graph::Graph;
use crate::nn::losses::{attach, target_value, Attachment};
use crate::node::NodeId;
use crate::ops::{OpKind, Operand};

/// Computes the squared error `(output - target)^2` of a scalar output.
///
/// The target may be a node or a literal; either way only its value is captured,
/// and the target receives no gradient.
#[derive(Debug, Clone, Default)]
pub struct MSELoss {
    attached: Option<Attachment>,
}

impl MSELoss {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the loss node for `output`, creating it on the first call.
    pub fn calculate(
        &mut self,
        graph: &mut Graph,
        output: NodeId,
        target: impl Into<Operand>,
    ) -> Result<NodeId, GradGraphError> {
        let target = target_value(graph, target.into())?;
        attach(&mut self.attached, graph, output, OpKind::SquaredError { target })
    }

    pub fn attachment(&self) -> Option<Attachment> {
        self.attached
    }
}
