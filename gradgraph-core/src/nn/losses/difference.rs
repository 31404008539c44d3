use crate::error::GradGraphError;
use crate::graph::Graph;
use crate::nn::losses::{attach, target_value, Attachment};
use crate::node::NodeId;
use crate::ops::{OpKind, Operand};

/// Identity-difference loss: `output - target`.
#[derive(Debug, Clone, Default)]
pub struct DifferenceLoss {
    attached: Option<Attachment>,
}

impl DifferenceLoss {
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
        attach(&mut self.attached, graph, output, OpKind::Difference { target })
    }

    pub fn attachment(&self) -> Option<Attachment> {
        self.attached
    }
}
