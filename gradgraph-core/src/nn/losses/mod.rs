//! Loss wrappers.
//!
//! A wrapper turns a model output and a target into a synthetic derived node whose
//! only parent is the output. The node is created on the first call and reused on
//! later calls with the same output, so repeated calls never duplicate the
//! parent/child link.

pub mod difference;
pub mod mse;

pub use difference::DifferenceLoss;
pub use mse::MSELoss;

use crate::error::GradGraphError;
use crate::graph::Graph;
use crate::node::NodeId;
use crate::ops::{OpKind, Operand, Operation};


/// The loss node a wrapper is attached to, and the output it was attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    pub output: NodeId,
    pub loss: NodeId,
    /// [`Graph::generation`] at attach time.
    pub generation: u64,
}

impl Attachment {
    // A truncate since the attach invalidates the remembered ids, even if the arena
    // regrew a matching node at the same place.
    fn is_live(&self, graph: &Graph, kind: OpKind) -> bool {
        if self.generation != graph.generation() {
            return false;
        }
        let Ok(node) = graph.node(self.loss) else {
            return false;
        };
        node.operation().map_or(false, |op| same_loss(op, kind))
            && node.parents() == [self.output]
            && graph
                .children(self.output)
                .map_or(false, |children| children.contains(&self.loss))
    }
}

pub(crate) fn attach(
    attached: &mut Option<Attachment>,
    graph: &mut Graph,
    output: NodeId,
    kind: OpKind,
) -> Result<NodeId, GradGraphError> {
    if let Some(attachment) = attached.filter(|a| a.output == output && a.is_live(graph, kind)) {
        graph.recapture(attachment.loss, kind)?;
        return Ok(attachment.loss);
    }
    let loss = graph.apply(kind, [output])?;
    log::debug!("attached loss node {} to output {}", loss, output);
    *attached = Some(Attachment {
        output,
        loss,
        generation: graph.generation(),
    });
    Ok(loss)
}

fn same_loss(op: &Operation, kind: OpKind) -> bool {
    matches!(
        (op, kind),
        (Operation::Difference(_), OpKind::Difference { .. })
            | (Operation::SquaredError(_), OpKind::SquaredError { .. })
    )
}

pub(crate) fn target_value(graph: &Graph, target: Operand) -> Result<f64, GradGraphError> {
    match target {
        Operand::Node(id) => graph.value(id),
        Operand::Literal(value) => Ok(value),
    }
}
