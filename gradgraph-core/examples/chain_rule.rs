//! # Chain Rule on a Two-Operation Graph
//!
//! Builds `F = (X + Y) * Z` with `X = -2`, `Y = 5`, `Z = -4`, wraps the output in a
//! `DifferenceLoss` whose target is the output itself, and runs a backward pass.
//!
//! Expected gradients: `dF/dX = dF/dY = Z = -4` and `dF/dZ = X + Y = 3`.
//!
//! ## Running
//! `cargo run --example chain_rule`

use gradgraph_core::nn::{DifferenceLoss, Module};
use gradgraph_core::{GradGraphError, Graph, NodeId, Operand};

/// Fixed-parameter model holding the three leaves of the chain-rule graph.
#[derive(Debug)]
struct Net {
    x: NodeId,
    y: NodeId,
    z: NodeId,
}

impl Net {
    fn new(graph: &mut Graph) -> Self {
        Net {
            x: graph.leaf(-2.0, "X"),
            y: graph.leaf(5.0, "Y"),
            z: graph.leaf(-4.0, "Z"),
        }
    }
}

impl Module for Net {
    // The input is accepted for the sake of the call shape and is not used.
    fn forward(&self, graph: &mut Graph, _inputs: &[Operand]) -> Result<NodeId, GradGraphError> {
        let q = graph.add(self.x, self.y)?;
        graph.mul(q, self.z)
    }

    fn parameters(&self) -> Vec<NodeId> {
        vec![self.x, self.y, self.z]
    }
}

fn main() -> Result<(), GradGraphError> {
    env_logger::init();

    let mut graph = Graph::new();
    let model = Net::new(&mut graph);
    let output = model.forward(&mut graph, &[Operand::Literal(3.0)])?;
    println!("F = {} with parents {:?}", graph.value(output)?, graph.parents(output)?);

    let mut criterion = DifferenceLoss::new();
    let target = graph.value(output)?;
    let loss = criterion.calculate(&mut graph, output, target)?;
    println!("loss = {}", graph.value(loss)?);

    graph.backward(loss)?;
    for (name, id) in model.named_parameters(&graph) {
        println!("d loss / d {} = {:?}", name, graph.accumulated_grad(id)?);
    }
    Ok(())
}
