//! # Fitting a Line with Gradient Descent
//!
//! Trains a single `Linear` unit on samples of `y = 2x - 1` using `MSELoss` and
//! `SgdOptimizer`. Each sample rebuilds the derived part of the graph on top of
//! the parameter leaves, and `Graph::truncate` drops it again after the step.
//!
//! Set `RUST_LOG=debug` to see the backward-pass logs.
//!
//! ## Running
//! `cargo run --example linear_fit`

use gradgraph_core::nn::{Linear, MSELoss, Module};
use gradgraph_core::optim::{Optimizer, SgdConfig, SgdOptimizer};
use gradgraph_core::{GradGraphError, Graph, Operand};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), GradGraphError> {
    env_logger::init();

    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(17);
    let model = Linear::new(&mut graph, 1, true, &mut rng)?;
    let mut optimizer = SgdOptimizer::new(model.parameters(), SgdConfig::new(0.02)?);
    let mark = graph.len();

    let samples: Vec<(f64, f64)> = (-3..=3).map(|i| (i as f64, 2.0 * i as f64 - 1.0)).collect();
    let num_epochs = 200;
    for epoch in 0..num_epochs {
        let mut epoch_loss = 0.0;
        for &(x, y) in &samples {
            let mut criterion = MSELoss::new();
            let prediction = model.forward(&mut graph, &[Operand::Literal(x)])?;
            let loss = criterion.calculate(&mut graph, prediction, y)?;
            epoch_loss += graph.value(loss)?;

            graph.backward(loss)?;
            optimizer.step(&mut graph)?;
            optimizer.zero_grad(&mut graph)?;
            graph.truncate(mark);
        }
        if (epoch + 1) % 40 == 0 {
            println!(
                "Epoch [{}/{}], Loss: {:.6}",
                epoch + 1,
                num_epochs,
                epoch_loss / samples.len() as f64
            );
        }
    }

    for (name, id) in model.named_parameters(&graph) {
        println!("{} = {:.4}", name, graph.value(id)?);
    }
    Ok(())
}
