use crate::error::GradGraphError;
use crate::graph::Graph;
use crate::nn::init;
use crate::nn::module::Module;
use crate::node::NodeId;
use crate::ops::Operand;
use rand::Rng;

/// A single output unit: `y = w . x + b`, optionally followed by a ReLU.
#[derive(Debug, Clone)]
pub struct Linear {
    weights: Vec<NodeId>,
    bias: Option<NodeId>,
    relu: bool,
}

impl Linear {
    /// Creates a unit with `in_features` weights drawn from `U(-1/sqrt(n), 1/sqrt(n))`
    /// and a bias initialized to zero.
    pub fn new<R: Rng + ?Sized>(
        graph: &mut Graph,
        in_features: usize,
        has_bias: bool,
        rng: &mut R,
    ) -> Result<Self, GradGraphError> {
        if in_features == 0 {
            return Err(GradGraphError::InvalidConfig {
                reason: "Linear needs at least one input feature".to_string(),
            });
        }
        let bound = 1.0 / (in_features as f64).sqrt();
        let weights = init::uniform(graph, in_features, -bound, bound, "w", rng)?;
        let bias = has_bias.then(|| graph.leaf(0.0, "b"));
        Ok(Linear {
            weights,
            bias,
            relu: false,
        })
    }

    /// Wraps existing leaves, e.g. ones created with chosen values.
    pub fn from_parameters(weights: Vec<NodeId>, bias: Option<NodeId>) -> Self {
        Linear {
            weights,
            bias,
            relu: false,
        }
    }

    /// Applies a ReLU to the output of the unit.
    pub fn with_relu(mut self, relu: bool) -> Self {
        self.relu = relu;
        self
    }

    pub fn in_features(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[NodeId] {
        &self.weights
    }

    pub fn bias(&self) -> Option<NodeId> {
        self.bias
    }
}

impl Module for Linear {
    fn forward(&self, graph: &mut Graph, inputs: &[Operand]) -> Result<NodeId, GradGraphError> {
        if inputs.len() != self.weights.len() {
            return Err(GradGraphError::topology(format!(
                "Linear expects {} inputs, got {}",
                self.weights.len(),
                inputs.len()
            )));
        }
        let mut output = graph.matmul(self.weights.iter().copied(), inputs.iter().copied())?;
        if let Some(bias) = self.bias {
            output = graph.add(output, bias)?;
        }
        if self.relu {
            output = graph.relu(output)?;
        }
        Ok(output)
    }

    fn parameters(&self) -> Vec<NodeId> {
        let mut params = self.weights.clone();
        params.extend(self.bias);
        params
    }
}
