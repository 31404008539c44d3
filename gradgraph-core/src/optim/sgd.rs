use crate::error::GradGraphError;
use crate::graph::Graph;
use crate::node::NodeId;
use crate::optim::config::SgdConfig;
use crate::optim::optimizer_trait::Optimizer;

/// Plain gradient descent over an explicit list of leaves.
#[derive(Debug, Clone)]
pub struct SgdOptimizer {
    params: Vec<NodeId>,
    config: SgdConfig,
}

impl SgdOptimizer {
    /// Creates a new `SgdOptimizer`.
    ///
    /// # Arguments
    ///
    /// * `params`: The leaf nodes to optimize, typically `Module::parameters()`.
    /// * `config`: Learning rate and direction.
    pub fn new(params: impl IntoIterator<Item = NodeId>, config: SgdConfig) -> Self {
        SgdOptimizer {
            params: params.into_iter().collect(),
            config,
        }
    }

    pub fn config(&self) -> &SgdConfig {
        &self.config
    }

    // Every id must exist before any leaf is touched, so a bad list never leaves a
    // step half applied.
    fn check_params(&self, graph: &Graph) -> Result<(), GradGraphError> {
        for &param in &self.params {
            graph.node(param)?;
        }
        Ok(())
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<(), GradGraphError> {
        self.config = self.config.with_learning_rate(learning_rate)?;
        Ok(())
    }
}

impl Optimizer for SgdOptimizer {
    fn step(&mut self, graph: &mut Graph) -> Result<usize, GradGraphError> {
        self.check_params(graph)?;
        let scale = self.config.direction().sign() * self.config.learning_rate();
        let mut updated = 0;
        for &param in &self.params {
            if !graph.is_leaf(param)? {
                log::warn!("SGD step: {} is not a leaf, skipping", param);
                continue;
            }
            let Some(grad) = graph.accumulated_grad(param)? else {
                continue;
            };
            let value = graph.value(param)?;
            graph.set_leaf_value(param, value + scale * grad)?;
            updated += 1;
        }
        log::debug!("SGD step updated {} of {} params", updated, self.params.len());
        Ok(updated)
    }

    fn zero_grad(&mut self, graph: &mut Graph) -> Result<(), GradGraphError> {
        self.check_params(graph)?;
        for &param in &self.params {
            if !graph.is_leaf(param)? {
                log::warn!("SGD zero_grad: {} is not a leaf, skipping", param);
                continue;
            }
            graph.set_accumulated_grad(param, Some(0.0))?;
        }
        Ok(())
    }

    fn params(&self) -> &[NodeId] {
        &self.params
    }
}
