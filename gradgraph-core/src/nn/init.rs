use crate::error::GradGraphError;
use crate::graph::Graph;
use crate::node::NodeId;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Creates `count` leaves named `{prefix}{i}` holding the value 0.
pub fn zeros(graph: &mut Graph, count: usize, prefix: &str) -> Vec<NodeId> {
    (0..count)
        .map(|i| graph.leaf(0.0, &format!("{}{}", prefix, i)))
        .collect()
}

/// Creates `count` leaves named `{prefix}{i}` drawn from `U(low, high)`.
///
/// # Errors
/// `InvalidConfig` if the range is empty or not finite.
pub fn uniform<R: Rng + ?Sized>(
    graph: &mut Graph,
    count: usize,
    low: f64,
    high: f64,
    prefix: &str,
    rng: &mut R,
) -> Result<Vec<NodeId>, GradGraphError> {
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(GradGraphError::InvalidConfig {
            reason: format!(
                "uniform init needs a finite range low < high, got [{}, {})",
                low, high
            ),
        });
    }
    Ok((0..count)
        .map(|i| {
            let value = rng.gen_range(low..high);
            graph.leaf(value, &format!("{}{}", prefix, i))
        })
        .collect())
}

/// Creates `count` leaves named `{prefix}{i}` drawn from `N(mean, std^2)`.
pub fn normal<R: Rng + ?Sized>(
    graph: &mut Graph,
    count: usize,
    mean: f64,
    std: f64,
    prefix: &str,
    rng: &mut R,
) -> Result<Vec<NodeId>, GradGraphError> {
    let distribution = Normal::new(mean, std).map_err(|e| GradGraphError::InvalidConfig {
        reason: format!("normal init with mean {} and std {}: {}", mean, std, e),
    })?;
    Ok((0..count)
        .map(|i| {
            let value = distribution.sample(rng);
            graph.leaf(value, &format!("{}{}", prefix, i))
        })
        .collect())
}
