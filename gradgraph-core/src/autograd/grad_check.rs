use crate::autograd::BackwardOptions;
use crate::error::GradGraphError;
use crate::graph::Graph;
use crate::node::NodeId;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(GradGraphError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(GradGraphError),
    #[error("Input {input_index} has no accumulated gradient after the backward pass.")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is NaN or infinite for input {input_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite { input_index: usize, value: f64 },
}

/// Compares the gradients of a backward pass with central finite differences.
///
/// `func` receives a fresh graph whose first nodes are leaves holding `inputs`
/// (named `x0`, `x1`, ...) and returns the root to differentiate. The graph is
/// rebuilt for every perturbed evaluation, since node values are fixed at
/// construction.
///
/// An input passes when `|analytical - numerical| <= abs_tol + rel_tol * |numerical|`.
pub fn check_grad<F>(
    func: F,
    inputs: &[f64],
    options: BackwardOptions,
    epsilon: f64,
    abs_tol: f64,
    rel_tol: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, GradGraphError>,
{
    let (mut graph, leaves, root) = build(&func, inputs)?;
    graph
        .backward_with(root, options)
        .map_err(GradCheckError::BackwardPassError)?;

    for (input_index, leaf) in leaves.iter().enumerate() {
        let analytical_grad = graph
            .accumulated_grad(*leaf)
            .map_err(GradCheckError::BackwardPassError)?
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index })?;
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index,
                value: analytical_grad,
            });
        }

        let loss_plus = evaluate_perturbed(&func, inputs, input_index, epsilon)?;
        let loss_minus = evaluate_perturbed(&func, inputs, input_index, -epsilon)?;
        let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index,
                loss_plus,
                loss_minus,
            });
        }

        let difference = (analytical_grad - numerical_grad).abs();
        if difference > abs_tol + rel_tol * numerical_grad.abs() {
            return Err(GradCheckError::GradientMismatch {
                input_index,
                analytical_grad,
                numerical_grad,
                difference,
            });
        }
    }
    Ok(())
}

fn build<F>(func: &F, inputs: &[f64]) -> Result<(Graph, Vec<NodeId>, NodeId), GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, GradGraphError>,
{
    let mut graph = Graph::new();
    let leaves: Vec<NodeId> = inputs
        .iter()
        .enumerate()
        .map(|(i, value)| graph.leaf(*value, &format!("x{}", i)))
        .collect();
    let root = func(&mut graph, &leaves).map_err(GradCheckError::ForwardPassError)?;
    Ok((graph, leaves, root))
}

fn evaluate_perturbed<F>(
    func: &F,
    inputs: &[f64],
    index: usize,
    delta: f64,
) -> Result<f64, GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, GradGraphError>,
{
    let mut perturbed = inputs.to_vec();
    perturbed[index] += delta;
    let (graph, _, root) = build(func, &perturbed)?;
    graph.value(root).map_err(GradCheckError::ForwardPassError)
}
