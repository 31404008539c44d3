use crate::autograd::BackwardOp;
use crate::error::GradGraphError;
use crate::ops::arity_mismatch;

/// `(output - target)^2`.
#[derive(Debug, Clone, PartialEq)]
pub struct SquaredErrorOp {
    output: f64,
    target: f64,
}

impl SquaredErrorOp {
    pub fn capture(values: &[f64], target: f64) -> Result<Self, GradGraphError> {
        match values {
            [output] => Ok(SquaredErrorOp {
                output: *output,
                target,
            }),
            _ => Err(arity_mismatch("MSE", "1", values.len())),
        }
    }
}

impl BackwardOp for SquaredErrorOp {
    fn evaluate(&self) -> f64 {
        let diff = self.output - self.target;
        diff * diff
    }

    fn local_gradients(&self) -> Vec<f64> {
        vec![2.0 * (self.output - self.target)]
    }

    fn arity(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "MSE"
    }
}
