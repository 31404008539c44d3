use crate::autograd::BackwardOp;
use crate::error::GradGraphError;
use crate::ops::arity_mismatch;

/// `output - target`.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceOp {
    output: f64,
    target: f64,
}

impl DifferenceOp {
    pub fn capture(values: &[f64], target: f64) -> Result<Self, GradGraphError> {
        match values {
            [output] => Ok(DifferenceOp {
                output: *output,
                target,
            }),
            _ => Err(arity_mismatch("Loss", "1", values.len())),
        }
    }
}

impl BackwardOp for DifferenceOp {
    fn evaluate(&self) -> f64 {
        self.output - self.target
    }

    fn local_gradients(&self) -> Vec<f64> {
        vec![1.0]
    }

    fn arity(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "Loss"
    }
}
