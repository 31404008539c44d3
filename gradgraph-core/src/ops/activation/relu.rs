use crate::autograd::BackwardOp;
use crate::error::GradGraphError;
use crate::ops::arity_mismatch;

/// Rectified Linear Unit: `max(0, x)`.
///
/// The local gradient is `1` for `x > 0` and `0` for `x <= 0`, the boundary included.
#[derive(Debug, Clone, PartialEq)]
pub struct ReluOp {
    x: f64,
}

impl ReluOp {
    pub fn capture(values: &[f64]) -> Result<Self, GradGraphError> {
        match values {
            [x] => Ok(ReluOp { x: *x }),
            _ => Err(arity_mismatch("Relu", "1", values.len())),
        }
    }
}

impl BackwardOp for ReluOp {
    fn evaluate(&self) -> f64 {
        if self.x > 0.0 {
            self.x
        } else {
            0.0
        }
    }

    fn local_gradients(&self) -> Vec<f64> {
        if self.x > 0.0 {
            vec![1.0]
        } else {
            vec![0.0]
        }
    }

    fn arity(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "Relu"
    }
}
