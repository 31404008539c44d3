// gradgraph-core/src/ops/arithmetic/mul.rs

use crate::autograd::BackwardOp;
use crate::error::GradGraphError;
use crate::ops::arity_mismatch;

/// `x * y`, captured at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MulOp {
    x: f64,
    y: f64,
}

impl MulOp {
    pub fn capture(values: &[f64]) -> Result<Self, GradGraphError> {
        match values {
            [x, y] => Ok(MulOp { x: *x, y: *y }),
            _ => Err(arity_mismatch("Multiply", "2", values.len())),
        }
    }
}

impl BackwardOp for MulOp {
    fn evaluate(&self) -> f64 {
        self.x * self.y
    }

    // d(xy)/dx = y, d(xy)/dy = x
    fn local_gradients(&self) -> Vec<f64> {
        vec![self.y, self.x]
    }

    fn arity(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "Multiply"
    }
}
