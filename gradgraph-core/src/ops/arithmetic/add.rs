// gradgraph-core/src/ops/arithmetic/add.rs

use crate::autograd::BackwardOp;
use crate::error::GradGraphError;
use crate::ops::arity_mismatch;

/// `x + y`, captured at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AddOp {
    x: f64,
    y: f64,
}

impl AddOp {
    pub fn capture(values: &[f64]) -> Result<Self, GradGraphError> {
        match values {
            [x, y] => Ok(AddOp { x: *x, y: *y }),
            _ => Err(arity_mismatch("Add", "2", values.len())),
        }
    }
}

impl BackwardOp for AddOp {
    fn evaluate(&self) -> f64 {
        self.x + self.y
    }

    fn local_gradients(&self) -> Vec<f64> {
        vec![1.0, 1.0]
    }

    fn arity(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "Add"
    }
}
