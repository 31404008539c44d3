// gradgraph-core/src/ops/arithmetic/pow.rs

use crate::autograd::BackwardOp;
use crate::error::GradGraphError;
use crate::ops::arity_mismatch;

/// Raises the single operand to a constant exponent.
///
/// The exponent is part of the operation, not a node, so it receives no gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct PowOp {
    base: f64,
    exponent: f64,
}

impl PowOp {
    pub fn capture(values: &[f64], exponent: f64) -> Result<Self, GradGraphError> {
        match values {
            [base] => Ok(PowOp {
                base: *base,
                exponent,
            }),
            _ => Err(arity_mismatch("Power", "1", values.len())),
        }
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }
}

impl BackwardOp for PowOp {
    fn evaluate(&self) -> f64 {
        self.base.powf(self.exponent)
    }

    fn local_gradients(&self) -> Vec<f64> {
        // x^0 is constant; avoid 0 * x^-1 turning into NaN at x = 0.
        if self.exponent == 0.0 {
            return vec![0.0];
        }
        vec![self.exponent * self.base.powf(self.exponent - 1.0)]
    }

    fn arity(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "Power"
    }
}
