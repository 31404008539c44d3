// gradgraph-core/src/ops/linalg/matmul.rs

use crate::autograd::BackwardOp;
use crate::error::GradGraphError;
use crate::ops::arity_mismatch;

/// Product of a `1 x n` row with an `n x 1` column, i.e. `sum(row[i] * col[i])`.
///
/// The node's parents are the `n` row entries followed by the `n` column entries.
#[derive(Debug, Clone, PartialEq)]
pub struct MatMulOp {
    row: Vec<f64>,
    col: Vec<f64>,
}

impl MatMulOp {
    pub fn capture(values: &[f64]) -> Result<Self, GradGraphError> {
        if values.is_empty() || values.len() % 2 != 0 {
            return Err(arity_mismatch(
                "Matmul",
                "an even, non-zero number of",
                values.len(),
            ));
        }
        let (row, col) = values.split_at(values.len() / 2);
        Ok(MatMulOp {
            row: row.to_vec(),
            col: col.to_vec(),
        })
    }

    /// Number of entries in the row (and in the column).
    pub fn inner_dim(&self) -> usize {
        self.row.len()
    }
}

impl BackwardOp for MatMulOp {
    fn evaluate(&self) -> f64 {
        self.row.iter().zip(&self.col).map(|(r, c)| r * c).sum()
    }

    // d/d row[i] = col[i], d/d col[i] = row[i]
    fn local_gradients(&self) -> Vec<f64> {
        self.col.iter().chain(&self.row).copied().collect()
    }

    fn arity(&self) -> usize {
        self.row.len() + self.col.len()
    }

    fn name(&self) -> &'static str {
        "Matmul"
    }
}
