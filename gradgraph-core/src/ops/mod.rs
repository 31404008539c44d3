//! # Scalar Operations Module (`ops`)
//!
//! Every derived node of a [`Graph`](crate::graph::Graph) carries one [`Operation`].
//! Operations are grouped into submodules by kind, each one a small struct that
//! snapshots its operand values and implements [`BackwardOp`].
//!
//! ## Structure:
//!
//! - [`OpKind`]: value-free description handed to [`Graph::apply`](crate::graph::Graph::apply).
//! - [`Operation`]: closed set of captured operations, dispatched with `match`.
//! - [`Operand`]: either an existing node or a literal that gets coerced into a leaf.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: sum, product, power.
//! - [`activation`]: rectified linear unit.
//! - [`linalg`]: row-by-column (matrix) product.
//! - [`loss`]: difference and squared-error losses.

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod loss;

use crate::autograd::BackwardOp;
use crate::error::GradGraphError;
use crate::node::NodeId;

pub use activation::ReluOp;
pub use arithmetic::{AddOp, MulOp, PowOp};
pub use linalg::MatMulOp;
pub use loss::{DifferenceOp, SquaredErrorOp};

/// Describes which operation to build, without operand values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpKind {
    Sum,
    Product,
    /// `x^exponent`; the exponent is a constant, not a node.
    Power { exponent: f64 },
    Relu,
    /// Inner product of the first half of the operands with the second half.
    MatMul,
    /// `output - target`; only the output is a parent.
    Difference { target: f64 },
    /// `(output - target)^2`; only the output is a parent.
    SquaredError { target: f64 },
}

/// An operation together with the operand values it captured.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Add(AddOp),
    Mul(MulOp),
    Pow(PowOp),
    Relu(ReluOp),
    MatMul(MatMulOp),
    Difference(DifferenceOp),
    SquaredError(SquaredErrorOp),
}

impl Operation {
    /// Snapshots `values` (the current operand values, in parent order) into the
    /// operation described by `kind`.
    pub fn capture(kind: OpKind, values: &[f64]) -> Result<Self, GradGraphError> {
        let op = match kind {
            OpKind::Sum => Operation::Add(AddOp::capture(values)?),
            OpKind::Product => Operation::Mul(MulOp::capture(values)?),
            OpKind::Power { exponent } => Operation::Pow(PowOp::capture(values, exponent)?),
            OpKind::Relu => Operation::Relu(ReluOp::capture(values)?),
            OpKind::MatMul => Operation::MatMul(MatMulOp::capture(values)?),
            OpKind::Difference { target } => {
                Operation::Difference(DifferenceOp::capture(values, target)?)
            }
            OpKind::SquaredError { target } => {
                Operation::SquaredError(SquaredErrorOp::capture(values, target)?)
            }
        };
        Ok(op)
    }

    fn inner(&self) -> &dyn BackwardOp {
        match self {
            Operation::Add(op) => op,
            Operation::Mul(op) => op,
            Operation::Pow(op) => op,
            Operation::Relu(op) => op,
            Operation::MatMul(op) => op,
            Operation::Difference(op) => op,
            Operation::SquaredError(op) => op,
        }
    }
}

impl BackwardOp for Operation {
    fn evaluate(&self) -> f64 {
        self.inner().evaluate()
    }

    fn local_gradients(&self) -> Vec<f64> {
        self.inner().local_gradients()
    }

    fn arity(&self) -> usize {
        self.inner().arity()
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}

/// Input to an operation factory: an existing node or a literal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Node(NodeId),
    Literal(f64),
}

impl From<NodeId> for Operand {
    fn from(id: NodeId) -> Self {
        Operand::Node(id)
    }
}

impl From<&NodeId> for Operand {
    fn from(id: &NodeId) -> Self {
        Operand::Node(*id)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Literal(value)
    }
}

pub(crate) fn arity_mismatch(operation: &str, expected: &str, actual: usize) -> GradGraphError {
    GradGraphError::topology(format!(
        "{} expects {} operand(s), got {}",
        operation, expected, actual
    ))
}
