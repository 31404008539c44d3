//! Reverse-mode gradient propagation over a [`Graph`](crate::graph::Graph).
//!
//! A backward call runs two phases inside a [`BackwardPass`]: local gradients are
//! pushed from the root towards every ancestor, then root-to-leaf paths are walked
//! to multiply them into one accumulated gradient per leaf. All traversal state
//! belongs to the pass and is discarded when the call returns.

pub mod backward_op;
pub mod grad_check;
pub mod options;
pub mod pass;

pub use backward_op::BackwardOp;
pub use options::{BackwardOptions, PathMode};
pub use pass::{BackwardPass, Gradients, VisitState};
