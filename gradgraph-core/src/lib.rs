//! Scalar reverse-mode automatic differentiation.
//!
//! Nodes live in a [`Graph`] arena. Leaves are created from literal values,
//! derived nodes from [`ops`] applied to existing nodes, and [`Graph::backward`]
//! deposits on every reached leaf the derivative of the chosen root with respect
//! to that leaf.
//!
//! ```
//! use gradgraph_core::Graph;
//!
//! let mut graph = Graph::new();
//! let x = graph.leaf(-2.0, "X");
//! let y = graph.leaf(5.0, "Y");
//! let z = graph.leaf(-4.0, "Z");
//! let q = graph.add(x, y)?;
//! let f = graph.mul(q, z)?;
//! graph.backward(f)?;
//! assert_eq!(graph.value(f)?, -12.0);
//! assert_eq!(graph.accumulated_grad(z)?, Some(3.0));
//! # Ok::<(), gradgraph_core::GradGraphError>(())
//! ```

pub mod autograd;
pub mod error;
pub mod graph;
pub mod nn;
pub mod node;
pub mod ops;
pub mod optim;
pub mod utils;

pub use autograd::{BackwardOptions, Gradients, PathMode};
pub use error::GradGraphError;
pub use graph::Graph;
pub use node::{Node, NodeId};
pub use ops::{OpKind, Operand, Operation};

#[cfg(test)]
mod graph_test;
