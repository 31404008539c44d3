// gradgraph-core/src/optim/mod.rs

//! Optimizers for training models built on a graph.
//!
//! This module provides the `Optimizer` trait, its configuration, and the
//! gradient-descent implementation `SgdOptimizer`.

pub mod config;
pub mod optimizer_trait;
pub mod sgd;

// Re-export key items for easier access
pub use config::{Direction, SgdConfig};
pub use optimizer_trait::Optimizer;
pub use sgd::SgdOptimizer;

// Declare test module conditionally
#[cfg(test)]
mod sgd_test;
