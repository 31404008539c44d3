// src/ops/loss/mod.rs

//! # Loss Operations
//!
//! Operations attached to the synthetic node built by the loss wrappers in
//! [`nn::losses`](crate::nn::losses). The target is captured as a constant: only
//! the model output is a parent, so the target never receives a gradient.

pub mod difference;
pub mod squared_error;

pub use difference::DifferenceOp;
pub use squared_error::SquaredErrorOp;
