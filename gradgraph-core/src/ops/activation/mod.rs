// src/ops/activation/mod.rs

//! # Activation Functions
//!
//! ## Currently Implemented:
//! - [`ReluOp`]: Rectified Linear Unit.

pub mod relu;

pub use relu::ReluOp;
