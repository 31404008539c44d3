// src/nn/mod.rs
// Models, parameter initialization and loss wrappers built on top of the graph.

pub mod init;
pub mod layers;
pub mod losses;
pub mod module;

// Re-export common items
pub use layers::Linear;
pub use losses::{DifferenceLoss, MSELoss};
pub use module::Module;
