/// How gradients flowing into a node through several paths are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathMode {
    /// Each node keeps the local gradient set by the consumer visited last, and every
    /// leaf receives the product along the single path first discovered by the
    /// depth-first walk. Exact when no node is shared between paths.
    #[default]
    LastVisit,
    /// Local gradients are kept per edge and the contributions of all root-to-leaf
    /// paths are summed (multivariate chain rule).
    Summed,
}

/// Options of a single backward call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackwardOptions {
    pub path_mode: PathMode,
}

impl BackwardOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `BackwardOptions::new().with_path_mode(PathMode::Summed)`.
    pub fn summed() -> Self {
        Self::new().with_path_mode(PathMode::Summed)
    }

    pub fn with_path_mode(mut self, path_mode: PathMode) -> Self {
        self.path_mode = path_mode;
        self
    }
}
