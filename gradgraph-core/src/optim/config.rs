use crate::error::GradGraphError;

/// Default learning rate of [`SgdConfig`].
pub const DEFAULT_LEARNING_RATE: f64 = 0.001;

/// Which way a step moves a leaf relative to its gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// `value - lr * grad`: minimizes the root.
    #[default]
    Descent,
    /// `value + lr * grad`: maximizes the root.
    Ascent,
}

impl Direction {
    pub(crate) fn sign(self) -> f64 {
        match self {
            Direction::Descent => -1.0,
            Direction::Ascent => 1.0,
        }
    }
}

/// Hyperparameters of [`SgdOptimizer`](crate::optim::SgdOptimizer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdConfig {
    learning_rate: f64,
    direction: Direction,
}

impl Default for SgdConfig {
    fn default() -> Self {
        SgdConfig {
            learning_rate: DEFAULT_LEARNING_RATE,
            direction: Direction::default(),
        }
    }
}

impl SgdConfig {
    /// # Errors
    /// `InvalidConfig` if `learning_rate` is not a finite, strictly positive number.
    pub fn new(learning_rate: f64) -> Result<Self, GradGraphError> {
        Self::default().with_learning_rate(learning_rate)
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Result<Self, GradGraphError> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(GradGraphError::InvalidConfig {
                reason: format!(
                    "learning rate must be finite and positive, got {}",
                    learning_rate
                ),
            });
        }
        self.learning_rate = learning_rate;
        Ok(self)
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}
