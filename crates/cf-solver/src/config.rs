//! Solver configuration.

use crate::error::{SolverResult, setup};

/// Fixed-point settings for the per-stage outlet flow angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    /// Relative tolerance on the outlet flow angle |Δα3/α3|
    pub eps: f64,
    /// Maximum fixed-point iterations per stage
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            eps: 0.01,
            max_iterations: 100,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> SolverResult<()> {
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(setup(format!("tolerance must be positive, got {}", self.eps)));
        }
        if self.max_iterations == 0 {
            return Err(setup("max_iterations must be at least 1"));
        }
        Ok(())
    }
}
