#[cfg(test)]
#[path = "../../../tests/unit/solver/termination/max_iterations_test.rs"]
mod max_iterations_test;

use crate::solver::SearchContext;
use crate::solver::termination::Termination;

/// A termination criteria which is in terminated state when maximum amount of search iterations is exceeded.
pub struct MaxIterations {
    limit: usize,
}

impl MaxIterations {
    /// Creates a new instance of `MaxIterations`.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Termination for MaxIterations {
    fn is_termination(&self, search_ctx: &SearchContext) -> bool {
        search_ctx.iteration >= self.limit
    }

    fn estimate(&self, search_ctx: &SearchContext) -> f64 {
        (search_ctx.iteration as f64 / self.limit as f64).min(1.)
    }
}
