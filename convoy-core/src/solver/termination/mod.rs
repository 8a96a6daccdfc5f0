//! The termination module contains logic which defines termination criteria for the search,
//! e.g. when to stop improving the solution and return the incumbent.

#[cfg(test)]
#[path = "../../../tests/unit/solver/termination/composite_test.rs"]
mod composite_test;

use crate::solver::SearchContext;
use crate::utils::compare_floats;

/// A trait which specifies criteria when the search should stop looking for a better solution.
pub trait Termination {
    /// Returns true if termination condition is met.
    fn is_termination(&self, search_ctx: &SearchContext) -> bool;

    /// Returns a relative estimation till termination. Value is in the `[0, 1]` range.
    fn estimate(&self, search_ctx: &SearchContext) -> f64;
}

mod max_iterations;
pub use self::max_iterations::MaxIterations;

mod max_time;
pub use self::max_time::MaxTime;

mod interruption;
pub use self::interruption::Interruption;

/// A termination criteria which encapsulates multiple termination criteria.
pub struct CompositeTermination {
    terminations: Vec<Box<dyn Termination + Send + Sync>>,
}

impl CompositeTermination {
    /// Creates a new instance of `CompositeTermination`.
    pub fn new(terminations: Vec<Box<dyn Termination + Send + Sync>>) -> Self {
        Self { terminations }
    }
}

impl Termination for CompositeTermination {
    fn is_termination(&self, search_ctx: &SearchContext) -> bool {
        self.terminations.iter().any(|t| t.is_termination(search_ctx))
    }

    fn estimate(&self, search_ctx: &SearchContext) -> f64 {
        self.terminations.iter().map(|t| t.estimate(search_ctx)).max_by(|a, b| compare_floats(*a, *b)).unwrap_or(0.)
    }
}
