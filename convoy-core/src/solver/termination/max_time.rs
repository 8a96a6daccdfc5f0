#[cfg(test)]
#[path = "../../../tests/unit/solver/termination/max_time_test.rs"]
mod max_time_test;

use crate::solver::SearchContext;
use crate::solver::termination::Termination;
use crate::utils::Timer;

/// Stops when max time elapsed.
pub struct MaxTime {
    start: Timer,
    limit_in_secs: f64,
}

impl MaxTime {
    /// Creates a new instance of [`MaxTime`].
    pub fn new(limit_in_secs: f64) -> Self {
        Self { start: Timer::start(), limit_in_secs }
    }
}

impl Termination for MaxTime {
    fn is_termination(&self, _: &SearchContext) -> bool {
        self.start.elapsed_secs_as_f64() > self.limit_in_secs
    }

    fn estimate(&self, _: &SearchContext) -> f64 {
        (self.start.elapsed_secs_as_f64() / self.limit_in_secs).min(1.)
    }
}
