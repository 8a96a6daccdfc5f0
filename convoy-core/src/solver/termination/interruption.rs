#[cfg(test)]
#[path = "../../../tests/unit/solver/termination/interruption_test.rs"]
mod interruption_test;

use crate::solver::SearchContext;
use crate::solver::termination::Termination;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A termination criteria which is in terminated state when an external signal is set, e.g.
/// when the user cancels a run from another thread.
pub struct Interruption {
    signal: Arc<AtomicBool>,
}

impl Interruption {
    /// Creates a new instance of `Interruption`.
    pub fn new(signal: Arc<AtomicBool>) -> Self {
        Self { signal }
    }
}

impl Termination for Interruption {
    fn is_termination(&self, _: &SearchContext) -> bool {
        self.signal.load(Ordering::Relaxed)
    }

    fn estimate(&self, _: &SearchContext) -> f64 {
        if self.signal.load(Ordering::Relaxed) { 1. } else { 0. }
    }
}
