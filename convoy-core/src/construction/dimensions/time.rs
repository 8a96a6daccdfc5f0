use crate::construction::dimensions::Dimension;
use crate::models::common::Location;
use crate::models::problem::Problem;

/// A name of the time dimension.
pub const TIME_DIMENSION_NAME: &str = "time";

/// Tracks the elapsed route time against node time windows and the route duration
/// limit. Arriving before a window opens means waiting, which is allowed up to the
/// instance waiting allowance per node.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeDimension;

impl Dimension for TimeDimension {
    fn name(&self) -> &str {
        TIME_DIMENSION_NAME
    }

    fn transit(&self, problem: &Problem, from: Location, to: Location) -> f64 {
        problem.transport.duration(from, to)
    }

    fn capacity(&self, problem: &Problem, _vehicle: usize) -> f64 {
        problem.max_route_duration
    }

    fn bounds(&self, problem: &Problem, node: Location) -> (f64, f64) {
        let time_window = &problem.nodes[node].time_window;

        (time_window.start, time_window.end)
    }

    fn slack(&self, problem: &Problem) -> f64 {
        problem.waiting_allowance
    }
}
