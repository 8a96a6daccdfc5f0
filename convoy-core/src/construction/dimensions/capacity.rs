use crate::construction::dimensions::Dimension;
use crate::models::common::Location;
use crate::models::problem::Problem;

/// A name of the capacity dimension.
pub const CAPACITY_DIMENSION_NAME: &str = "capacity";

/// Tracks the carried load of a vehicle against its capacity. The demand of a node
/// accrues on arrival, the depot contributes nothing and loads never idle, so the
/// dimension has zero slack.
#[derive(Clone, Copy, Debug, Default)]
pub struct CapacityDimension;

impl Dimension for CapacityDimension {
    fn name(&self) -> &str {
        CAPACITY_DIMENSION_NAME
    }

    fn transit(&self, problem: &Problem, _from: Location, to: Location) -> f64 {
        problem.nodes[to].demand as f64
    }

    fn capacity(&self, problem: &Problem, vehicle: usize) -> f64 {
        problem.fleet.vehicles[vehicle].capacity as f64
    }

    fn bounds(&self, _problem: &Problem, _node: Location) -> (f64, f64) {
        (0., f64::MAX)
    }

    fn slack(&self, _problem: &Problem) -> f64 {
        0.
    }
}
