#[cfg(test)]
#[path = "../../../tests/unit/construction/dimensions/pipeline_test.rs"]
mod pipeline_test;

mod capacity;
pub use self::capacity::{CAPACITY_DIMENSION_NAME, CapacityDimension};

mod time;
pub use self::time::{TIME_DIMENSION_NAME, TimeDimension};

use crate::construction::context::RouteContext;
use crate::models::common::Location;
use crate::models::problem::Problem;
use crate::models::solution::route_arcs;
use crate::utils::COST_EPSILON;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Describes a quantity accumulated along a route, e.g. carried load or elapsed time.
///
/// Transit amounts must be non-negative. This makes the cumulative value
/// non-decreasing along a route and allows incremental feasibility checks
/// against cached route state.
pub trait Dimension: Send + Sync {
    /// Returns a unique name of the dimension.
    fn name(&self) -> &str;

    /// Returns the amount accrued when traversing the arc and arriving at `to`.
    fn transit(&self, problem: &Problem, from: Location, to: Location) -> f64;

    /// Returns the hard ceiling of the cumulative value for the given vehicle.
    fn capacity(&self, problem: &Problem, vehicle: usize) -> f64;

    /// Returns the interval the cumulative value must lie in on arrival at the node.
    fn bounds(&self, problem: &Problem, node: Location) -> (f64, f64);

    /// Returns the maximum amount the cumulative value can be pushed up at a single
    /// node to reach the node's lower bound, e.g. by waiting.
    fn slack(&self, problem: &Problem) -> f64;
}

/// Marks a visit sequence infeasible in a specific dimension at a specific node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimensionViolation {
    /// Slot of the violated dimension within the pipeline.
    pub dimension: usize,
    /// Node at which the violation occurs.
    pub location: Location,
}

/// An ordered set of dimensions which acts as the single feasibility authority
/// of the search: every candidate route change is checked against all of them.
#[derive(Default)]
pub struct DimensionPipeline {
    dimensions: Vec<Arc<dyn Dimension>>,
    index: FxHashMap<String, usize>,
}

impl DimensionPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dimension to the pipeline. A dimension with an already known name
    /// replaces the previous one keeping its slot.
    pub fn add_dimension(&mut self, dimension: Arc<dyn Dimension>) -> &mut Self {
        if let Some(&slot) = self.index.get(dimension.name()) {
            self.dimensions[slot] = dimension;
        } else {
            self.index.insert(dimension.name().to_string(), self.dimensions.len());
            self.dimensions.push(dimension);
        }

        self
    }

    /// Returns amount of dimensions in the pipeline.
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// Checks whether the pipeline has no dimensions.
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Returns the slot of the dimension with the given name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns the name of the dimension at the given slot.
    pub fn name_of(&self, slot: usize) -> &str {
        self.dimensions[slot].name()
    }

    /// Checks whether the visit sequence is feasible for the vehicle in all
    /// dimensions. Folds the whole sequence from the depot on, so it works for
    /// any candidate sequence regardless of cached state.
    pub fn evaluate(&self, problem: &Problem, vehicle: usize, visits: &[Location]) -> Result<(), DimensionViolation> {
        if visits.is_empty() {
            return Ok(());
        }

        for (slot, dimension) in self.dimensions.iter().enumerate() {
            let dimension = dimension.as_ref();
            let ceiling = dimension.capacity(problem, vehicle);
            let (start, _) = dimension.bounds(problem, problem.depot);

            let mut cumul = start;
            let mut prev = problem.depot;

            for &visit in visits {
                cumul = advance(problem, dimension, slot, ceiling, cumul, prev, visit)?;
                prev = visit;
            }

            advance(problem, dimension, slot, ceiling, cumul, prev, problem.depot)?;
        }

        Ok(())
    }

    /// Checks whether the node can be inserted at the index of the route without
    /// breaking any dimension. Recomputes only from the point of change using the
    /// cached route state, which makes the probe cheap for long routes.
    pub fn evaluate_insertion(
        &self,
        problem: &Problem,
        route_ctx: &RouteContext,
        index: usize,
        node: Location,
    ) -> Result<(), DimensionViolation> {
        let visits = route_ctx.route.tour.visits();
        let state = &route_ctx.state;
        let len = visits.len();

        for (slot, dimension) in self.dimensions.iter().enumerate() {
            let dimension = dimension.as_ref();
            let ceiling = dimension.capacity(problem, route_ctx.route.vehicle);
            let prev = if index == 0 { problem.depot } else { visits[index - 1] };
            let next = if index == len { problem.depot } else { visits[index] };

            let at_node = advance(problem, dimension, slot, ceiling, state.cumul_at(slot, index), prev, node)?;
            let at_next = advance(problem, dimension, slot, ceiling, at_node, node, next)?;

            let successor = index + 1;
            if at_next >= state.cumul_at(slot, successor) - COST_EPSILON {
                // pushing the value up keeps downstream lower bounds satisfiable,
                // the cached latest bound of the successor covers the rest
                if at_next > state.latest_at(slot, successor) + COST_EPSILON {
                    return Err(DimensionViolation { dimension: slot, location: next });
                }
            } else if index < len {
                // an earlier value can increase waiting downstream, refold the suffix
                let mut cumul = at_next;
                let mut prev = visits[index];
                for &visit in visits[index + 1..].iter() {
                    cumul = advance(problem, dimension, slot, ceiling, cumul, prev, visit)?;
                    prev = visit;
                }
                advance(problem, dimension, slot, ceiling, cumul, prev, problem.depot)?;
            }
        }

        Ok(())
    }

    /// Recomputes the cached state of the route: per dimension forward cumulative
    /// values and backward latest feasible values at every route position, plus
    /// the total travel distance. The route is assumed feasible.
    pub fn accept_route_state(&self, problem: &Problem, route_ctx: &mut RouteContext) {
        let RouteContext { route, state } = route_ctx;
        let visits = route.tour.visits();
        let len = visits.len();

        let mut cumuls = Vec::with_capacity(self.dimensions.len());
        let mut latests = Vec::with_capacity(self.dimensions.len());

        for dimension in self.dimensions.iter() {
            let dimension = dimension.as_ref();
            let ceiling = dimension.capacity(problem, route.vehicle);
            let (start, depot_upper) = dimension.bounds(problem, problem.depot);

            let mut forward = Vec::with_capacity(len + 2);
            forward.push(start);

            let mut cumul = start;
            let mut prev = problem.depot;
            for &visit in visits {
                let (lower, _) = dimension.bounds(problem, visit);
                cumul = (cumul + dimension.transit(problem, prev, visit)).max(lower);
                forward.push(cumul);
                prev = visit;
            }
            forward
                .push(if len == 0 { cumul } else { (cumul + dimension.transit(problem, prev, problem.depot)).max(start) });

            let mut backward = vec![0.; len + 2];
            backward[len + 1] = depot_upper.min(ceiling);
            for position in (1..=len).rev() {
                let visit = visits[position - 1];
                let next = if position == len { problem.depot } else { visits[position] };
                let (_, upper) = dimension.bounds(problem, visit);

                backward[position] =
                    upper.min(ceiling).min(backward[position + 1] - dimension.transit(problem, visit, next));
            }
            backward[0] = if len == 0 {
                backward[1]
            } else {
                depot_upper.min(ceiling).min(backward[1] - dimension.transit(problem, problem.depot, visits[0]))
            };

            cumuls.push(forward);
            latests.push(backward);
        }

        let total_distance =
            route_arcs(problem.depot, visits).map(|(from, to)| problem.transport.distance(from, to)).sum();

        state.put(cumuls, latests, total_distance);
    }
}

/// Advances the cumulative value over one transition arriving at `to`.
fn advance(
    problem: &Problem,
    dimension: &dyn Dimension,
    slot: usize,
    ceiling: f64,
    cumul: f64,
    from: Location,
    to: Location,
) -> Result<f64, DimensionViolation> {
    let natural = cumul + dimension.transit(problem, from, to);
    let (lower, upper) = dimension.bounds(problem, to);
    let upper = upper.min(ceiling);

    let value = if natural < lower {
        if lower - natural > dimension.slack(problem) + COST_EPSILON {
            return Err(DimensionViolation { dimension: slot, location: to });
        }
        lower
    } else {
        natural
    };

    if value > upper + COST_EPSILON {
        return Err(DimensionViolation { dimension: slot, location: to });
    }

    Ok(value)
}
