#[cfg(test)]
#[path = "../../tests/unit/construction/insertion_test.rs"]
mod insertion_test;

use crate::construction::context::{RouteContext, SolutionContext};
use crate::construction::dimensions::DimensionPipeline;
use crate::models::common::{Cost, Location};
use crate::models::problem::Problem;
use crate::models::solution::UnassignmentReason;
use crate::utils::compare_floats;
use std::cmp::Ordering;
use std::sync::Arc;

/// Specifies a result of a single insertion evaluation.
#[derive(Clone, Copy, Debug)]
struct InsertionSuccess {
    /// Marginal arc cost of the insertion.
    cost: Cost,
    /// The node to insert.
    node: Location,
    /// Target route index within the solution.
    route: usize,
    /// Target position within the route tour.
    position: usize,
}

/// Builds an initial solution by applying the globally cheapest feasible insertion
/// until no unassigned node can be inserted anywhere.
///
/// The construction is strictly sequential and deterministic: candidates are probed
/// in (node, route, position) order and a candidate replaces the best one only when
/// it is strictly cheaper, so cost ties resolve to the lowest node index first.
pub struct CheapestInsertion {
    pipeline: Arc<DimensionPipeline>,
}

impl CheapestInsertion {
    /// Creates a new instance of [`CheapestInsertion`].
    pub fn new(pipeline: Arc<DimensionPipeline>) -> Self {
        Self { pipeline }
    }

    /// Runs construction to completion returning a solution where every customer
    /// is either visited by some route or reported as unassigned.
    pub fn run(&self, problem: &Problem) -> SolutionContext {
        let mut ctx = SolutionContext::new(problem);
        ctx.routes.iter_mut().for_each(|route_ctx| self.pipeline.accept_route_state(problem, route_ctx));

        while let Some(best) = self.find_best_insertion(problem, &ctx) {
            let route_ctx = &mut ctx.routes[best.route];
            route_ctx.route.tour.insert_at(best.node, best.position);
            self.pipeline.accept_route_state(problem, route_ctx);

            ctx.required.retain(|&node| node != best.node);
        }

        let max_capacity = problem.fleet.vehicles.iter().map(|vehicle| vehicle.capacity).max();
        for node in std::mem::take(&mut ctx.required) {
            let reason = match max_capacity {
                Some(capacity) if problem.nodes[node].demand > capacity => UnassignmentReason::ExceedsVehicleCapacity,
                _ => UnassignmentReason::NoFeasibleInsertion,
            };
            ctx.unassigned.push((node, reason));
        }

        ctx
    }

    fn find_best_insertion(&self, problem: &Problem, ctx: &SolutionContext) -> Option<InsertionSuccess> {
        let mut best: Option<InsertionSuccess> = None;

        for &node in ctx.required.iter() {
            for (route_idx, route_ctx) in ctx.routes.iter().enumerate() {
                for position in 0..=route_ctx.route.tour.len() {
                    if self.pipeline.evaluate_insertion(problem, route_ctx, position, node).is_err() {
                        continue;
                    }

                    let cost = insertion_cost(problem, route_ctx, position, node);
                    if best.as_ref().is_none_or(|success| compare_floats(cost, success.cost) == Ordering::Less) {
                        best = Some(InsertionSuccess { cost, node, route: route_idx, position });
                    }
                }
            }
        }

        best
    }
}

/// Returns the marginal arc cost of inserting the node at the position of the route.
fn insertion_cost(problem: &Problem, route_ctx: &RouteContext, position: usize, node: Location) -> Cost {
    let visits = route_ctx.route.tour.visits();
    let prev = if position == 0 { problem.depot } else { visits[position - 1] };
    let next = if position == visits.len() { problem.depot } else { visits[position] };
    let transport = problem.transport.as_ref();

    let detour = transport.distance(prev, node) + transport.distance(node, next);
    let saved = if visits.is_empty() { 0. } else { transport.distance(prev, next) };

    detour - saved
}
