#[cfg(test)]
#[path = "../../tests/unit/solver/extraction_test.rs"]
mod extraction_test;

use crate::construction::context::SolutionContext;
use crate::models::problem::Problem;
use crate::models::solution::{RoutePlan, Stop, VehicleRoute, route_arcs};

/// Converts the internal solution representation into a route plan. Service times are
/// recomputed by walking each tour from the depot: a vehicle arriving early waits for
/// the window to open. Routes which never left the depot are omitted.
pub fn extract_route_plan(problem: &Problem, solution: &SolutionContext) -> RoutePlan {
    let depot_start = problem.nodes[problem.depot].time_window.start;

    let routes = solution
        .routes
        .iter()
        .filter(|route_ctx| !route_ctx.route.tour.is_empty())
        .map(|route_ctx| {
            let visits = route_ctx.route.tour.visits();

            let mut stops = Vec::with_capacity(visits.len() + 2);
            stops.push(Stop { node: problem.depot, time: depot_start });

            let mut previous = problem.depot;
            let mut time = depot_start;
            for &visit in visits {
                let arrival = time + problem.transport.duration(previous, visit);
                time = arrival.max(problem.nodes[visit].time_window.start);
                stops.push(Stop { node: visit, time });
                previous = visit;
            }

            let arrival = time + problem.transport.duration(previous, problem.depot);
            stops.push(Stop { node: problem.depot, time: arrival.max(depot_start) });

            let load = visits.iter().map(|&visit| problem.nodes[visit].demand).sum();
            let distance =
                route_arcs(problem.depot, visits).map(|(from, to)| problem.transport.distance(from, to)).sum();

            VehicleRoute { vehicle: route_ctx.route.vehicle, stops, load, distance }
        })
        .collect();

    RoutePlan { routes, unassigned: solution.unassigned.clone(), cost: solution.cost() }
}
