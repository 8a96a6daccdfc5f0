use crate::construction::context::SolutionContext;
use crate::construction::dimensions::{CapacityDimension, DimensionPipeline, TimeDimension};
use crate::construction::insertion::CheapestInsertion;
use crate::models::common::Location;
use crate::models::problem::Problem;
use std::sync::Arc;

/// Creates a pipeline with the default capacity and time dimensions.
pub fn create_default_pipeline() -> Arc<DimensionPipeline> {
    let mut pipeline = DimensionPipeline::new();
    pipeline.add_dimension(Arc::new(CapacityDimension)).add_dimension(Arc::new(TimeDimension));

    Arc::new(pipeline)
}

/// Builds a solution for the problem using cheapest insertion with default dimensions.
pub fn create_insertion_solution(problem: &Problem) -> SolutionContext {
    CheapestInsertion::new(create_default_pipeline()).run(problem)
}

/// Builds a solution context with the given visit sequences assigned to consecutive
/// vehicles and all route states refreshed.
pub fn create_solution_with_routes(problem: &Problem, routes: &[&[Location]]) -> SolutionContext {
    let pipeline = create_default_pipeline();
    let mut solution = SolutionContext::new(problem);

    for (vehicle, visits) in routes.iter().enumerate() {
        for (index, &visit) in visits.iter().enumerate() {
            solution.routes[vehicle].route.tour.insert_at(visit, index);
        }
        solution.required.retain(|location| !visits.contains(location));
    }

    for route_ctx in solution.routes.iter_mut() {
        pipeline.accept_route_state(problem, route_ctx);
    }

    solution
}
