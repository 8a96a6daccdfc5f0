use super::*;
use crate::construction::context::SolutionContext;
use crate::helpers::construction::*;
use crate::helpers::models::*;
use crate::models::problem::Problem;
use crate::solver::termination::MaxIterations;
use crate::solver::{Metrics, SearchContext, Telemetry, TelemetryMode};
use std::sync::Arc;

fn run_search(problem: &Arc<Problem>, solution: SolutionContext, iterations: usize) -> (SolutionContext, Metrics) {
    let mut telemetry = Telemetry::new(TelemetryMode::OnlyMetrics { track_every_iterations: 1 });
    let mut search_ctx = SearchContext::default();
    let mut engine = GuidedLocalSearch::new(problem.clone(), create_default_pipeline(), 0.1);

    let best = engine.optimize(solution, &mut search_ctx, &MaxIterations::new(iterations), &mut telemetry);
    let metrics = telemetry.get_metrics().expect("metrics are configured");

    (best, metrics)
}

#[test]
fn can_improve_suboptimal_solution() {
    let problem = create_square_problem();
    let solution = create_solution_with_routes(&problem, &[&[1, 3, 2]]);

    let (best, _) = run_search(&problem, solution, 10);

    assert_eq!(best.routes[0].route.tour.visits(), &[1, 2, 3]);
    assert_eq!(best.cost(), 4.);
}

#[test]
fn can_keep_incumbent_while_penalties_reshape_landscape() {
    let problem = create_square_problem();
    let solution = create_insertion_solution(&problem);
    assert_eq!(solution.cost(), 4.);

    let (best, metrics) = run_search(&problem, solution, 6);
    let progress = &metrics.progress;

    // the optimal tour has no improving move, so the first iteration penalizes all
    // four arcs; the next one applies a penalty driven move at zero raw delta
    assert_eq!(progress[0].penalized_arcs, 4);
    assert_eq!(progress[1].penalized_arcs, 4);
    assert_eq!(progress[2].penalized_arcs, 8);

    assert!(progress.iter().all(|snapshot| snapshot.best_cost == 4.));
    assert_eq!(best.cost(), 4.);
}

#[test]
fn can_return_input_solution_when_budget_is_zero() {
    let problem = create_delivery_problem();
    let solution = create_insertion_solution(&problem);
    let cost = solution.cost();

    let (best, metrics) = run_search(&problem, solution, 0);

    assert_eq!(best.cost(), cost);
    assert!(metrics.progress.is_empty());
}

#[test]
fn can_only_improve_incumbent_over_iterations() {
    let problem = create_delivery_problem();
    let solution = create_insertion_solution(&problem);
    let construction_cost = solution.cost();

    let (best, metrics) = run_search(&problem, solution, 50);

    assert!(best.cost() <= construction_cost + 1e-9);
    for window in metrics.progress.windows(2) {
        assert!(window[1].best_cost <= window[0].best_cost + 1e-9);
    }
    for snapshot in metrics.progress.iter() {
        assert!(snapshot.best_cost <= snapshot.cost + 1e-9);
        assert_eq!(snapshot.unassigned, 0);
    }
}

#[test]
fn can_search_deterministically() {
    let problem = create_delivery_problem();

    let visits = |solution: &SolutionContext| {
        solution.routes.iter().map(|route_ctx| route_ctx.route.tour.visits().to_vec()).collect::<Vec<_>>()
    };

    let (first, _) = run_search(&problem, create_insertion_solution(&problem), 40);
    let (second, _) = run_search(&problem, create_insertion_solution(&problem), 40);

    assert_eq!(visits(&first), visits(&second));
    assert_eq!(first.cost(), second.cost());
}

#[test]
fn can_count_penalized_arcs() {
    let mut penalties = ArcPenalties::default();

    assert_eq!(penalties.active(), 0);
    assert_eq!(penalties.get(1, 2), 0);

    penalties.penalize(1, 2);
    penalties.penalize(1, 2);
    penalties.penalize(2, 1);

    assert_eq!(penalties.get(1, 2), 2);
    assert_eq!(penalties.get(2, 1), 1);
    assert_eq!(penalties.get(2, 3), 0);
    assert_eq!(penalties.active(), 2);
}
