use super::*;
use crate::helpers::construction::*;
use crate::helpers::models::*;
use crate::models::common::{Location, TimeWindow};
use crate::models::problem::Problem;
use crate::solver::search::ArcPenalties;
use rustc_hash::FxHashSet;
use std::sync::Arc;

fn create_two_route_problem() -> Arc<Problem> {
    let coordinates = [(0., 0.), (1., 0.), (2., 0.), (3., 0.), (0., 1.), (0., 2.), (0., 3.)];

    create_problem_with_defaults(&[1; 6], &[20, 20], euclidean_matrices(&coordinates))
}

fn assert_move_delta(problem: &Problem, candidate: Move, expected: &[&[Location]]) {
    let pipeline = create_default_pipeline();
    let penalties = ArcPenalties::default();
    let mut solution = create_solution_with_routes(problem, &[&[1, 2, 3], &[4, 5, 6]]);

    let scored = score_move(problem, &pipeline, &penalties, 0., &solution, candidate).expect("feasible move");

    let cost_before = solution.cost();
    apply_move(&mut solution, candidate);
    let (first, second) = candidate.routes();
    pipeline.accept_route_state(problem, &mut solution.routes[first]);
    if let Some(second) = second {
        pipeline.accept_route_state(problem, &mut solution.routes[second]);
    }

    let actual: Vec<&[Location]> = solution.routes.iter().map(|route_ctx| route_ctx.route.tour.visits()).collect();
    assert_eq!(actual, expected);
    assert!((solution.cost() - cost_before - scored.raw_delta).abs() < 1e-9);
    assert_eq!(scored.raw_delta, scored.augmented_delta);
}

parameterized_test! {can_apply_move_and_predict_its_delta, (candidate, expected), {
    can_apply_move_and_predict_its_delta_impl(candidate, &expected);
}}

can_apply_move_and_predict_its_delta! {
    case_01_relocate_within_route: (
        Move::Relocate { from_route: 0, from_index: 0, to_route: 0, to_index: 1 },
        vec![vec![2, 1, 3], vec![4, 5, 6]],
    ),
    case_02_relocate_across_routes: (
        Move::Relocate { from_route: 0, from_index: 2, to_route: 1, to_index: 0 },
        vec![vec![1, 2], vec![3, 4, 5, 6]],
    ),
    case_03_swap_within_route: (
        Move::Swap { first_route: 0, first_index: 0, second_route: 0, second_index: 2 },
        vec![vec![3, 2, 1], vec![4, 5, 6]],
    ),
    case_04_swap_across_routes: (
        Move::Swap { first_route: 0, first_index: 1, second_route: 1, second_index: 1 },
        vec![vec![1, 5, 3], vec![4, 2, 6]],
    ),
    case_05_two_opt: (
        Move::TwoOpt { route: 0, start: 0, end: 2 },
        vec![vec![3, 2, 1], vec![4, 5, 6]],
    ),
    case_06_or_opt_within_route: (
        Move::OrOpt { from_route: 0, start: 0, len: 2, to_route: 0, to_index: 1 },
        vec![vec![3, 1, 2], vec![4, 5, 6]],
    ),
    case_07_or_opt_across_routes: (
        Move::OrOpt { from_route: 0, start: 1, len: 2, to_route: 1, to_index: 3 },
        vec![vec![1], vec![4, 5, 6, 2, 3]],
    ),
}

fn can_apply_move_and_predict_its_delta_impl(candidate: Move, expected: &[Vec<Location>]) {
    let problem = create_two_route_problem();
    let expected: Vec<&[Location]> = expected.iter().map(|visits| visits.as_slice()).collect();

    assert_move_delta(&problem, candidate, &expected);
}

#[test]
fn can_reject_move_which_breaks_capacity() {
    let problem = create_problem_with_defaults(&[6, 6], &[10, 10], euclidean_matrices(&[(0., 0.), (1., 0.), (2., 0.)]));
    let pipeline = create_default_pipeline();
    let penalties = ArcPenalties::default();
    let solution = create_solution_with_routes(&problem, &[&[1], &[2]]);

    let candidate = Move::Relocate { from_route: 0, from_index: 0, to_route: 1, to_index: 0 };

    assert!(score_move(&problem, &pipeline, &penalties, 0., &solution, candidate).is_none());
}

#[test]
fn can_reject_move_which_breaks_time_windows() {
    let nodes = vec![
        test_node(0, TimeWindow::new(0., 1000.)),
        test_node(1, TimeWindow::new(15., 100.)),
        test_node(1, TimeWindow::new(0., 22.)),
    ];
    let coordinates = [(0., 0.), (10., 0.), (20., 0.)];
    let problem = create_problem(nodes, &[10], manhattan_matrices(&coordinates), 1000., 5.);
    let pipeline = create_default_pipeline();
    let penalties = ArcPenalties::default();
    let solution = create_solution_with_routes(&problem, &[&[2, 1]]);

    let candidate = Move::Swap { first_route: 0, first_index: 0, second_route: 0, second_index: 1 };

    assert!(score_move(&problem, &pipeline, &penalties, 0., &solution, candidate).is_none());
}

#[test]
fn can_score_move_against_penalized_arcs() {
    let problem = create_problem_with_defaults(&[1, 1], &[10], euclidean_matrices(&[(0., 0.), (1., 0.), (2., 0.)]));
    let pipeline = create_default_pipeline();
    let mut penalties = ArcPenalties::default();
    penalties.penalize(0, 1);
    let solution = create_solution_with_routes(&problem, &[&[1, 2]]);

    let candidate = Move::TwoOpt { route: 0, start: 0, end: 1 };
    let scored = score_move(&problem, &pipeline, &penalties, 2., &solution, candidate).expect("feasible move");

    assert_eq!(scored.augmented_delta, scored.raw_delta - 2.);
}

#[test]
fn can_generate_all_moves_without_duplicates() {
    let problem = create_problem_with_defaults(&[1, 1, 1], &[10, 10], euclidean_matrices(&[(0., 0.), (1., 0.), (2., 0.), (3., 0.)]));
    let solution = create_solution_with_routes(&problem, &[&[1, 2], &[3]]);

    let moves = generate_moves(&solution);

    assert_eq!(moves.len(), 15);
    assert_eq!(moves.iter().map(|candidate| format!("{:?}", candidate)).collect::<FxHashSet<_>>().len(), 15);
    assert_eq!(moves[0], Move::Relocate { from_route: 0, from_index: 0, to_route: 0, to_index: 1 });
}

#[test]
fn can_order_scored_moves_deterministically() {
    let relocate = Move::Relocate { from_route: 0, from_index: 0, to_route: 0, to_index: 1 };
    let two_opt = Move::TwoOpt { route: 0, start: 0, end: 1 };

    let better_delta = ScoredMove { candidate: two_opt, raw_delta: -2., augmented_delta: -2. };
    let worse_delta = ScoredMove { candidate: relocate, raw_delta: -1., augmented_delta: -1. };
    assert_eq!(better_delta.better(worse_delta).candidate, two_opt);
    assert_eq!(worse_delta.better(better_delta).candidate, two_opt);

    let tied_relocate = ScoredMove { candidate: relocate, raw_delta: -1., augmented_delta: -1. };
    let tied_two_opt = ScoredMove { candidate: two_opt, raw_delta: -1., augmented_delta: -1. };
    assert_eq!(tied_relocate.better(tied_two_opt).candidate, relocate);
    assert_eq!(tied_two_opt.better(tied_relocate).candidate, relocate);
}
