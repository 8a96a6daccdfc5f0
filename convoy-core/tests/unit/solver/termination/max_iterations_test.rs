use super::*;
use crate::solver::SearchContext;
use crate::solver::termination::Termination;

parameterized_test! {can_detect_termination, (iteration, limit, expected), {
    can_detect_termination_impl(iteration, limit, expected);
}}

can_detect_termination! {
    case_01: (11, 10, true),
    case_02: (9, 10, false),
    case_03: (10, 10, true),
}

fn can_detect_termination_impl(iteration: usize, limit: usize, expected: bool) {
    let search_ctx = SearchContext { iteration };

    assert_eq!(MaxIterations::new(limit).is_termination(&search_ctx), expected);
}

#[test]
fn can_estimate_progress() {
    let termination = MaxIterations::new(10);

    assert_eq!(termination.estimate(&SearchContext { iteration: 0 }), 0.);
    assert_eq!(termination.estimate(&SearchContext { iteration: 5 }), 0.5);
    assert_eq!(termination.estimate(&SearchContext { iteration: 20 }), 1.);
}
