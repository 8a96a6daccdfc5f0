#[cfg(test)]
#[path = "../../../tests/unit/solver/search/moves_test.rs"]
mod moves_test;

use crate::construction::context::SolutionContext;
use crate::construction::dimensions::DimensionPipeline;
use crate::models::common::{Cost, Location};
use crate::models::problem::Problem;
use crate::models::solution::route_arcs;
use crate::solver::search::ArcPenalties;
use std::cmp::Ordering;
use tinyvec::TinyVec;

/// A scratch buffer for candidate visit sequences which stays on the stack for
/// short routes.
type VisitBuffer = TinyVec<[Location; 16]>;

/// A structural change of one or two routes, the unit of the local search.
///
/// Moves never change the set of assigned customers. Indices follow the tour
/// position convention; for moves within a single route the target index is
/// interpreted after the moved part has been taken out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    /// Moves a single visit to another position, possibly in another route.
    Relocate { from_route: usize, from_index: usize, to_route: usize, to_index: usize },
    /// Exchanges two visits between their positions.
    Swap { first_route: usize, first_index: usize, second_route: usize, second_index: usize },
    /// Reverses a contiguous segment of visits within one route.
    TwoOpt { route: usize, start: usize, end: usize },
    /// Moves a contiguous segment of visits to another position keeping its order.
    OrOpt { from_route: usize, start: usize, len: usize, to_route: usize, to_index: usize },
}

impl Move {
    /// Returns the catalogue ordinal of the move kind.
    pub fn ordinal(&self) -> usize {
        match self {
            Move::Relocate { .. } => 0,
            Move::Swap { .. } => 1,
            Move::TwoOpt { .. } => 2,
            Move::OrOpt { .. } => 3,
        }
    }

    /// Returns indices of the routes the move touches. The second index is `None`
    /// when the move stays within a single route.
    pub fn routes(&self) -> (usize, Option<usize>) {
        let (first, second) = match *self {
            Move::Relocate { from_route, to_route, .. } => (from_route, to_route),
            Move::Swap { first_route, second_route, .. } => (first_route, second_route),
            Move::TwoOpt { route, .. } => (route, route),
            Move::OrOpt { from_route, to_route, .. } => (from_route, to_route),
        };

        (first, (second != first).then_some(second))
    }

    fn key(&self) -> (usize, usize, usize, usize, usize, usize) {
        match *self {
            Move::Relocate { from_route, from_index, to_route, to_index } => {
                (0, from_route, from_index, 0, to_route, to_index)
            }
            Move::Swap { first_route, first_index, second_route, second_index } => {
                (1, first_route, first_index, 0, second_route, second_index)
            }
            Move::TwoOpt { route, start, end } => (2, route, start, 0, end, 0),
            Move::OrOpt { from_route, start, len, to_route, to_index } => (3, from_route, start, len, to_route, to_index),
        }
    }
}

/// A candidate move scored against the current solution.
#[derive(Clone, Copy, Debug)]
pub struct ScoredMove {
    /// The scored candidate.
    pub candidate: Move,
    /// True cost delta of the move.
    pub raw_delta: Cost,
    /// Cost delta of the move in the penalty augmented objective.
    pub augmented_delta: Cost,
}

impl ScoredMove {
    /// Returns the better of two scored moves under a deterministic total order:
    /// the lower augmented delta wins, ties resolve by move kind ordinal and indices.
    pub fn better(self, other: ScoredMove) -> ScoredMove {
        let ordering = self
            .augmented_delta
            .total_cmp(&other.augmented_delta)
            .then_with(|| self.candidate.key().cmp(&other.candidate.key()));

        match ordering {
            Ordering::Greater => other,
            _ => self,
        }
    }
}

/// Enumerates all candidate moves around the current solution in a fixed order:
/// relocate, swap, two-opt, or-opt, each by ascending route and position indices.
pub fn generate_moves(solution: &SolutionContext) -> Vec<Move> {
    let mut moves = Vec::new();
    let tour_len = |route: usize| solution.routes[route].route.tour.len();
    let route_count = solution.routes.len();

    for from_route in 0..route_count {
        for from_index in 0..tour_len(from_route) {
            for to_route in 0..route_count {
                if to_route == from_route {
                    for to_index in (0..tour_len(from_route)).filter(|&to_index| to_index != from_index) {
                        moves.push(Move::Relocate { from_route, from_index, to_route, to_index });
                    }
                } else {
                    for to_index in 0..=tour_len(to_route) {
                        moves.push(Move::Relocate { from_route, from_index, to_route, to_index });
                    }
                }
            }
        }
    }

    for first_route in 0..route_count {
        for first_index in 0..tour_len(first_route) {
            for second_route in first_route..route_count {
                let from = if second_route == first_route { first_index + 1 } else { 0 };
                for second_index in from..tour_len(second_route) {
                    moves.push(Move::Swap { first_route, first_index, second_route, second_index });
                }
            }
        }
    }

    for route in 0..route_count {
        for start in 0..tour_len(route) {
            for end in start + 1..tour_len(route) {
                moves.push(Move::TwoOpt { route, start, end });
            }
        }
    }

    for from_route in 0..route_count {
        let from_len = tour_len(from_route);
        for len in 2..=from_len.min(3) {
            for start in 0..=from_len - len {
                for to_route in 0..route_count {
                    if to_route == from_route {
                        for to_index in (0..=from_len - len).filter(|&to_index| to_index != start) {
                            moves.push(Move::OrOpt { from_route, start, len, to_route, to_index });
                        }
                    } else {
                        for to_index in 0..=tour_len(to_route) {
                            moves.push(Move::OrOpt { from_route, start, len, to_route, to_index });
                        }
                    }
                }
            }
        }
    }

    moves
}

/// Scores the move against the current solution returning `None` when the changed
/// routes are infeasible in any dimension.
pub fn score_move(
    problem: &Problem,
    pipeline: &DimensionPipeline,
    penalties: &ArcPenalties,
    lambda: f64,
    solution: &SolutionContext,
    candidate: Move,
) -> Option<ScoredMove> {
    let (first, first_visits, second) = affected_sequences(solution, candidate);

    pipeline.evaluate(problem, solution.routes[first].route.vehicle, &first_visits).ok()?;
    if let Some((route, visits)) = &second {
        pipeline.evaluate(problem, solution.routes[*route].route.vehicle, visits).ok()?;
    }

    let cost_of = |visits: &[Location]| -> Cost {
        route_arcs(problem.depot, visits).map(|(from, to)| problem.transport.distance(from, to)).sum()
    };
    let penalty_of = |visits: &[Location]| -> f64 {
        route_arcs(problem.depot, visits).map(|(from, to)| penalties.get(from, to) as f64).sum()
    };

    let old_first = solution.routes[first].route.tour.visits();
    let mut raw_delta = cost_of(&first_visits) - solution.routes[first].state.total_distance();
    let mut penalty_delta = penalty_of(&first_visits) - penalty_of(old_first);

    if let Some((route, visits)) = &second {
        let old_second = solution.routes[*route].route.tour.visits();
        raw_delta += cost_of(visits) - solution.routes[*route].state.total_distance();
        penalty_delta += penalty_of(visits) - penalty_of(old_second);
    }

    Some(ScoredMove { candidate, raw_delta, augmented_delta: raw_delta + lambda * penalty_delta })
}

/// Applies the move to the solution tours. Cached route states become stale and
/// have to be refreshed by the caller.
pub fn apply_move(solution: &mut SolutionContext, candidate: Move) {
    match candidate {
        Move::Relocate { from_route, from_index, to_route, to_index } => {
            let visit = solution.routes[from_route].route.tour.remove_at(from_index);
            solution.routes[to_route].route.tour.insert_at(visit, to_index);
        }
        Move::Swap { first_route, first_index, second_route, second_index } => {
            let first = solution.routes[first_route].route.tour.visits()[first_index];
            let second = solution.routes[second_route].route.tour.visits()[second_index];
            solution.routes[first_route].route.tour.replace_at(second, first_index);
            solution.routes[second_route].route.tour.replace_at(first, second_index);
        }
        Move::TwoOpt { route, start, end } => {
            solution.routes[route].route.tour.reverse_segment(start, end);
        }
        Move::OrOpt { from_route, start, len, to_route, to_index } => {
            let segment: TinyVec<[Location; 4]> =
                (0..len).map(|_| solution.routes[from_route].route.tour.remove_at(start)).collect();

            for (offset, visit) in segment.into_iter().enumerate() {
                solution.routes[to_route].route.tour.insert_at(visit, to_index + offset);
            }
        }
    }
}

/// Builds the new visit sequences of the routes affected by the move.
fn affected_sequences(solution: &SolutionContext, candidate: Move) -> (usize, VisitBuffer, Option<(usize, VisitBuffer)>) {
    let visits_of = |route: usize| solution.routes[route].route.tour.visits();

    match candidate {
        Move::Relocate { from_route, from_index, to_route, to_index } if from_route == to_route => {
            let mut buffer: VisitBuffer = visits_of(from_route).iter().copied().collect();
            let visit = buffer.remove(from_index);
            buffer.insert(to_index, visit);

            (from_route, buffer, None)
        }
        Move::Relocate { from_route, from_index, to_route, to_index } => {
            let mut from_buffer: VisitBuffer = visits_of(from_route).iter().copied().collect();
            let visit = from_buffer.remove(from_index);

            let mut to_buffer: VisitBuffer = visits_of(to_route).iter().copied().collect();
            to_buffer.insert(to_index, visit);

            (from_route, from_buffer, Some((to_route, to_buffer)))
        }
        Move::Swap { first_route, first_index, second_route, second_index } if first_route == second_route => {
            let mut buffer: VisitBuffer = visits_of(first_route).iter().copied().collect();
            buffer.swap(first_index, second_index);

            (first_route, buffer, None)
        }
        Move::Swap { first_route, first_index, second_route, second_index } => {
            let mut first_buffer: VisitBuffer = visits_of(first_route).iter().copied().collect();
            let mut second_buffer: VisitBuffer = visits_of(second_route).iter().copied().collect();

            let first = std::mem::replace(&mut first_buffer[first_index], second_buffer[second_index]);
            second_buffer[second_index] = first;

            (first_route, first_buffer, Some((second_route, second_buffer)))
        }
        Move::TwoOpt { route, start, end } => {
            let mut buffer: VisitBuffer = visits_of(route).iter().copied().collect();
            buffer[start..=end].reverse();

            (route, buffer, None)
        }
        Move::OrOpt { from_route, start, len, to_route, to_index } if from_route == to_route => {
            let visits = visits_of(from_route);
            let mut reduced: VisitBuffer = VisitBuffer::new();
            reduced.extend(visits[..start].iter().copied());
            reduced.extend(visits[start + len..].iter().copied());

            let mut buffer: VisitBuffer = VisitBuffer::new();
            buffer.extend(reduced[..to_index].iter().copied());
            buffer.extend(visits[start..start + len].iter().copied());
            buffer.extend(reduced[to_index..].iter().copied());

            (from_route, buffer, None)
        }
        Move::OrOpt { from_route, start, len, to_route, to_index } => {
            let visits = visits_of(from_route);
            let mut from_buffer: VisitBuffer = VisitBuffer::new();
            from_buffer.extend(visits[..start].iter().copied());
            from_buffer.extend(visits[start + len..].iter().copied());

            let target = visits_of(to_route);
            let mut to_buffer: VisitBuffer = VisitBuffer::new();
            to_buffer.extend(target[..to_index].iter().copied());
            to_buffer.extend(visits[start..start + len].iter().copied());
            to_buffer.extend(target[to_index..].iter().copied());

            (from_route, from_buffer, Some((to_route, to_buffer)))
        }
    }
}
