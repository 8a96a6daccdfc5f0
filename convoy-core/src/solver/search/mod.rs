//! The search module contains the guided local search engine and its move catalogue.

#[cfg(test)]
#[path = "../../../tests/unit/solver/search/search_test.rs"]
mod search_test;

mod moves;
pub use self::moves::{Move, ScoredMove, apply_move, generate_moves, score_move};

use crate::construction::context::SolutionContext;
use crate::construction::dimensions::DimensionPipeline;
use crate::models::common::Location;
use crate::models::problem::Problem;
use crate::models::solution::route_arcs;
use crate::solver::termination::Termination;
use crate::solver::{SearchContext, Telemetry};
use crate::utils::{COST_EPSILON, map_reduce};
use nohash_hasher::IntMap;
use std::sync::Arc;

/// Keeps penalty counters of directed arcs accumulated by the guided local search.
#[derive(Clone, Debug, Default)]
pub struct ArcPenalties {
    counters: IntMap<u64, u32>,
}

impl ArcPenalties {
    /// Returns the penalty counter of the arc.
    pub fn get(&self, from: Location, to: Location) -> u32 {
        self.counters.get(&arc_key(from, to)).copied().unwrap_or(0)
    }

    /// Increments the penalty counter of the arc.
    pub fn penalize(&mut self, from: Location, to: Location) {
        *self.counters.entry(arc_key(from, to)).or_insert(0) += 1;
    }

    /// Returns amount of arcs with a non-zero penalty counter.
    pub fn active(&self) -> usize {
        self.counters.len()
    }
}

fn arc_key(from: Location, to: Location) -> u64 {
    ((from as u64) << 32) | to as u64
}

/// Improves a solution by a local search over the move catalogue guided by arc
/// penalties: whenever no move improves the penalty augmented objective, the
/// highest utility arcs of the current solution get penalized which reshapes the
/// landscape and lets the search continue past the local optimum. The best
/// solution by true cost is kept as the incumbent.
pub struct GuidedLocalSearch {
    problem: Arc<Problem>,
    pipeline: Arc<DimensionPipeline>,
    coefficient: f64,
    penalties: ArcPenalties,
    lambda: f64,
}

impl GuidedLocalSearch {
    /// Creates a new instance of [`GuidedLocalSearch`] with zero initial penalties.
    pub fn new(problem: Arc<Problem>, pipeline: Arc<DimensionPipeline>, coefficient: f64) -> Self {
        Self { problem, pipeline, coefficient, penalties: ArcPenalties::default(), lambda: 0. }
    }

    /// Runs search iterations until the termination criteria signals to stop and
    /// returns the incumbent solution.
    pub fn optimize(
        &mut self,
        solution: SolutionContext,
        search_ctx: &mut SearchContext,
        termination: &dyn Termination,
        telemetry: &mut Telemetry,
    ) -> SolutionContext {
        let mut current = solution;
        let mut incumbent = current.clone();
        let mut incumbent_cost = incumbent.cost();

        while !termination.is_termination(search_ctx) {
            let moves = generate_moves(&current);
            let best = map_reduce(
                &moves,
                |candidate| score_move(&self.problem, &self.pipeline, &self.penalties, self.lambda, &current, *candidate),
                || None,
                |left, right| match (left, right) {
                    (Some(left), Some(right)) => Some(left.better(right)),
                    (left, right) => left.or(right),
                },
            );

            let mut is_improvement = false;
            match best {
                Some(scored) if scored.augmented_delta < -COST_EPSILON => {
                    let (first, second) = scored.candidate.routes();
                    apply_move(&mut current, scored.candidate);

                    self.pipeline.accept_route_state(&self.problem, &mut current.routes[first]);
                    if let Some(second) = second {
                        self.pipeline.accept_route_state(&self.problem, &mut current.routes[second]);
                    }

                    let cost = current.cost();
                    if cost < incumbent_cost - COST_EPSILON {
                        incumbent = current.clone();
                        incumbent_cost = cost;
                        is_improvement = true;
                    }
                }
                _ => self.penalize_arcs(&current),
            }

            telemetry.on_iteration(
                search_ctx.iteration,
                current.cost(),
                incumbent_cost,
                current.active_routes(),
                current.unassigned.len(),
                self.penalties.active(),
                is_improvement,
            );
            search_ctx.iteration += 1;
        }

        incumbent
    }

    /// Penalizes all arcs of the current solution with the maximum utility, where
    /// utility of an arc is its cost discounted by the penalties already paid.
    fn penalize_arcs(&mut self, current: &SolutionContext) {
        let arcs: Vec<(Location, Location)> = current
            .routes
            .iter()
            .flat_map(|route_ctx| route_arcs(self.problem.depot, route_ctx.route.tour.visits()))
            .collect();

        if arcs.is_empty() {
            return;
        }

        let utilities: Vec<f64> = arcs
            .iter()
            .map(|&(from, to)| {
                self.problem.transport.distance(from, to) / (1. + self.penalties.get(from, to) as f64)
            })
            .collect();
        let max_utility = utilities.iter().copied().fold(f64::MIN, f64::max);

        arcs.iter()
            .zip(utilities.iter())
            .filter(|&(_, &utility)| utility >= max_utility - COST_EPSILON)
            .for_each(|(&(from, to), _)| self.penalties.penalize(from, to));

        self.lambda = self.coefficient * current.cost() / arcs.len() as f64;
    }
}
