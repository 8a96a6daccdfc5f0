//! The solver module contains the public facade which wires construction, search and
//! termination together: a solution is built by cheapest insertion, improved by the
//! guided local search until the budget runs out and returned as a route plan.

#[cfg(test)]
#[path = "../../tests/unit/solver/solver_test.rs"]
mod solver_test;

use crate::construction::dimensions::{CapacityDimension, Dimension, DimensionPipeline, TimeDimension};
use crate::construction::insertion::CheapestInsertion;
use crate::models::problem::Problem;
use crate::models::solution::RoutePlan;
use crate::solver::search::GuidedLocalSearch;
use crate::solver::termination::{CompositeTermination, Interruption, MaxIterations, MaxTime, Termination};
use crate::utils::Timer;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub mod search;
pub mod termination;

mod extraction;
pub use self::extraction::extract_route_plan;

mod telemetry;
pub use self::telemetry::{InfoLogger, Metrics, Snapshot, Telemetry, TelemetryMode, create_default_info_logger};

/// An error returned by the solver API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolverError {
    /// The instance definition breaks a structural rule, e.g. a non-square matrix or an
    /// inverted time window. The message names the first rule found broken.
    InvalidInstance(String),
    /// Not a single customer can be assigned to any vehicle.
    NoFeasibleSolution,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::InvalidInstance(message) => write!(f, "invalid instance: {}", message),
            SolverError::NoFeasibleSolution => write!(f, "no feasible solution exists"),
        }
    }
}

impl std::error::Error for SolverError {}

/// Keeps track of the search state shared with termination criteria.
#[derive(Clone, Debug, Default)]
pub struct SearchContext {
    /// Amount of search iterations completed so far.
    pub iteration: usize,
}

/// Provides configurable way to build solver.
pub struct SolverBuilder {
    problem: Arc<Problem>,
    max_time: Option<f64>,
    max_iterations: Option<usize>,
    interruption: Option<Arc<AtomicBool>>,
    gls_coefficient: f64,
    telemetry: Option<Telemetry>,
    dimensions: Vec<Arc<dyn Dimension>>,
}

impl SolverBuilder {
    /// Creates a new instance of `SolverBuilder` for the given problem.
    pub fn new(problem: Arc<Problem>) -> Self {
        Self {
            problem,
            max_time: Some(10.),
            max_iterations: None,
            interruption: None,
            gls_coefficient: 0.1,
            telemetry: None,
            dimensions: vec![],
        }
    }

    /// Sets max running time limit in seconds.
    /// Default is 10 seconds.
    pub fn with_max_time(mut self, limit: Option<f64>) -> Self {
        self.max_time = limit;
        self
    }

    /// Sets max search iterations to be run.
    /// Default is None.
    pub fn with_max_iterations(mut self, limit: Option<usize>) -> Self {
        self.max_iterations = limit;
        self
    }

    /// Sets an external interruption signal which is checked between iterations.
    pub fn with_interruption(mut self, signal: Arc<AtomicBool>) -> Self {
        self.interruption = Some(signal);
        self
    }

    /// Sets the coefficient which scales arc penalties in the augmented objective.
    /// Default is 0.1.
    pub fn with_gls_coefficient(mut self, coefficient: f64) -> Self {
        self.gls_coefficient = coefficient;
        self
    }

    /// Sets telemetry. Default telemetry is off.
    pub fn with_telemetry(mut self, telemetry: Telemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Adds a custom dimension checked on top of capacity and time.
    pub fn with_dimension(mut self, dimension: Arc<dyn Dimension>) -> Self {
        self.dimensions.push(dimension);
        self
    }

    /// Builds solver with parameters specified.
    pub fn build(self) -> Solver {
        let telemetry = self.telemetry.unwrap_or_else(|| Telemetry::new(TelemetryMode::None));

        let mut pipeline = DimensionPipeline::new();
        pipeline.add_dimension(Arc::new(CapacityDimension)).add_dimension(Arc::new(TimeDimension));
        for dimension in self.dimensions {
            pipeline.add_dimension(dimension);
        }

        let mut criterias: Vec<Box<dyn Termination + Send + Sync>> = vec![];

        if let Some(limit) = self.max_time {
            telemetry.log(format!("configured to use max-time {}s", limit).as_str());
            criterias.push(Box::new(MaxTime::new(limit)));
        }

        if let Some(limit) = self.max_iterations {
            telemetry.log(format!("configured to use max-iterations {}", limit).as_str());
            criterias.push(Box::new(MaxIterations::new(limit)));
        }

        if let Some(signal) = self.interruption {
            criterias.push(Box::new(Interruption::new(signal)));
        }

        if criterias.is_empty() {
            telemetry.log("configured to use default max-time (10secs)");
            criterias.push(Box::new(MaxTime::new(10.)));
        }

        Solver {
            problem: self.problem,
            pipeline: Arc::new(pipeline),
            termination: Box::new(CompositeTermination::new(criterias)),
            telemetry,
            gls_coefficient: self.gls_coefficient,
        }
    }
}

/// A solver which builds an initial solution by cheapest insertion and refines it with a
/// guided local search. The best solution found within the budget is returned, so a longer
/// budget can only improve the result.
pub struct Solver {
    problem: Arc<Problem>,
    pipeline: Arc<DimensionPipeline>,
    termination: Box<dyn Termination + Send + Sync>,
    telemetry: Telemetry,
    gls_coefficient: f64,
}

impl Solver {
    /// Solves the problem and returns the best route plan found together with telemetry
    /// metrics when their collection was configured.
    pub fn solve(mut self) -> Result<(RoutePlan, Option<Metrics>), SolverError> {
        self.telemetry.start();

        let construction_time = Timer::start();
        let solution = CheapestInsertion::new(self.pipeline.clone()).run(&self.problem);
        self.telemetry.on_construction(
            solution.cost(),
            solution.active_routes(),
            solution.unassigned.len(),
            construction_time,
        );

        let customers = self.problem.customers().count();
        if customers > 0 && solution.unassigned.len() == customers {
            return Err(SolverError::NoFeasibleSolution);
        }

        let mut search_ctx = SearchContext::default();
        let mut engine = GuidedLocalSearch::new(self.problem.clone(), self.pipeline.clone(), self.gls_coefficient);
        let best = engine.optimize(solution, &mut search_ctx, self.termination.as_ref(), &mut self.telemetry);

        self.telemetry.on_result(best.cost(), best.active_routes(), best.unassigned.len());

        Ok((extract_route_plan(&self.problem, &best), self.telemetry.get_metrics()))
    }
}
