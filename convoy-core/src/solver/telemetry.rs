//! A module which provides the logic to collect metrics about search execution and simple logging.

use crate::utils::Timer;
use std::ops::Deref;
use std::sync::Arc;

/// A logger type which is called with various information regarding the work done by the solver.
pub type InfoLogger = Arc<dyn Fn(&str)>;

/// Creates a default logger which writes messages to standard output.
pub fn create_default_info_logger() -> InfoLogger {
    Arc::new(|msg: &str| println!("{}", msg))
}

/// Encapsulates different measurements regarding solver execution.
pub struct Metrics {
    /// Solver duration in seconds.
    pub duration: usize,
    /// Total amount of search iterations.
    pub iterations: usize,
    /// Speed: iterations per second.
    pub speed: f64,
    /// Search progress.
    pub progress: Vec<Snapshot>,
}

/// Represents information about the search state at a specific iteration.
pub struct Snapshot {
    /// Iteration sequence number.
    pub number: usize,
    /// Time since the search started.
    pub timestamp: f64,
    /// Cost of the current solution.
    pub cost: f64,
    /// Cost of the incumbent solution.
    pub best_cost: f64,
    /// Total amount of non-empty routes in the current solution.
    pub routes: usize,
    /// Total amount of unassigned customers.
    pub unassigned: usize,
    /// Total amount of arcs with a non-zero penalty counter.
    pub penalized_arcs: usize,
    /// True if this iteration improved the incumbent.
    pub is_improvement: bool,
}

/// Specifies a telemetry mode.
pub enum TelemetryMode {
    /// No telemetry at all.
    None,
    /// Only logging.
    OnlyLogging {
        /// A logger type.
        logger: InfoLogger,
        /// Specifies how often iteration progress is logged.
        log_every_iterations: usize,
    },
    /// Only metrics collection.
    OnlyMetrics {
        /// Specifies how often a snapshot is tracked.
        track_every_iterations: usize,
    },
    /// Both logging and metrics collection.
    All {
        /// A logger type.
        logger: InfoLogger,
        /// Specifies how often iteration progress is logged.
        log_every_iterations: usize,
        /// Specifies how often a snapshot is tracked.
        track_every_iterations: usize,
    },
}

/// Provides way to collect metrics and write information into log.
pub struct Telemetry {
    metrics: Metrics,
    time: Timer,
    mode: TelemetryMode,
}

impl Telemetry {
    /// Creates a new instance of `Telemetry`.
    pub fn new(mode: TelemetryMode) -> Self {
        Self {
            time: Timer::start(),
            metrics: Metrics { duration: 0, iterations: 0, speed: 0.0, progress: vec![] },
            mode,
        }
    }

    /// Starts telemetry reporting.
    pub fn start(&mut self) {
        self.time = Timer::start();
    }

    /// Reports initial solution statistics.
    pub fn on_construction(&mut self, cost: f64, routes: usize, unassigned: usize, item_time: Timer) {
        match &self.mode {
            TelemetryMode::OnlyLogging { .. } | TelemetryMode::All { .. } => self.log(
                format!(
                    "[{}s] created initial solution, cost: {:.2}, routes: {}, unassigned: {} in {}ms",
                    self.time.elapsed_secs(),
                    cost,
                    routes,
                    unassigned,
                    item_time.elapsed_millis()
                )
                .as_str(),
            ),
            _ => {}
        };
    }

    /// Reports iteration statistics.
    #[allow(clippy::too_many_arguments)]
    pub fn on_iteration(
        &mut self,
        number: usize,
        cost: f64,
        best_cost: f64,
        routes: usize,
        unassigned: usize,
        penalized_arcs: usize,
        is_improvement: bool,
    ) {
        self.metrics.iterations = number + 1;

        let (log_every, track_every) = match &self.mode {
            TelemetryMode::None => return,
            TelemetryMode::OnlyLogging { log_every_iterations, .. } => (Some(*log_every_iterations), None),
            TelemetryMode::OnlyMetrics { track_every_iterations } => (None, Some(*track_every_iterations)),
            TelemetryMode::All { log_every_iterations, track_every_iterations, .. } => {
                (Some(*log_every_iterations), Some(*track_every_iterations))
            }
        };

        if is_improvement || number % log_every.unwrap_or(usize::MAX) == 0 {
            self.log(
                format!(
                    "[{}s] iteration {}, cost: {:.2} (best: {:.2}), routes: {}, unassigned: {}, penalized arcs: {}",
                    self.time.elapsed_secs(),
                    number,
                    cost,
                    best_cost,
                    routes,
                    unassigned,
                    penalized_arcs
                )
                .as_str(),
            );
        }

        if number % track_every.unwrap_or(usize::MAX) == 0 {
            self.metrics.progress.push(Snapshot {
                number,
                timestamp: self.time.elapsed_secs_as_f64(),
                cost,
                best_cost,
                routes,
                unassigned,
                penalized_arcs,
                is_improvement,
            });
        }
    }

    /// Reports final statistic.
    pub fn on_result(&mut self, best_cost: f64, routes: usize, unassigned: usize) {
        let elapsed = self.time.elapsed_secs() as usize;
        let speed = self.metrics.iterations as f64 / self.time.elapsed_secs_as_f64();

        self.log(
            format!(
                "[{}s] total iterations: {}, speed: {:.2} iterations/sec, best cost: {:.2}, routes: {}, unassigned: {}",
                elapsed, self.metrics.iterations, speed, best_cost, routes, unassigned
            )
            .as_str(),
        );

        self.metrics.duration = elapsed;
        self.metrics.speed = speed;
    }

    /// Gets metrics.
    pub fn get_metrics(self) -> Option<Metrics> {
        match &self.mode {
            TelemetryMode::OnlyMetrics { .. } | TelemetryMode::All { .. } => Some(self.metrics),
            _ => None,
        }
    }

    /// Writes log message.
    pub fn log(&self, message: &str) {
        match &self.mode {
            TelemetryMode::OnlyLogging { logger, .. } => logger.deref()(message),
            TelemetryMode::All { logger, .. } => logger.deref()(message),
            _ => {}
        }
    }
}
