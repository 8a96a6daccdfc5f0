//! This module reimports a common used types.

// Reimport problem model types
pub use crate::models::common::{Capacity, Cost, Demand, Distance, Duration, Location, TimeWindow, Timestamp};
pub use crate::models::problem::{Fleet, MatrixTransportCost, Node, Problem, TransportCost, Vehicle};
pub use crate::models::solution::{RoutePlan, Stop, UnassignmentReason, VehicleRoute};

// Reimport solver types
pub use crate::solver::{
    InfoLogger, Metrics, Snapshot, Solver, SolverBuilder, SolverError, Telemetry, TelemetryMode,
    create_default_info_logger,
};

// Reimport dimension machinery for custom feasibility rules
pub use crate::construction::dimensions::{Dimension, DimensionPipeline, DimensionViolation};

// Reimport utils
pub use crate::utils::compare_floats;
