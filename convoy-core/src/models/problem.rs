#[cfg(test)]
#[path = "../../tests/unit/models/problem_test.rs"]
mod problem_test;

use crate::models::common::{Capacity, Demand, Distance, Duration, Location, TimeWindow};
use crate::solver::SolverError;
use std::sync::Arc;

/// Represents a single node of the problem with its demand and service time window.
#[derive(Clone, Debug)]
pub struct Node {
    /// Amount of capacity consumed when the node is visited.
    pub demand: Demand,
    /// Time window in which the service has to start.
    pub time_window: TimeWindow,
}

impl Node {
    /// Creates a new [`Node`].
    pub fn new(demand: Demand, time_window: TimeWindow) -> Self {
        Self { demand, time_window }
    }
}

/// Represents a vehicle.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// Maximum total demand the vehicle can carry.
    pub capacity: Capacity,
}

/// Represents available vehicles. A vehicle is identified by its index in the fleet.
#[derive(Clone, Debug, Default)]
pub struct Fleet {
    /// All vehicles in index order.
    pub vehicles: Vec<Vehicle>,
}

impl Fleet {
    /// Creates a new fleet from given vehicle capacities.
    pub fn new(capacities: &[Capacity]) -> Self {
        Self { vehicles: capacities.iter().map(|&capacity| Vehicle { capacity }).collect() }
    }

    /// Returns amount of vehicles.
    pub fn size(&self) -> usize {
        self.vehicles.len()
    }
}

/// Provides the way to get routing information for specific locations.
pub trait TransportCost: Send + Sync {
    /// Returns transport time between two locations.
    fn duration(&self, from: Location, to: Location) -> Duration;

    /// Returns transport distance between two locations.
    fn distance(&self, from: Location, to: Location) -> Distance;

    /// Returns amount of known locations.
    fn size(&self) -> usize;
}

/// Uses custom distance and duration matrices as source of transport cost information.
/// Not time aware.
pub struct MatrixTransportCost {
    distances: Vec<Distance>,
    durations: Vec<Duration>,
    size: usize,
}

impl MatrixTransportCost {
    /// Creates a new [`MatrixTransportCost`] from square row-major matrices of equal size.
    pub fn new(distances: Vec<Vec<Distance>>, durations: Vec<Vec<Duration>>) -> Result<Self, SolverError> {
        let size = distances.len();

        if durations.len() != size || distances.iter().chain(durations.iter()).any(|row| row.len() != size) {
            return Err(SolverError::InvalidInstance(
                "distance and duration matrices must be square and of equal size".to_string(),
            ));
        }

        Ok(Self {
            distances: distances.into_iter().flatten().collect(),
            durations: durations.into_iter().flatten().collect(),
            size,
        })
    }
}

impl TransportCost for MatrixTransportCost {
    fn duration(&self, from: Location, to: Location) -> Duration {
        self.durations[from * self.size + to]
    }

    fn distance(&self, from: Location, to: Location) -> Distance {
        self.distances[from * self.size + to]
    }

    fn size(&self) -> usize {
        self.size
    }
}

/// Defines a routing problem instance: nodes to serve, a fleet to serve them with,
/// transport costs between locations and route level limits.
pub struct Problem {
    /// All nodes, including the depot.
    pub nodes: Vec<Node>,
    /// Available vehicles.
    pub fleet: Fleet,
    /// Transport costs between nodes.
    pub transport: Arc<dyn TransportCost>,
    /// Index of the depot node.
    pub depot: Location,
    /// Maximum duration of any route.
    pub max_route_duration: Duration,
    /// Maximum waiting time allowed at a single node.
    pub waiting_allowance: Duration,
}

impl Problem {
    /// Creates a new problem instance performing full validation of its data.
    pub fn new(
        nodes: Vec<Node>,
        fleet: Fleet,
        transport: Arc<dyn TransportCost>,
        depot: Location,
        max_route_duration: Duration,
        waiting_allowance: Duration,
    ) -> Result<Self, SolverError> {
        let problem = Self { nodes, fleet, transport, depot, max_route_duration, waiting_allowance };
        problem.validate()?;

        Ok(problem)
    }

    /// Returns amount of nodes including the depot.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Checks whether given location is the depot.
    pub fn is_depot(&self, location: Location) -> bool {
        location == self.depot
    }

    /// Returns indices of all customer (non-depot) nodes.
    pub fn customers(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.nodes.len()).filter(move |&location| !self.is_depot(location))
    }

    fn validate(&self) -> Result<(), SolverError> {
        let invalid = |message: String| Err(SolverError::InvalidInstance(message));

        if self.depot >= self.nodes.len() {
            return invalid(format!("depot index {} is out of range for {} nodes", self.depot, self.nodes.len()));
        }

        if self.transport.size() != self.nodes.len() {
            return invalid(format!(
                "cost matrix size {} does not match node count {}",
                self.transport.size(),
                self.nodes.len()
            ));
        }

        if !self.max_route_duration.is_finite() || self.max_route_duration <= 0. {
            return invalid(format!("max route duration must be positive, got {}", self.max_route_duration));
        }

        if !self.waiting_allowance.is_finite() || self.waiting_allowance < 0. {
            return invalid(format!("waiting allowance must be non-negative, got {}", self.waiting_allowance));
        }

        if self.nodes[self.depot].demand != 0 {
            return invalid(format!("depot node must have zero demand, got {}", self.nodes[self.depot].demand));
        }

        if let Some((index, vehicle)) = self.fleet.vehicles.iter().enumerate().find(|(_, v)| v.capacity <= 0) {
            return invalid(format!("vehicle {} has non-positive capacity {}", index, vehicle.capacity));
        }

        for (location, node) in self.nodes.iter().enumerate() {
            let tw = &node.time_window;

            if !tw.start.is_finite() || !tw.end.is_finite() || tw.start > tw.end {
                return invalid(format!("node {} has an invalid time window [{}, {}]", location, tw.start, tw.end));
            }

            if tw.start < 0. || tw.end > self.max_route_duration {
                return invalid(format!(
                    "node {} time window [{}, {}] exceeds the route duration limit {}",
                    location, tw.start, tw.end, self.max_route_duration
                ));
            }

            if self.is_depot(location) {
                continue;
            }

            if node.demand < 0 {
                return invalid(format!("node {} has negative demand {}", location, node.demand));
            }

            if self.transport.duration(self.depot, location) > tw.end {
                return invalid(format!("node {} cannot be reached before its time window ends", location));
            }
        }

        for from in 0..self.nodes.len() {
            for to in 0..self.nodes.len() {
                if from == to {
                    continue;
                }

                let distance = self.transport.distance(from, to);
                let duration = self.transport.duration(from, to);

                if !distance.is_finite() || distance < 0. || !duration.is_finite() || duration < 0. {
                    return invalid(format!("arc ({}, {}) has a negative or non-finite cost", from, to));
                }
            }
        }

        Ok(())
    }
}
