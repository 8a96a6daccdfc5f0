#[cfg(test)]
#[path = "../../tests/unit/models/solution_test.rs"]
mod solution_test;

use crate::models::common::{Cost, Demand, Distance, Location, Timestamp};
use std::iter::once;

/// Represents a sequence of customer visits of a single route. The depot is implicit
/// at both ends of the sequence and is never stored as a visit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tour {
    visits: Vec<Location>,
}

impl Tour {
    /// Inserts a visit at the specified index shifting the tail to the right.
    pub fn insert_at(&mut self, visit: Location, index: usize) -> &mut Tour {
        self.visits.insert(index, visit);
        self
    }

    /// Removes and returns the visit at the specified index.
    pub fn remove_at(&mut self, index: usize) -> Location {
        self.visits.remove(index)
    }

    /// Replaces the visit at the specified index returning the previous one.
    pub fn replace_at(&mut self, visit: Location, index: usize) -> Location {
        std::mem::replace(&mut self.visits[index], visit)
    }

    /// Reverses visits in the inclusive index range.
    pub fn reverse_segment(&mut self, start: usize, end: usize) {
        self.visits[start..=end].reverse();
    }

    /// Returns the visit at the specified index.
    pub fn get(&self, index: usize) -> Option<Location> {
        self.visits.get(index).copied()
    }

    /// Returns all visits in service order.
    pub fn visits(&self) -> &[Location] {
        self.visits.as_slice()
    }

    /// Returns amount of visits.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Checks whether the tour has no visits.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

/// Represents a route of a specific vehicle.
#[derive(Clone, Debug)]
pub struct Route {
    /// The vehicle index within the fleet.
    pub vehicle: usize,
    /// Customer visits in service order.
    pub tour: Tour,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle: usize) -> Self {
        Self { vehicle, tour: Tour::default() }
    }
}

/// Returns directed arcs of a route as location pairs, including both depot legs.
/// An empty visit sequence yields no arcs.
pub fn route_arcs(depot: Location, visits: &[Location]) -> impl Iterator<Item = (Location, Location)> + '_ {
    let arcs = if visits.is_empty() { 0 } else { visits.len() + 1 };
    let tails = once(depot).chain(visits.iter().copied());
    let heads = visits.iter().copied().chain(once(depot));

    tails.zip(heads).take(arcs)
}

/// A single stop of an extracted route with its realized service time.
#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    /// Node index of the stop.
    pub node: Location,
    /// Time the service starts, or the departure/return time for the depot stops.
    pub time: Timestamp,
}

/// An extracted route of a single vehicle with the depot at both ends.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleRoute {
    /// The vehicle index within the fleet.
    pub vehicle: usize,
    /// Ordered stops including the depot at both ends.
    pub stops: Vec<Stop>,
    /// Total demand served on the route.
    pub load: Demand,
    /// Total travel distance of the route.
    pub distance: Distance,
}

/// Describes why a node was left out of all routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnassignmentReason {
    /// Node demand exceeds the capacity of every vehicle in the fleet.
    ExceedsVehicleCapacity,
    /// No feasible insertion position exists in any route.
    NoFeasibleInsertion,
}

/// A complete solution of the routing problem.
#[derive(Clone, Debug)]
pub struct RoutePlan {
    /// Routes with at least one customer visit, in vehicle index order.
    pub routes: Vec<VehicleRoute>,
    /// Customers which could not be assigned, with the reason.
    pub unassigned: Vec<(Location, UnassignmentReason)>,
    /// Total travel distance over all routes.
    pub cost: Cost,
}
