use crate::models::common::{Cost, Distance, Location};
use crate::models::problem::Problem;
use crate::models::solution::{Route, UnassignmentReason};

/// Contains information needed to perform the search over a single solution.
#[derive(Clone, Debug)]
pub struct SolutionContext {
    /// Route contexts, one per vehicle in fleet order.
    pub routes: Vec<RouteContext>,
    /// Customers which still have to be assigned.
    pub required: Vec<Location>,
    /// Customers which cannot be assigned, with the reason.
    pub unassigned: Vec<(Location, UnassignmentReason)>,
}

impl SolutionContext {
    /// Creates a solution context with one empty route per vehicle and all
    /// customers pending assignment. Route states are not computed yet.
    pub fn new(problem: &Problem) -> Self {
        Self {
            routes: (0..problem.fleet.size()).map(RouteContext::new).collect(),
            required: problem.customers().collect(),
            unassigned: Default::default(),
        }
    }

    /// Returns the total travel distance over all routes.
    pub fn cost(&self) -> Cost {
        self.routes.iter().map(|route_ctx| route_ctx.state.total_distance()).sum()
    }

    /// Returns amount of routes with at least one visit.
    pub fn active_routes(&self) -> usize {
        self.routes.iter().filter(|route_ctx| !route_ctx.route.tour.is_empty()).count()
    }
}

/// Contains information about the route and its state.
#[derive(Clone, Debug)]
pub struct RouteContext {
    /// A route to serve customers.
    pub route: Route,
    /// State of the route cached between structural changes.
    pub state: RouteState,
}

impl RouteContext {
    /// Creates an empty route context for the given vehicle.
    pub fn new(vehicle: usize) -> Self {
        Self { route: Route::new(vehicle), state: RouteState::default() }
    }
}

/// Caches per dimension cumulative values of a route so that feasibility checks
/// do not have to refold the whole route.
///
/// Values are indexed by route position: `0` is the depot departure, `1..=n` are
/// the visits and `n + 1` is the depot return.
#[derive(Clone, Debug, Default)]
pub struct RouteState {
    cumuls: Vec<Vec<f64>>,
    latests: Vec<Vec<f64>>,
    total_distance: Distance,
}

impl RouteState {
    /// Returns the cumulative value of the dimension at the route position.
    pub fn cumul_at(&self, dimension: usize, position: usize) -> f64 {
        self.cumuls[dimension][position]
    }

    /// Returns the latest feasible value of the dimension at the route position.
    pub fn latest_at(&self, dimension: usize, position: usize) -> f64 {
        self.latests[dimension][position]
    }

    /// Returns the cached total travel distance of the route.
    pub fn total_distance(&self) -> Distance {
        self.total_distance
    }

    /// Replaces the cached state with freshly computed vectors.
    pub fn put(&mut self, cumuls: Vec<Vec<f64>>, latests: Vec<Vec<f64>>, total_distance: Distance) {
        self.cumuls = cumuls;
        self.latests = latests;
        self.total_distance = total_distance;
    }
}
