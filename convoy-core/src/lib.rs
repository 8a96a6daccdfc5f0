//! Core crate contains the main building blocks to solve the ***Capacitated Vehicle Routing
//! Problem with Time Windows***: a problem model with pluggable feasibility dimensions, a
//! cheapest insertion construction and a guided local search which improves the solution
//! until a wall clock budget runs out.
//!

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod construction;
pub mod models;
pub mod prelude;
pub mod solver;
pub mod utils;
