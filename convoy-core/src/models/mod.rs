//! A collection of domain models of the routing problem and its solution.

pub mod common;
pub mod problem;
pub mod solution;
