//! Contains logic which builds a feasible solution from a problem definition and
//! the dimension machinery which keeps it feasible during the search.

pub mod context;
pub mod dimensions;
pub mod insertion;
