//! A collection of utilities shared across the crate.

mod comparison;
pub use self::comparison::{COST_EPSILON, compare_floats};

mod parallel;
pub use self::parallel::map_reduce;

mod timing;
pub use self::timing::Timer;
