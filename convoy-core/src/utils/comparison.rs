use std::cmp::Ordering;

/// A tolerance used by cost and feasibility comparisons.
pub const COST_EPSILON: f64 = 1E-9;

/// Compares floats with a total order treating NaN as the greatest value.
pub fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a, b) {
        (x, y) if x.is_nan() && y.is_nan() => Ordering::Equal,
        (x, _) if x.is_nan() => Ordering::Greater,
        (_, y) if y.is_nan() => Ordering::Less,
        (_, _) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}
