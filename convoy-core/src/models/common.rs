use crate::utils::compare_floats;
use std::cmp::Ordering;

/// Specifies location type.
pub type Location = usize;

/// Specifies cost value.
pub type Cost = f64;

/// Specifies distance value.
pub type Distance = f64;

/// Specifies duration value in abstract time units.
pub type Duration = f64;

/// Specifies timestamp value in abstract time units.
pub type Timestamp = f64;

/// Specifies a demand amount.
pub type Demand = i32;

/// Specifies a vehicle capacity amount.
pub type Capacity = i32;

/// Represents a time window.
#[derive(Clone, Debug)]
pub struct TimeWindow {
    /// Earliest time the service can start.
    pub start: Timestamp,
    /// Latest time the service can start.
    pub end: Timestamp,
}

impl TimeWindow {
    /// Creates a new [`TimeWindow`].
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Returns unlimited time window.
    pub fn max() -> Self {
        Self { start: 0., end: f64::MAX }
    }

    /// Checks whether time window has intersection with another one.
    pub fn intersects(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks whether given time is within the time window.
    pub fn contains(&self, time: Timestamp) -> bool {
        time >= self.start && time <= self.end
    }
}

impl PartialEq<TimeWindow> for TimeWindow {
    fn eq(&self, other: &TimeWindow) -> bool {
        compare_floats(self.start, other.start) == Ordering::Equal
            && compare_floats(self.end, other.end) == Ordering::Equal
    }
}

impl Eq for TimeWindow {}
