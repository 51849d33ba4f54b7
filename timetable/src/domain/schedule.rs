//! A route anchored to a daily start time.

use super::{DomainError, Route, TimeValue};

/// A route together with the time it leaves its first stop each day.
///
/// The route's arrival times always reflect the current start time:
/// construction and [`Schedule::set_start_time`] both recompute them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    route: Route,
    start_time: TimeValue,
}

impl Schedule {
    /// Anchor `route` at `start_time`, computing its arrival times.
    pub fn new(mut route: Route, start_time: TimeValue) -> Result<Self, DomainError> {
        route.calculate_arrival_times(start_time)?;
        Ok(Self { route, start_time })
    }

    /// Returns the route with arrival times for the current start time.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns the daily start time.
    pub fn start_time(&self) -> TimeValue {
        self.start_time
    }

    /// Move the start time and recompute every arrival time.
    pub fn set_start_time(&mut self, start_time: TimeValue) -> Result<(), DomainError> {
        self.route.calculate_arrival_times(start_time)?;
        self.start_time = start_time;
        Ok(())
    }

    /// Shortcut for the route number.
    pub fn route_number(&self) -> u32 {
        self.route.route_number()
    }
}
