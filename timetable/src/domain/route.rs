//! Routes: ordered stop sequences with per-segment travel times.
//!
//! A `Route` is built incrementally. It starts with its first stop, gains
//! intermediate stops one by one (each with the travel time from the stop
//! before it) and is closed by [`Route::add_final_travel_time`], which
//! appends the terminal stop. Arrival times are then derived from a start
//! time by a running sum over the travel times.

use tracing::trace;

use super::{DomainError, Stop, StopId, TimeValue, Vehicle, names_match};

/// A stop on a route together with its computed arrival time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStop {
    /// Arena id of the stop
    pub stop: StopId,
    /// Stop name, copied from the arena (names never change once registered)
    pub name: String,
    /// Arrival time, valid after [`Route::calculate_arrival_times`]
    pub arrival_time: TimeValue,
}

impl RouteStop {
    fn at(stop: &Stop) -> Self {
        Self {
            stop: stop.id(),
            name: stop.name().to_string(),
            arrival_time: TimeValue::MIDNIGHT,
        }
    }
}

/// One vehicle's path through the network.
///
/// Invariant: `stops().len() == travel_times().len() + 1`. The first stop
/// is the start stop; once complete, the last stop is the end stop.
///
/// # Examples
///
/// ```
/// use timetable::domain::{Route, Stops, TimeValue, TransportKind, Vehicle};
///
/// let mut stops = Stops::new();
/// let a = stops.find_or_create("A", "");
/// let b = stops.find_or_create("B", "");
/// let c = stops.find_or_create("C", "");
/// let (a, b, c) = (
///     stops.get(a).unwrap(),
///     stops.get(b).unwrap(),
///     stops.get(c).unwrap(),
/// );
///
/// let mut route = Route::new(Vehicle::new(TransportKind::Bus, 7), a, c);
/// route.add_stop(b, 5).unwrap();
/// route.add_final_travel_time(10).unwrap();
/// route.calculate_arrival_times(TimeValue::new(6, 0)).unwrap();
///
/// assert_eq!(route.arrival_time_at_stop("c").unwrap(), TimeValue::new(6, 15));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    vehicle: Vehicle,
    start_stop: StopId,
    terminal: RouteStop,
    stops: Vec<RouteStop>,
    travel_times: Vec<u32>,
    days: Vec<String>,
    complete: bool,
}

impl Route {
    /// Start a route at `start` that will end at `end`.
    pub fn new(vehicle: Vehicle, start: &Stop, end: &Stop) -> Self {
        Self {
            vehicle,
            start_stop: start.id(),
            terminal: RouteStop::at(end),
            stops: vec![RouteStop::at(start)],
            travel_times: Vec::new(),
            days: Vec::new(),
            complete: false,
        }
    }

    /// Append an intermediate stop reached `travel_time` minutes after the
    /// previous one.
    pub fn add_stop(&mut self, stop: &Stop, travel_time: u32) -> Result<(), DomainError> {
        if stop.name().trim().is_empty() {
            return Err(DomainError::InvalidRouteConfiguration(
                "cannot add a stop without a name",
            ));
        }
        if self.complete {
            return Err(DomainError::InvalidRouteConfiguration(
                "cannot add a stop after the terminal segment",
            ));
        }
        self.stops.push(RouteStop::at(stop));
        self.travel_times.push(travel_time);
        Ok(())
    }

    /// Append the end stop, reached `travel_time` minutes after the last
    /// intermediate stop. Must be called exactly once.
    pub fn add_final_travel_time(&mut self, travel_time: u32) -> Result<(), DomainError> {
        if self.complete {
            return Err(DomainError::InvalidRouteConfiguration(
                "terminal segment already added",
            ));
        }
        self.stops.push(self.terminal.clone());
        self.travel_times.push(travel_time);
        self.complete = true;
        Ok(())
    }

    /// Derive the arrival time at every stop from the departure time at
    /// the first stop.
    ///
    /// `arrival[0] = start` and `arrival[i] = arrival[i - 1] + travel[i - 1]`,
    /// wrapping around midnight.
    pub fn calculate_arrival_times(&mut self, start: TimeValue) -> Result<(), DomainError> {
        if self.stops.is_empty() || self.travel_times.is_empty() {
            return Err(DomainError::InvalidRouteConfiguration(
                "not enough data to compute arrival times",
            ));
        }

        let mut current = start;
        self.stops[0].arrival_time = current;
        for (stop, minutes) in self.stops.iter_mut().skip(1).zip(&self.travel_times) {
            current = current.add_minutes(i64::from(*minutes));
            stop.arrival_time = current;
        }

        trace!(
            route = self.route_number(),
            start = %start,
            stops = self.stops.len(),
            "Computed arrival times"
        );
        Ok(())
    }

    /// Arrival time at the first stop whose name matches, ignoring case.
    pub fn arrival_time_at_stop(&self, name: &str) -> Result<TimeValue, DomainError> {
        self.find_stop(name)
            .map(|(_, stop)| stop.arrival_time)
            .ok_or_else(|| DomainError::StopNotFound(name.to_string()))
    }

    /// Position and entry of the first stop whose name matches.
    pub fn find_stop(&self, name: &str) -> Option<(usize, &RouteStop)> {
        self.stops
            .iter()
            .enumerate()
            .find(|(_, stop)| names_match(&stop.name, name))
    }

    /// Does the route call at a stop with this name?
    pub fn passes_through(&self, name: &str) -> bool {
        self.find_stop(name).is_some()
    }

    /// Minutes from the first stop to the stop at `index`.
    ///
    /// Indexes past the end sum every segment.
    pub fn travel_time_to_stop(&self, index: usize) -> u32 {
        self.travel_times.iter().take(index).sum()
    }

    /// The route number, which is the vehicle number.
    pub fn route_number(&self) -> u32 {
        self.vehicle.id
    }

    /// Returns the vehicle.
    pub fn vehicle(&self) -> Vehicle {
        self.vehicle
    }

    /// Returns all stops in travel order.
    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    /// Returns the per-segment travel times in minutes.
    pub fn travel_times(&self) -> &[u32] {
        &self.travel_times
    }

    /// Returns the start stop.
    pub fn start_stop(&self) -> StopId {
        self.start_stop
    }

    /// Returns the end stop.
    pub fn end_stop(&self) -> StopId {
        self.terminal.stop
    }

    /// Returns the operating days.
    pub fn days(&self) -> &[String] {
        &self.days
    }

    /// Replace the operating days.
    pub fn set_days(&mut self, days: Vec<String>) {
        self.days = days;
    }

    /// Has the terminal segment been added?
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
