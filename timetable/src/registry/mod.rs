//! The timetable registry: every stop and schedule, and the operations on
//! them.
//!
//! The registry owns the canonical [`Stops`] arena and the schedule list.
//! Every mutation validates its input first, then changes memory, then
//! rewrites the backing file (when one is configured). If that final write
//! fails the in-memory change is kept and the storage error is returned.

mod config;
mod error;


use std::cell::OnceCell;
use std::collections::HashSet;

use tracing::{debug, info, trace};

use crate::arrival::wait_time;
use crate::domain::{
    DayCode, DomainError, Route, Schedule, Stop, StopId, Stops, TimeValue, TokenPolicy, Vehicle,
    is_route_active_on, translate_day_with,
};
use crate::stats::{self, RouteStats, StopStats};
use crate::storage;
use crate::validation::{ValidationError, validate_days, validate_route_data, validate_stop_data};

pub use config::{DEFAULT_PATH, PATH_ENV, RegistryConfig, STRICT_DAYS_ENV, STRICT_KINDS_ENV};
pub use error::RegistryError;

/// Everything needed to add a route.
///
/// Stops are given by id and must already be registered through
/// [`Registry::find_or_create_stop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    /// Vehicle; its number is the route number.
    pub vehicle: Vehicle,
    /// First stop.
    pub start: StopId,
    /// Last stop.
    pub end: StopId,
    /// Stops between `start` and `end`, in travel order.
    pub intermediate: Vec<StopId>,
    /// Minutes for each segment, one more than `intermediate.len()`.
    pub travel_times: Vec<u32>,
    /// Operating days. Full names and English names are accepted.
    pub days: Vec<String>,
    /// Departure time from `start`.
    pub start_time: TimeValue,
}

/// An upcoming arrival at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Departure<'a> {
    pub schedule: &'a Schedule,
    /// Clock time the vehicle reaches the stop
    pub arrival: TimeValue,
    /// Minutes from the query time, in `0..1440`
    pub wait_minutes: u32,
}

/// The aggregate root for stops and schedules.
#[derive(Debug)]
pub struct Registry {
    config: RegistryConfig,
    stops: Stops,
    schedules: Vec<Schedule>,
    /// Used stops, recomputed after any change
    active: OnceCell<Vec<StopId>>,
}

impl Registry {
    /// Open a registry, loading its backing file if it exists.
    ///
    /// A missing file gives an empty registry; the file is created on the
    /// first change.
    pub fn open(config: RegistryConfig) -> Result<Self, RegistryError> {
        let loaded = match config.path() {
            Some(path) => storage::load(path, config.read_options())?,
            None => None,
        };

        let mut registry = Self::empty(config);
        if let Some(timetable) = loaded {
            registry.stops = timetable.stops;
            registry.schedules = timetable.schedules;
        }
        Ok(registry)
    }

    /// A registry with no backing file.
    pub fn in_memory() -> Self {
        Self::empty(RegistryConfig::in_memory())
    }

    fn empty(config: RegistryConfig) -> Self {
        Self {
            config,
            stops: Stops::new(),
            schedules: Vec::new(),
            active: OnceCell::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Write every stop and schedule to the backing file.
    ///
    /// Does nothing for an in-memory registry.
    pub fn save(&self) -> Result<(), RegistryError> {
        if let Some(path) = self.config.path() {
            storage::save(path, &self.stops, &self.schedules)?;
        }
        Ok(())
    }

    fn changed(&mut self) -> Result<(), RegistryError> {
        self.active.take();
        self.save()
    }

    // --- Routes ---

    /// Validate and add a route.
    ///
    /// Route numbers are not required to be unique: the same number may
    /// run several times a day with different start times.
    pub fn add_route(&mut self, request: RouteRequest) -> Result<(), RegistryError> {
        let schedule = self.build_schedule(request)?;
        info!(
            route = schedule.route_number(),
            stops = schedule.route().stops().len(),
            start = %schedule.start_time(),
            "Added route"
        );
        self.schedules.push(schedule);
        self.changed()
    }

    /// Remove every schedule with this route number.
    pub fn remove_route(&mut self, route_number: u32) -> Result<(), RegistryError> {
        let before = self.schedules.len();
        self.schedules
            .retain(|schedule| schedule.route_number() != route_number);
        let removed = before - self.schedules.len();
        if removed == 0 {
            return Err(DomainError::RouteNotFound(route_number).into());
        }

        info!(route = route_number, schedules = removed, "Removed route");
        self.changed()
    }

    /// Replace every schedule of `route_number` with a new route.
    ///
    /// The replacement is built before anything is removed, so if it fails
    /// validation the registry is unchanged.
    pub fn update_route(
        &mut self,
        route_number: u32,
        request: RouteRequest,
    ) -> Result<(), RegistryError> {
        if self.schedule(route_number).is_none() {
            return Err(DomainError::RouteNotFound(route_number).into());
        }
        let schedule = self.build_schedule(request)?;

        self.schedules
            .retain(|existing| existing.route_number() != route_number);
        info!(
            old = route_number,
            new = schedule.route_number(),
            "Updated route"
        );
        self.schedules.push(schedule);
        self.changed()
    }

    fn build_schedule(&self, request: RouteRequest) -> Result<Schedule, RegistryError> {
        let days = normalize_days(&request.days)?;
        validate_route_data(
            request.vehicle.id,
            request.intermediate.len() + 2,
            &request.travel_times,
            &days,
        )?;

        let stop = |id: StopId| self.stops.get(id).ok_or(DomainError::UnknownStop(id));
        let mut route = Route::new(request.vehicle, stop(request.start)?, stop(request.end)?);
        for (id, minutes) in request.intermediate.iter().zip(&request.travel_times) {
            route.add_stop(stop(*id)?, *minutes)?;
        }
        let last = request
            .travel_times
            .last()
            .copied()
            .ok_or(DomainError::InvalidRouteConfiguration("no travel times"))?;
        route.add_final_travel_time(last)?;
        route.set_days(days);

        Ok(Schedule::new(route, request.start_time)?)
    }

    // --- Stops ---

    /// Return the stop with this name, registering it if needed.
    ///
    /// Names match case-insensitively. An existing stop takes on
    /// `coordinate` when it is non-empty and different.
    pub fn find_or_create_stop(
        &mut self,
        name: &str,
        coordinate: &str,
    ) -> Result<StopId, RegistryError> {
        validate_stop_data(name, coordinate)?;

        let previous = self
            .stops
            .find_by_name(name)
            .map(|stop| stop.coordinate().to_string());
        let id = self.stops.find_or_create(name, coordinate);

        match previous {
            None => {
                debug!(stop = %id, stop_name = name, "Registered stop");
                self.changed()?;
            }
            Some(old) if old != coordinate && !coordinate.is_empty() => {
                debug!(stop = %id, coordinate = coordinate, "Updated stop coordinate");
                self.changed()?;
            }
            Some(_) => {}
        }
        Ok(id)
    }

    /// Look up a stop by id.
    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    /// Every registered stop, in registration order.
    pub fn all_stops(&self) -> &[Stop] {
        self.stops.as_slice()
    }

    /// Returns the stop arena.
    pub fn stops(&self) -> &Stops {
        &self.stops
    }

    /// Stops called at by at least one route.
    ///
    /// Stops sharing a name are reported once, as the first registered.
    pub fn active_stops(&self) -> Vec<&Stop> {
        self.active
            .get_or_init(|| collect_active_stops(&self.stops, &self.schedules))
            .iter()
            .filter_map(|id| self.stops.get(*id))
            .collect()
    }

    // --- Schedules ---

    /// Every schedule, in insertion order.
    pub fn all_schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    /// The first schedule with this route number.
    pub fn schedule(&self, route_number: u32) -> Option<&Schedule> {
        self.schedules
            .iter()
            .find(|schedule| schedule.route_number() == route_number)
    }

    /// Distinct route numbers, in order of first appearance.
    pub fn all_route_numbers(&self) -> Vec<u32> {
        let mut seen = HashSet::new();
        self.schedules
            .iter()
            .map(Schedule::route_number)
            .filter(|number| seen.insert(*number))
            .collect()
    }

    /// Schedules running on `day`, given as any recognized day name.
    pub fn schedules_for_day(&self, day: &str) -> Vec<&Schedule> {
        crate::search::schedules_by_day(&self.schedules, day)
    }

    /// Schedules calling at a stop with this name.
    pub fn schedules_for_stop(&self, stop_name: &str) -> Vec<&Schedule> {
        crate::search::schedules_by_stop(&self.schedules, stop_name)
    }

    /// Upcoming arrivals at `stop_name`, soonest first.
    ///
    /// Only routes running on `today` are considered. An arrival earlier
    /// than `now` counts as the next day's run. Arrivals with equal waits
    /// keep schedule order.
    pub fn find_next_transport(
        &self,
        stop_name: &str,
        now: TimeValue,
        today: DayCode,
    ) -> Vec<Departure<'_>> {
        let mut departures = Vec::new();
        for schedule in &self.schedules {
            let route = schedule.route();
            if !is_route_active_on(route.days(), today) {
                trace!(route = route.route_number(), day = %today, "Not running today");
                continue;
            }
            let Some((_, stop)) = route.find_stop(stop_name) else {
                continue;
            };

            let wait_minutes = wait_time(now, stop.arrival_time);
            trace!(
                route = route.route_number(),
                arrival = %stop.arrival_time,
                wait = wait_minutes,
                "Candidate departure"
            );
            departures.push(Departure {
                schedule,
                arrival: stop.arrival_time,
                wait_minutes,
            });
        }

        departures.sort_by_key(|departure| departure.wait_minutes);
        debug!(
            stop = stop_name,
            now = %now,
            day = %today,
            found = departures.len(),
            "Next transport"
        );
        departures
    }

    // --- Clock ---

    /// The local wall-clock time.
    pub fn current_time(&self) -> TimeValue {
        TimeValue::now()
    }

    /// The local day of the week.
    pub fn current_day_of_week(&self) -> DayCode {
        DayCode::today()
    }

    // --- Statistics ---

    pub fn route_statistics(&self) -> RouteStats {
        stats::route_statistics(&self.schedules)
    }

    pub fn stop_statistics(&self) -> StopStats {
        stats::stop_statistics(&self.schedules, self.stops.as_slice())
    }

    /// Schedules per day, Monday first.
    pub fn daily_schedule_count(&self) -> Vec<(DayCode, usize)> {
        stats::daily_schedule_count(&self.schedules)
    }
}

/// Translate day names to canonical codes, rejecting anything unknown.
fn normalize_days(days: &[String]) -> Result<Vec<String>, ValidationError> {
    let codes = days
        .iter()
        .map(|day| {
            translate_day_with(day, TokenPolicy::Reject)
                .map_err(|_| ValidationError::InvalidDay(day.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    validate_days(&codes)?;
    Ok(codes)
}

fn collect_active_stops(stops: &Stops, schedules: &[Schedule]) -> Vec<StopId> {
    let used: HashSet<String> = schedules
        .iter()
        .flat_map(|schedule| schedule.route().stops())
        .map(|stop| stop.name.to_lowercase())
        .collect();

    let mut seen = HashSet::new();
    stops
        .iter()
        .filter(|stop| {
            let name = stop.name().to_lowercase();
            used.contains(&name) && seen.insert(name)
        })
        .map(Stop::id)
        .collect()
}
