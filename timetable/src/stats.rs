//! Aggregate statistics over schedules and stops.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::domain::{DayCode, Schedule, Stop, TransportKind};

/// How many stops the popularity ranking returns.
pub const POPULAR_STOPS_LIMIT: usize = 10;

/// Route counts and sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteStats {
    pub total_routes: usize,
    pub bus_count: usize,
    pub trolleybus_count: usize,
    pub tram_count: usize,
    /// Count per kind display name
    pub routes_by_kind: BTreeMap<String, usize>,
    /// Mean stop count, rounded down
    pub average_stops_per_route: usize,
    pub max_stops_in_route: usize,
    pub min_stops_in_route: usize,
}

/// Stop usage across all routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StopStats {
    pub total_stops: usize,
    /// Distinct stop names used by at least one route
    pub active_stops: usize,
    /// Up to ten most visited stops, most visited first
    pub most_popular_stops: Vec<Stop>,
    /// Route calls per lowercased stop name
    pub stop_usage_count: BTreeMap<String, usize>,
}

/// Count routes per kind and summarize their sizes.
pub fn route_statistics(schedules: &[Schedule]) -> RouteStats {
    let mut stats = RouteStats {
        total_routes: schedules.len(),
        ..RouteStats::default()
    };
    if schedules.is_empty() {
        return stats;
    }

    let mut total_stops = 0;
    stats.min_stops_in_route = usize::MAX;

    for schedule in schedules {
        let route = schedule.route();
        let kind = route.vehicle().kind;
        match kind {
            TransportKind::Bus => stats.bus_count += 1,
            TransportKind::Trolleybus => stats.trolleybus_count += 1,
            TransportKind::Tram => stats.tram_count += 1,
        }
        *stats
            .routes_by_kind
            .entry(kind.display_name().to_string())
            .or_default() += 1;

        let stop_count = route.stops().len();
        total_stops += stop_count;
        stats.max_stops_in_route = stats.max_stops_in_route.max(stop_count);
        stats.min_stops_in_route = stats.min_stops_in_route.min(stop_count);
    }

    stats.average_stops_per_route = total_stops / schedules.len();
    stats
}

/// Count how often each stop is called at and rank the busiest.
///
/// Ties in the ranking are broken by lowercased name. When several stops
/// share a name, the first registered one represents it.
pub fn stop_statistics(schedules: &[Schedule], stops: &[Stop]) -> StopStats {
    let mut usage: BTreeMap<String, usize> = BTreeMap::new();
    for schedule in schedules {
        for stop in schedule.route().stops() {
            *usage.entry(stop.name.to_lowercase()).or_default() += 1;
        }
    }

    let mut by_name: HashMap<String, &Stop> = HashMap::new();
    for stop in stops {
        by_name.entry(stop.name().to_lowercase()).or_insert(stop);
    }

    let mut ranked: Vec<(&String, &usize)> = usage.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1));

    let most_popular_stops = ranked
        .into_iter()
        .take(POPULAR_STOPS_LIMIT)
        .filter_map(|(name, _)| by_name.get(name).map(|stop| (*stop).clone()))
        .collect();

    StopStats {
        total_stops: stops.len(),
        active_stops: usage.len(),
        most_popular_stops,
        stop_usage_count: usage,
    }
}

/// Number of schedules running on each day, Monday first.
///
/// Stored day codes that are not canonical are not counted.
pub fn daily_schedule_count(schedules: &[Schedule]) -> Vec<(DayCode, usize)> {
    let mut counts = [0usize; 7];
    for schedule in schedules {
        for day in schedule.route().days() {
            if let Some(code) = DayCode::from_code(day) {
                counts[code.index()] += 1;
            }
        }
    }
    DayCode::all().into_iter().zip(counts).collect()
}

/// Mean stop count per route, or 0 with no routes.
pub fn average_stops_per_route(schedules: &[Schedule]) -> f64 {
    if schedules.is_empty() {
        return 0.0;
    }
    let total: usize = schedules.iter().map(|s| s.route().stops().len()).sum();
    total as f64 / schedules.len() as f64
}

/// Number of routes per transport kind.
pub fn transport_kind_distribution(schedules: &[Schedule]) -> BTreeMap<TransportKind, usize> {
    let mut distribution = BTreeMap::new();
    for schedule in schedules {
        *distribution
            .entry(schedule.route().vehicle().kind)
            .or_default() += 1;
    }
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Route, Stops, TimeValue, Vehicle};

    fn schedule(stops: &mut Stops, kind: TransportKind, names: &[&str], days: &[&str]) -> Schedule {
        let ids: Vec<_> = names
            .iter()
            .map(|name| stops.find_or_create(name, ""))
            .collect();
        let stops = &*stops;
        let get = |id| stops.get(id).unwrap();
        let mut route = Route::new(Vehicle::new(kind, 1), get(ids[0]), get(ids[ids.len() - 1]));
        for id in &ids[1..ids.len() - 1] {
            route.add_stop(get(*id), 3).unwrap();
        }
        route.add_final_travel_time(3).unwrap();
        route.set_days(days.iter().map(|d| d.to_string()).collect());
        Schedule::new(route, TimeValue::new(8, 0)).unwrap()
    }

    fn fixture() -> (Stops, Vec<Schedule>) {
        let mut stops = Stops::new();
        stops.find_or_create("Unused", "");
        let schedules = vec![
            schedule(&mut stops, TransportKind::Bus, &["A", "B", "C"], &["пн", "вт"]),
            schedule(&mut stops, TransportKind::Bus, &["B", "C"], &["пн"]),
            schedule(
                &mut stops,
                TransportKind::Tram,
                &["C", "D", "B", "A"],
                &["сб", "holiday"],
            ),
        ];
        (stops, schedules)
    }

    #[test]
    fn route_stats() {
        let (_, schedules) = fixture();
        let stats = route_statistics(&schedules);
        assert_eq!(stats.total_routes, 3);
        assert_eq!(stats.bus_count, 2);
        assert_eq!(stats.trolleybus_count, 0);
        assert_eq!(stats.tram_count, 1);
        assert_eq!(stats.routes_by_kind.get("автобус"), Some(&2));
        assert_eq!(stats.routes_by_kind.get("трамвай"), Some(&1));
        assert_eq!(stats.average_stops_per_route, 3);
        assert_eq!(stats.max_stops_in_route, 4);
        assert_eq!(stats.min_stops_in_route, 2);
    }

    #[test]
    fn route_stats_empty() {
        let stats = route_statistics(&[]);
        assert_eq!(stats, RouteStats::default());
    }

    #[test]
    fn stop_stats_rank_by_usage() {
        let (stops, schedules) = fixture();
        let stats = stop_statistics(&schedules, stops.as_slice());
        assert_eq!(stats.total_stops, 5);
        assert_eq!(stats.active_stops, 4);
        assert_eq!(stats.stop_usage_count.get("b"), Some(&3));
        assert_eq!(stats.stop_usage_count.get("d"), Some(&1));
        assert!(!stats.stop_usage_count.contains_key("unused"));

        let names: Vec<_> = stats.most_popular_stops.iter().map(Stop::name).collect();
        // b and c tie on 3, a has 2, d has 1
        assert_eq!(names, ["B", "C", "A", "D"]);
    }

    #[test]
    fn daily_counts_in_week_order() {
        let (_, schedules) = fixture();
        let counts = daily_schedule_count(&schedules);
        assert_eq!(counts.len(), 7);
        assert_eq!(counts[0], (DayCode::Mon, 2));
        assert_eq!(counts[1], (DayCode::Tue, 1));
        assert_eq!(counts[5], (DayCode::Sat, 1));
        assert_eq!(counts[6], (DayCode::Sun, 0));
    }

    #[test]
    fn average_as_float() {
        let (_, schedules) = fixture();
        assert!((average_stops_per_route(&schedules) - 3.0).abs() < f64::EPSILON);
        assert_eq!(average_stops_per_route(&[]), 0.0);
    }

    #[test]
    fn kind_distribution() {
        let (_, schedules) = fixture();
        let dist = transport_kind_distribution(&schedules);
        assert_eq!(dist.get(&TransportKind::Bus), Some(&2));
        assert_eq!(dist.get(&TransportKind::Tram), Some(&1));
        assert_eq!(dist.get(&TransportKind::Trolleybus), None);
    }
}
