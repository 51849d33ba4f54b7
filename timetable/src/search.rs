//! Read-only schedule and stop queries.
//!
//! All name comparisons ignore case. Results keep the order of the input.

use crate::domain::{Schedule, Stop, TimeValue, is_day_in_list, names_match};

/// Schedules whose route calls at `stop_name`.
pub fn schedules_by_stop<'a>(schedules: &'a [Schedule], stop_name: &str) -> Vec<&'a Schedule> {
    schedules
        .iter()
        .filter(|schedule| schedule.route().passes_through(stop_name))
        .collect()
}

/// Schedules running on `day`.
///
/// `day` may be a code or any full or English day name.
pub fn schedules_by_day<'a>(schedules: &'a [Schedule], day: &str) -> Vec<&'a Schedule> {
    schedules
        .iter()
        .filter(|schedule| is_day_in_list(day, schedule.route().days()))
        .collect()
}

/// Schedules served by a transport kind, given by its Russian display name.
pub fn schedules_by_transport_kind<'a>(
    schedules: &'a [Schedule],
    kind_name: &str,
) -> Vec<&'a Schedule> {
    schedules
        .iter()
        .filter(|schedule| names_match(schedule.route().vehicle().kind.display_name(), kind_name))
        .collect()
}

/// Stops whose name contains `term`, ignoring case. An empty term matches
/// every stop.
pub fn stops_by_name<'a>(stops: &'a [Stop], term: &str) -> Vec<&'a Stop> {
    let term = term.to_lowercase();
    stops
        .iter()
        .filter(|stop| term.is_empty() || stop.name().to_lowercase().contains(&term))
        .collect()
}

/// Schedules starting within `from..=to`.
pub fn filter_by_start_time(
    schedules: &[Schedule],
    from: TimeValue,
    to: TimeValue,
) -> Vec<&Schedule> {
    schedules
        .iter()
        .filter(|schedule| (from..=to).contains(&schedule.start_time()))
        .collect()
}

/// Schedules that call at `from` and then, later on the same run, at `to`.
pub fn routes_between_stops<'a>(
    schedules: &'a [Schedule],
    from: &str,
    to: &str,
) -> Vec<&'a Schedule> {
    schedules
        .iter()
        .filter(|schedule| {
            let stops = schedule.route().stops();
            stops
                .iter()
                .position(|stop| names_match(&stop.name, from))
                .is_some_and(|start| {
                    stops[start..]
                        .iter()
                        .any(|stop| names_match(&stop.name, to))
                })
        })
        .collect()
}
