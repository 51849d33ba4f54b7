//! Arrival and wait-time arithmetic.
//!
//! Arrival times are derived from cumulative travel times. Wait times are
//! measured on the wall clock: an arrival earlier than "now" is taken to be
//! tomorrow's run, so a wait is always within one day.

use crate::domain::{MINUTES_PER_DAY, Route, TimeValue};

/// Arrival time at `stop_index` for a run leaving the first stop at `start`.
pub fn arrival_time_at(route: &Route, stop_index: usize, start: TimeValue) -> TimeValue {
    add_travel_time(start, travel_time_to_stop(route, stop_index))
}

/// Arrival times at every stop of `route` for a run leaving at `start`.
pub fn all_arrival_times(route: &Route, start: TimeValue) -> Vec<TimeValue> {
    (0..route.stops().len())
        .map(|index| arrival_time_at(route, index, start))
        .collect()
}

/// Minutes from the first stop to the stop at `stop_index`.
pub fn travel_time_to_stop(route: &Route, stop_index: usize) -> u32 {
    route.travel_time_to_stop(stop_index)
}

/// `start` plus `minutes`, wrapping past midnight.
pub fn add_travel_time(start: TimeValue, minutes: u32) -> TimeValue {
    start.add_minutes(i64::from(minutes))
}

/// Minutes from `now` until the next `arrival`, in `0..1440`.
///
/// # Examples
///
/// ```
/// use timetable::arrival::wait_time;
/// use timetable::domain::TimeValue;
///
/// assert_eq!(wait_time(TimeValue::new(6, 0), TimeValue::new(6, 5)), 5);
/// // Already gone today: wait for tomorrow's run
/// assert_eq!(wait_time(TimeValue::new(6, 10), TimeValue::new(6, 5)), 1435);
/// ```
pub fn wait_time(now: TimeValue, arrival: TimeValue) -> u32 {
    let diff = i64::from(arrival.to_minutes()) - i64::from(now.to_minutes());
    diff.rem_euclid(MINUTES_PER_DAY) as u32
}

/// Render a wait, e.g. `"7 мин"` or `"1 ч 5 мин"`.
pub fn format_wait_time(minutes: u32) -> String {
    if minutes >= 60 {
        format!("{} ч {} мин", minutes / 60, minutes % 60)
    } else {
        format!("{minutes} мин")
    }
}
