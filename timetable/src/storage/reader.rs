//! Timetable file reader.
//!
//! Parsing is strict about structure: every section header must be present
//! and well-formed, and any deviation aborts the whole load. Two things are
//! tolerated for compatibility with hand-edited files: a route may list
//! fewer travel times than segments (the gaps become
//! [`DEFAULT_TRAVEL_TIME`] minutes), and unknown day or kind tokens follow
//! the configured [`TokenPolicy`].
//!
//! Stop names in the `STOPS:` section must be unique ignoring case. Counts
//! are only trusted as far as the file actually has lines.

use std::str::Lines;

use tracing::debug;

use super::StorageError;
use crate::domain::{
    DomainError, Route, Schedule, StopId, Stops, TimeValue, TokenPolicy, TransportKind, Vehicle,
    translate_day_with,
};
use crate::validation::validate_stop_data;

/// Minutes assumed for a segment with no stored travel time.
pub const DEFAULT_TRAVEL_TIME: u32 = 5;

/// How to treat unrecognized tokens while reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadOptions {
    pub unknown_days: TokenPolicy,
    pub unknown_kinds: TokenPolicy,
}

/// Everything stored in a timetable file.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    pub stops: Stops,
    pub schedules: Vec<Schedule>,
}

/// Parse a whole timetable file.
pub fn read_timetable(text: &str, options: ReadOptions) -> Result<Timetable, StorageError> {
    let mut cursor = Cursor::new(text);
    let mut timetable = Timetable::default();

    let stop_count = cursor.header("STOPS:")?;
    for _ in 0..stop_count {
        let name = cursor.next_line("stop name")?;
        let coordinate = cursor.next_line("stop coordinate")?;
        validate_stop_data(name, coordinate)
            .map_err(|e| StorageError::malformed(cursor.line, e.to_string()))?;
        if let Some(existing) = timetable.stops.find_by_name(name) {
            return Err(StorageError::malformed(
                cursor.line - 1,
                format!("duplicate stop {name:?} (already listed as {:?})", existing.name()),
            ));
        }
        timetable.stops.find_or_create(name, coordinate);
    }

    let schedule_count = cursor.header("SCHEDULES:")?;
    for _ in 0..schedule_count {
        let schedule = read_schedule(&mut cursor, &mut timetable.stops, options)?;
        timetable.schedules.push(schedule);
    }

    debug!(
        stops = timetable.stops.len(),
        schedules = timetable.schedules.len(),
        "Parsed timetable"
    );
    Ok(timetable)
}

fn read_schedule(
    cursor: &mut Cursor<'_>,
    stops: &mut Stops,
    options: ReadOptions,
) -> Result<Schedule, StorageError> {
    cursor.expect("ROUTE_START")?;

    let kind_name = cursor.next_line("transport kind")?;
    let kind = TransportKind::from_name(kind_name, options.unknown_kinds)
        .map_err(|e| StorageError::malformed(cursor.line, e.to_string()))?;

    let id = cursor.parse_line::<u32>("vehicle number")?;
    let start = read_start_time(cursor)?;
    let days = read_days(cursor, options.unknown_days)?;

    let stop_count = cursor.header("ROUTE_STOPS:")?;
    if stop_count < 2 {
        return Err(StorageError::malformed(
            cursor.line,
            format!("route {id} has {stop_count} stops, at least 2 required"),
        ));
    }
    let mut route_stops: Vec<StopId> = Vec::new();
    for _ in 0..stop_count {
        let name = cursor.next_line("route stop")?;
        validate_stop_data(name, "")
            .map_err(|e| StorageError::malformed(cursor.line, e.to_string()))?;
        route_stops.push(stops.find_or_create(name, ""));
    }

    let time_count = cursor.header("TRAVEL_TIMES:")?;
    let mut travel_times = Vec::new();
    for _ in 0..time_count {
        travel_times.push(cursor.parse_line::<u32>("travel time")?);
    }

    cursor.expect("ROUTE_END")?;

    let line = cursor.line;
    let mut route = build_route(Vehicle::new(kind, id), &route_stops, &travel_times, stops)
        .map_err(|e| StorageError::malformed(line, e.to_string()))?;
    route.set_days(days);
    Schedule::new(route, start).map_err(|e| StorageError::malformed(line, e.to_string()))
}

/// Assemble a route from stored stop ids, filling missing travel times.
fn build_route(
    vehicle: Vehicle,
    route_stops: &[StopId],
    travel_times: &[u32],
    stops: &Stops,
) -> Result<Route, DomainError> {
    let get = |id: StopId| stops.get(id).ok_or(DomainError::UnknownStop(id));
    let last = route_stops.len() - 1;
    let time_for = |segment: usize| {
        travel_times
            .get(segment)
            .copied()
            .unwrap_or(DEFAULT_TRAVEL_TIME)
    };

    let mut route = Route::new(vehicle, get(route_stops[0])?, get(route_stops[last])?);
    for (index, id) in route_stops.iter().enumerate().take(last).skip(1) {
        route.add_stop(get(*id)?, time_for(index - 1))?;
    }
    route.add_final_travel_time(time_for(last - 1))?;
    Ok(route)
}

fn read_start_time(cursor: &mut Cursor<'_>) -> Result<TimeValue, StorageError> {
    let text = cursor.next_line("start time")?;
    let mut parts = text.split_whitespace().map(str::parse::<i64>);
    match (parts.next(), parts.next()) {
        (Some(Ok(hour)), Some(Ok(minute))) => Ok(TimeValue::new(hour, minute)),
        _ => Err(StorageError::malformed(
            cursor.line,
            format!("invalid start time {text:?}, expected \"<hour> <minute>\""),
        )),
    }
}

fn read_days(cursor: &mut Cursor<'_>, policy: TokenPolicy) -> Result<Vec<String>, StorageError> {
    let count = cursor.header("DAYS:")?;
    let mut days = Vec::new();
    for _ in 0..count {
        let day = cursor.next_line("day")?;
        let day = if policy.is_strict() {
            translate_day_with(day, policy)
                .map_err(|e| StorageError::malformed(cursor.line, e.to_string()))?
        } else {
            day.to_string()
        };
        days.push(day);
    }
    Ok(days)
}

/// Line iterator that remembers the current 1-based line number.
struct Cursor<'a> {
    lines: Lines<'a>,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self, what: &str) -> Result<&'a str, StorageError> {
        match self.lines.next() {
            Some(line) => {
                self.line += 1;
                Ok(line)
            }
            None => Err(StorageError::malformed(
                self.line + 1,
                format!("unexpected end of file while reading {what}"),
            )),
        }
    }

    fn parse_line<T: std::str::FromStr>(&mut self, what: &str) -> Result<T, StorageError> {
        let text = self.next_line(what)?;
        text.trim()
            .parse()
            .map_err(|_| StorageError::malformed(self.line, format!("invalid {what} {text:?}")))
    }

    /// Read a `TAG<count>` section header.
    fn header(&mut self, tag: &str) -> Result<usize, StorageError> {
        let text = self.next_line(tag)?;
        text.strip_prefix(tag)
            .and_then(|count| count.trim().parse().ok())
            .ok_or_else(|| {
                StorageError::malformed(self.line, format!("expected {tag}<count>, found {text:?}"))
            })
    }

    fn expect(&mut self, marker: &str) -> Result<(), StorageError> {
        let text = self.next_line(marker)?;
        if text.trim() == marker {
            Ok(())
        } else {
            Err(StorageError::malformed(
                self.line,
                format!("expected {marker}, found {text:?}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
STOPS:3
Депо
55.75,37.61
Рынок

Вокзал
55.77,37.65
SCHEDULES:1
ROUTE_START
троллейбус
12
6 5
DAYS:2
пн
пт
ROUTE_STOPS:3
Депо
Рынок
Вокзал
TRAVEL_TIMES:2
5
10
ROUTE_END
";

    fn read(text: &str) -> Result<Timetable, StorageError> {
        read_timetable(text, ReadOptions::default())
    }

    fn malformed_line(result: Result<Timetable, StorageError>) -> usize {
        match result {
            Err(StorageError::Malformed { line, .. }) => line,
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn reads_sample() {
        let timetable = read(SAMPLE).unwrap();
        assert_eq!(timetable.stops.len(), 3);
        assert_eq!(timetable.stops.as_slice()[0].coordinate(), "55.75,37.61");
        assert_eq!(timetable.stops.as_slice()[1].coordinate(), "");

        let schedule = &timetable.schedules[0];
        assert_eq!(schedule.route_number(), 12);
        assert_eq!(schedule.route().vehicle().kind, TransportKind::Trolleybus);
        assert_eq!(schedule.start_time(), TimeValue::new(6, 5));
        assert_eq!(schedule.route().days(), ["пн", "пт"]);
        assert_eq!(schedule.route().travel_times(), [5, 10]);
        assert_eq!(
            schedule.route().arrival_time_at_stop("вокзал").unwrap(),
            TimeValue::new(6, 20)
        );
    }

    #[test]
    fn route_stops_share_registered_stops() {
        let timetable = read(SAMPLE).unwrap();
        let route = timetable.schedules[0].route();
        assert_eq!(route.start_stop(), StopId(0));
        assert_eq!(route.end_stop(), StopId(2));
        assert_eq!(route.stops()[1].stop, StopId(1));
    }

    #[test]
    fn empty_file_is_malformed() {
        assert_eq!(malformed_line(read("")), 1);
    }

    #[test]
    fn missing_schedules_header() {
        assert_eq!(malformed_line(read("STOPS:0\nROUTES:0\n")), 2);
    }

    #[test]
    fn bad_count_is_malformed() {
        assert!(read("STOPS:many\n").is_err());
    }

    #[test]
    fn huge_counts_are_malformed() {
        let text = SAMPLE.replace(
            "TRAVEL_TIMES:2\n5\n10\n",
            "TRAVEL_TIMES:18446744073709551615\n5\n",
        );
        assert!(matches!(read(&text), Err(StorageError::Malformed { .. })));

        let text = SAMPLE.replace("DAYS:2\n", "DAYS:18446744073709551615\n");
        assert!(matches!(read(&text), Err(StorageError::Malformed { .. })));

        let text = SAMPLE.replace("ROUTE_STOPS:3\n", "ROUTE_STOPS:18446744073709551615\n");
        assert!(matches!(read(&text), Err(StorageError::Malformed { .. })));

        assert!(matches!(
            read("STOPS:18446744073709551615\nA\n\n"),
            Err(StorageError::Malformed { .. })
        ));
    }

    #[test]
    fn stops_differing_only_by_case_rejected() {
        let text = SAMPLE.replace("Вокзал\n55.77,37.65\n", "ДЕПО\n55.77,37.65\n");
        assert_eq!(malformed_line(read(&text)), 6);
        let err = read(&text).unwrap_err();
        assert!(err.to_string().contains("duplicate stop"));
    }

    #[test]
    fn truncated_stops_section() {
        assert!(read("STOPS:2\nA\n1,1\nB\n").is_err());
    }

    #[test]
    fn route_with_one_stop_rejected() {
        let text = SAMPLE
            .replace("ROUTE_STOPS:3\nДепо\nРынок\nВокзал\n", "ROUTE_STOPS:1\nДепо\n");
        let err = read(&text).unwrap_err();
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn missing_travel_times_default() {
        let text = SAMPLE.replace("TRAVEL_TIMES:2\n5\n10\n", "TRAVEL_TIMES:1\n7\n");
        let timetable = read(&text).unwrap();
        let route = timetable.schedules[0].route();
        assert_eq!(route.travel_times(), [7, DEFAULT_TRAVEL_TIME]);
        assert_eq!(
            route.arrival_time_at_stop("Вокзал").unwrap(),
            TimeValue::new(6, 17)
        );

        let text = SAMPLE.replace("TRAVEL_TIMES:2\n5\n10\n", "TRAVEL_TIMES:0\n");
        let timetable = read(&text).unwrap();
        assert_eq!(timetable.schedules[0].route().travel_times(), [5, 5]);
    }

    #[test]
    fn invalid_travel_time_rejected() {
        let text = SAMPLE.replace("TRAVEL_TIMES:2\n5\n10\n", "TRAVEL_TIMES:2\n5\nten\n");
        assert!(read(&text).is_err());
    }

    #[test]
    fn bad_start_time_rejected() {
        let text = SAMPLE.replace("\n6 5\n", "\n6:05\n");
        let err = read(&text).unwrap_err();
        assert!(err.to_string().contains("start time"));
    }

    #[test]
    fn out_of_range_start_time_normalized() {
        let text = SAMPLE.replace("\n6 5\n", "\n25 70\n");
        let timetable = read(&text).unwrap();
        assert_eq!(timetable.schedules[0].start_time(), TimeValue::new(2, 10));
    }

    #[test]
    fn missing_route_end_rejected() {
        let text = SAMPLE.replace("ROUTE_END\n", "");
        assert!(read(&text).is_err());
    }

    #[test]
    fn unknown_kind_follows_policy() {
        let text = SAMPLE.replace("троллейбус", "паром");
        let timetable = read(&text).unwrap();
        assert_eq!(
            timetable.schedules[0].route().vehicle().kind,
            TransportKind::Bus
        );

        let strict = ReadOptions {
            unknown_kinds: TokenPolicy::Reject,
            ..ReadOptions::default()
        };
        assert!(read_timetable(&text, strict).is_err());
    }

    #[test]
    fn unknown_day_follows_policy() {
        let text = SAMPLE.replace("DAYS:2\nпн\nпт\n", "DAYS:2\nпн\nпраздник\n");
        let timetable = read(&text).unwrap();
        assert_eq!(timetable.schedules[0].route().days(), ["пн", "праздник"]);

        let strict = ReadOptions {
            unknown_days: TokenPolicy::Reject,
            ..ReadOptions::default()
        };
        assert!(read_timetable(&text, strict).is_err());

        let text = SAMPLE.replace("DAYS:2\nпн\nпт\n", "DAYS:2\nMonday\nПТ\n");
        let timetable = read_timetable(&text, strict).unwrap();
        assert_eq!(timetable.schedules[0].route().days(), ["пн", "пт"]);
    }

    #[test]
    fn route_stop_missing_from_stops_section_is_created() {
        let text = SAMPLE.replace("ROUTE_STOPS:3\nДепо\nРынок\n", "ROUTE_STOPS:3\nДепо\nПарк\n");
        let timetable = read(&text).unwrap();
        assert_eq!(timetable.stops.len(), 4);
        assert_eq!(timetable.stops.find_by_name("парк").unwrap().coordinate(), "");
    }

    #[test]
    fn empty_stop_name_rejected() {
        let text = SAMPLE.replace("STOPS:3\nДепо\n", "STOPS:3\n\n");
        assert!(read(&text).is_err());
    }

    #[test]
    fn crlf_line_endings_accepted() {
        let text = SAMPLE.replace('\n', "\r\n");
        let timetable = read(&text).unwrap();
        assert_eq!(timetable.schedules.len(), 1);
        assert_eq!(timetable.stops.as_slice()[0].name(), "Депо");
    }
}
