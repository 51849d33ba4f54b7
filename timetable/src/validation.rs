//! Input validation rules.
//!
//! Every check is a pure function returning `Ok(())` or a
//! [`ValidationError`] whose message can be shown to the user as is. The
//! registry runs these before any mutation, so a failed check never leaves
//! partial state behind.

use crate::domain::{DAY_CODES, DayCode, Schedule, TransportKind};

/// Smallest allowed route number.
pub const MIN_ROUTE_NUMBER: u32 = 1;
/// Largest allowed route number.
pub const MAX_ROUTE_NUMBER: u32 = 999;
/// Shortest allowed segment, in minutes.
pub const MIN_TRAVEL_TIME: u32 = 1;
/// Longest allowed segment, in minutes.
pub const MAX_TRAVEL_TIME: u32 = 120;
/// Longest allowed stop name, in characters.
pub const MAX_STOP_NAME_LENGTH: usize = 100;
/// Longest allowed coordinate text, in characters.
pub const MAX_COORDINATE_LENGTH: usize = 50;

/// A user-correctable input problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("route number must be between {min} and {max}, got {0}", min = MIN_ROUTE_NUMBER, max = MAX_ROUTE_NUMBER)]
    RouteNumberOutOfRange(u32),

    #[error("a route needs at least 2 stops, got {0}")]
    TooFewStops(usize),

    #[error("expected {expected} travel times (one per segment), got {actual}")]
    TravelTimeCount { expected: usize, actual: usize },

    #[error(
        "travel time must be between {min} and {max} minutes (segment {segment}: {minutes})",
        min = MIN_TRAVEL_TIME,
        max = MAX_TRAVEL_TIME
    )]
    TravelTimeOutOfRange { segment: usize, minutes: u32 },

    #[error("stop name must not be empty")]
    EmptyStopName,

    #[error("stop name is too long (maximum {max} characters)", max = MAX_STOP_NAME_LENGTH)]
    StopNameTooLong,

    #[error("coordinate is too long (maximum {max} characters)", max = MAX_COORDINATE_LENGTH)]
    CoordinateTooLong,

    #[error("{field} must not contain line breaks")]
    LineBreak { field: &'static str },

    #[error("hour must be between 0 and 23, got {0}")]
    HourOutOfRange(i64),

    #[error("minute must be between 0 and 59, got {0}")]
    MinuteOutOfRange(i64),

    #[error("no operating days given")]
    NoDays,

    #[error("invalid day {0:?}, expected one of: пн, вт, ср, чт, пт, сб, вс")]
    InvalidDay(String),

    #[error("invalid transport kind {0:?}, expected one of: автобус, троллейбус, трамвай")]
    InvalidTransportKind(String),
}

/// Check everything needed to build a route.
///
/// `stop_count` includes both end stops.
pub fn validate_route_data<S: AsRef<str>>(
    route_number: u32,
    stop_count: usize,
    travel_times: &[u32],
    days: &[S],
) -> Result<(), ValidationError> {
    validate_route_number(route_number)?;
    if stop_count < 2 {
        return Err(ValidationError::TooFewStops(stop_count));
    }
    validate_travel_times(travel_times, stop_count - 1)?;
    validate_days(days)
}

/// Route number must be within 1-999.
pub fn validate_route_number(route_number: u32) -> Result<(), ValidationError> {
    if !(MIN_ROUTE_NUMBER..=MAX_ROUTE_NUMBER).contains(&route_number) {
        return Err(ValidationError::RouteNumberOutOfRange(route_number));
    }
    Ok(())
}

/// Exactly `expected` travel times, each within 1-120 minutes.
pub fn validate_travel_times(travel_times: &[u32], expected: usize) -> Result<(), ValidationError> {
    if travel_times.len() != expected {
        return Err(ValidationError::TravelTimeCount {
            expected,
            actual: travel_times.len(),
        });
    }
    if let Some((i, &minutes)) = travel_times
        .iter()
        .enumerate()
        .find(|(_, t)| !(MIN_TRAVEL_TIME..=MAX_TRAVEL_TIME).contains(*t))
    {
        return Err(ValidationError::TravelTimeOutOfRange {
            segment: i + 1,
            minutes,
        });
    }
    Ok(())
}

/// Stop name non-empty and at most 100 characters; coordinate at most 50.
///
/// Neither may contain `\n` or `\r`, since each is stored on its own line.
pub fn validate_stop_data(name: &str, coordinate: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyStopName);
    }
    if has_line_break(name) {
        return Err(ValidationError::LineBreak { field: "stop name" });
    }
    if has_line_break(coordinate) {
        return Err(ValidationError::LineBreak {
            field: "coordinate",
        });
    }
    if name.chars().count() > MAX_STOP_NAME_LENGTH {
        return Err(ValidationError::StopNameTooLong);
    }
    if coordinate.chars().count() > MAX_COORDINATE_LENGTH {
        return Err(ValidationError::CoordinateTooLong);
    }
    Ok(())
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

/// Hour within 0-23 and minute within 0-59.
///
/// [`TimeValue`](crate::domain::TimeValue) itself accepts anything; this
/// is for rejecting typos before they are silently normalized.
pub fn validate_time_data(hour: i64, minute: i64) -> Result<(), ValidationError> {
    if !(0..=23).contains(&hour) {
        return Err(ValidationError::HourOutOfRange(hour));
    }
    if !(0..=59).contains(&minute) {
        return Err(ValidationError::MinuteOutOfRange(minute));
    }
    Ok(())
}

/// At least one day, and every day a canonical code (any case).
pub fn validate_days<S: AsRef<str>>(days: &[S]) -> Result<(), ValidationError> {
    if days.is_empty() {
        return Err(ValidationError::NoDays);
    }
    match days
        .iter()
        .find(|day| DayCode::from_code(day.as_ref()).is_none())
    {
        Some(bad) => Err(ValidationError::InvalidDay(bad.as_ref().to_string())),
        None => Ok(()),
    }
}

/// Transport kind must be one of the three Russian names (any case).
pub fn validate_transport_kind(kind: &str) -> Result<(), ValidationError> {
    let lower = kind.to_lowercase();
    if TransportKind::all()
        .iter()
        .any(|k| k.display_name() == lower)
    {
        Ok(())
    } else {
        Err(ValidationError::InvalidTransportKind(kind.to_string()))
    }
}

/// Is no existing schedule using this route number?
pub fn is_route_number_unique(route_number: u32, schedules: &[Schedule]) -> bool {
    !schedules
        .iter()
        .any(|schedule| schedule.route_number() == route_number)
}

/// The canonical day codes, for messages and pickers.
pub fn valid_days() -> &'static [&'static str] {
    &DAY_CODES
}
