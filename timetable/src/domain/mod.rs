//! Domain types for the transit timetable.
//!
//! This module contains the core value types: clock times, stops, transport
//! kinds, routes and schedules. Routes refer to stops by [`StopId`] into a
//! [`Stops`] arena rather than holding shared pointers.

mod day;
mod error;
mod policy;
mod route;
mod schedule;
mod stop;
mod time;
mod transport;

pub use day::{
    DAY_CODES, DayCode, UnknownDay, format_days, is_day_in_list, is_route_active_on,
    parse_days_string, parse_days_with, translate_day, translate_day_with,
};
pub use error::DomainError;
pub use policy::{InvalidTokenPolicy, TokenPolicy};
pub use route::{Route, RouteStop};
pub use schedule::Schedule;
pub use stop::{Stop, StopId, Stops, names_match};
pub use time::{MINUTES_PER_DAY, TimeValue};
pub use transport::{TransportKind, UnknownTransportKind, Vehicle};
