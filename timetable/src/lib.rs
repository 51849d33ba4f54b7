//! Municipal transit timetable.
//!
//! Keeps the stops and scheduled routes of a bus, trolleybus and tram
//! network, derives arrival times at every stop from per-segment travel
//! times, and answers "what arrives next at this stop" queries. The whole
//! timetable lives in a single line-oriented text file.

pub mod arrival;
pub mod coordinate;
pub mod domain;
pub mod registry;
pub mod search;
pub mod stats;
pub mod storage;
pub mod validation;
