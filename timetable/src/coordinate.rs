//! Parsing and distance helpers for stop coordinates.
//!
//! Stops keep their coordinate as free text. This module turns that text
//! into a latitude/longitude pair and measures great-circle distances.

use serde::Serialize;

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate if both components are in range.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let in_range = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        in_range.then_some(Self {
            latitude,
            longitude,
        })
    }
}

/// Parse `"lat,lon"` or `"lat;lon"`.
///
/// Returns `None` for empty text, the wrong number of parts, non-numeric
/// parts or out-of-range values.
///
/// # Examples
///
/// ```
/// use timetable::coordinate::parse_coordinate;
///
/// let c = parse_coordinate("55.7558, 37.6173").unwrap();
/// assert_eq!(c.latitude, 55.7558);
///
/// assert!(parse_coordinate("55.7558;37.6173").is_some());
/// assert!(parse_coordinate("91,0").is_none());
/// assert!(parse_coordinate("").is_none());
/// ```
pub fn parse_coordinate(text: &str) -> Option<Coordinate> {
    let normalized = text.replace(';', ",");
    let mut parts = normalized.split(',');
    let lat = parts.next()?.trim().parse::<f64>().ok()?;
    let lon = parts.next()?.trim().parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Coordinate::new(lat, lon)
}

/// Render with six decimals, e.g. `"55.755800, 37.617300"`.
pub fn format_coordinate(coordinate: &Coordinate) -> String {
    format!("{:.6}, {:.6}", coordinate.latitude, coordinate.longitude)
}

/// Does the text hold a valid coordinate?
pub fn is_valid_coordinate(text: &str) -> bool {
    parse_coordinate(text).is_some()
}

/// Great-circle distance in metres (haversine formula).
pub fn distance_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Are two coordinates within `max_distance_m` metres of each other?
pub fn are_close(a: &Coordinate, b: &Coordinate, max_distance_m: f64) -> bool {
    distance_meters(a, b) <= max_distance_m
}
