//! Stops and the stop arena.
//!
//! Every `Stop` lives in a [`Stops`] arena owned by the registry. Routes
//! refer to stops by [`StopId`], so there is exactly one copy of each stop
//! and updating a coordinate is visible to every route that uses it.

use serde::Serialize;
use std::fmt;

use crate::coordinate::{Coordinate, parse_coordinate};

/// Index of a stop within a [`Stops`] arena.
///
/// Identity of a stop is its `StopId`. Two ids from the same arena are
/// equal exactly when they refer to the same stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StopId(pub usize);

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Case-insensitive stop name comparison.
///
/// Names are compared after Unicode lowercasing, so "Проспект Мира" and
/// "ПРОСПЕКТ МИРА" match.
pub fn names_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// A named stop with a free-form coordinate string.
///
/// The coordinate is kept as entered (for example `"55.7558,37.6173"`);
/// use [`Stop::position`] to parse it. Value equality compares name and
/// coordinate exactly and ignores the id.
#[derive(Debug, Clone, Serialize)]
pub struct Stop {
    id: StopId,
    name: String,
    coordinate: String,
}

impl Stop {
    fn new(id: StopId, name: impl Into<String>, coordinate: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate: coordinate.into(),
        }
    }

    /// Returns the arena id.
    pub fn id(&self) -> StopId {
        self.id
    }

    /// Returns the stop name as registered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw coordinate text (may be empty).
    pub fn coordinate(&self) -> &str {
        &self.coordinate
    }

    /// Parses the coordinate text, if it holds a valid latitude/longitude.
    pub fn position(&self) -> Option<Coordinate> {
        parse_coordinate(&self.coordinate)
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.coordinate == other.coordinate
    }
}

impl Eq for Stop {}

/// Arena of stops in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Stops {
    stops: Vec<Stop>,
}

impl Stops {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stop by id.
    pub fn get(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id.0)
    }

    /// Find the first stop whose name matches case-insensitively.
    pub fn find_by_name(&self, name: &str) -> Option<&Stop> {
        self.stops.iter().find(|stop| names_match(&stop.name, name))
    }

    /// Return the stop with this name, creating it if it does not exist.
    ///
    /// When the stop already exists and `coordinate` is non-empty and
    /// different from the stored one, the stored coordinate is replaced.
    /// Input is not validated here; see
    /// [`Registry::find_or_create_stop`](crate::registry::Registry::find_or_create_stop).
    pub fn find_or_create(&mut self, name: &str, coordinate: &str) -> StopId {
        if let Some(existing) = self
            .stops
            .iter_mut()
            .find(|stop| names_match(&stop.name, name))
        {
            if !coordinate.is_empty() && existing.coordinate != coordinate {
                existing.coordinate = coordinate.to_string();
            }
            return existing.id;
        }

        let id = StopId(self.stops.len());
        self.stops.push(Stop::new(id, name, coordinate));
        id
    }

    /// Iterate over all stops in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Stop> {
        self.stops.iter()
    }

    /// All stops as a slice.
    pub fn as_slice(&self) -> &[Stop] {
        &self.stops
    }

    /// Returns the number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if there are no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl<'a> IntoIterator for &'a Stops {
    type Item = &'a Stop;
    type IntoIter = std::slice::Iter<'a, Stop>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
